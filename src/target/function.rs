//! Named, signature-carrying callables.

use std::{fmt, sync::Arc};

use crate::{
    value::{Signature, Value},
    Result,
};

/// Body of a [`Function`].
pub type FunctionBody = dyn Fn(&[Value]) -> Result<Value> + Send + Sync;

/// A callable that can be used as a hook target or replacement.
///
/// `Function` pairs a closure with its [`Signature`]. Calls through
/// [`Function::call`] are checked at the boundary: arguments are validated
/// before the body runs and the returned value is validated afterwards, so a
/// mismatched call surfaces as a structured [`crate::Error`].
///
/// Cloning is cheap and preserves identity; [`Function::ptr_eq`] reports
/// whether two handles refer to the same body.
///
/// # Examples
///
/// ```rust
/// use hookscope::{target::Function, value::{Signature, Value, ValueKind}};
///
/// let add = Function::new(
///     "add",
///     Signature::new(vec![ValueKind::I32, ValueKind::I32], ValueKind::I32),
///     |args| Ok(Value::I32(args[0].as_i32().unwrap_or(0) + args[1].as_i32().unwrap_or(0))),
/// );
///
/// assert_eq!(add.call(&[Value::I32(2), Value::I32(3)])?, Value::I32(5));
/// assert!(add.call(&[Value::I32(2)]).is_err());
/// # Ok::<(), hookscope::Error>(())
/// ```
#[derive(Clone)]
pub struct Function {
    name: Arc<str>,
    signature: Arc<Signature>,
    body: Arc<FunctionBody>,
}

impl Function {
    /// Creates a new function from a name, a signature and a body.
    ///
    /// # Arguments
    ///
    /// * `name` - Descriptive name used in logs and `Debug` output
    /// * `signature` - Parameter and return kinds enforced on every call
    /// * `body` - The implementation; receives already validated arguments
    #[must_use]
    pub fn new<F>(name: impl Into<String>, signature: Signature, body: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            name: Arc::from(name.into()),
            signature: Arc::new(signature),
            body: Arc::new(body),
        }
    }

    /// Returns the function's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the function's signature.
    #[must_use]
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Invokes the function.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::ArgumentCount`] or [`crate::Error::ArgumentType`]
    /// if `args` does not match the signature, any error produced by the body,
    /// or [`crate::Error::ReturnType`] if the body returned the wrong kind.
    pub fn call(&self, args: &[Value]) -> Result<Value> {
        self.signature.check_args(args)?;
        let value = (self.body)(args)?;
        self.signature.check_return(&value)?;
        Ok(value)
    }

    /// Returns `true` if both handles refer to the same function body.
    #[must_use]
    pub fn ptr_eq(&self, other: &Function) -> bool {
        Arc::ptr_eq(&self.body, &other.body)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.name)
            .field("signature", &self.signature.to_string())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{test::add_function, value::ValueKind, Error};

    #[test]
    fn test_call_validates_arguments() {
        let add = add_function("add");

        assert_eq!(
            add.call(&[Value::I32(40), Value::I32(2)]).unwrap(),
            Value::I32(42)
        );
        assert!(matches!(
            add.call(&[]),
            Err(Error::ArgumentCount {
                expected: 2,
                found: 0
            })
        ));
        assert!(matches!(
            add.call(&[Value::I32(1), Value::Bool(true)]),
            Err(Error::ArgumentType { index: 1, .. })
        ));
    }

    #[test]
    fn test_call_validates_return() {
        let liar = Function::new(
            "liar",
            Signature::new(vec![], ValueKind::I64),
            |_| Ok(Value::Str("not a number".into())),
        );

        assert!(matches!(
            liar.call(&[]),
            Err(Error::ReturnType {
                expected: ValueKind::I64,
                found: ValueKind::Str
            })
        ));
    }

    #[test]
    fn test_body_error_propagates() {
        let failing = Function::new("failing", Signature::void(), |_| {
            Err(Error::Error("boom".into()))
        });

        let err = failing.call(&[]).unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn test_ptr_eq_tracks_identity() {
        let a = add_function("a");
        let b = add_function("b");
        let a2 = a.clone();

        assert!(a.ptr_eq(&a2));
        assert!(!a.ptr_eq(&b));
    }
}
