//! Call signatures for type-erased functions.

use std::fmt;

use crate::{
    value::{Value, ValueKind},
    Error, Result,
};

/// Parameter kinds and return kind of a hookable function.
///
/// A target and its replacement must share the same signature. Every call made
/// through a [`crate::target::Function`] is checked against it: argument count
/// first, then each argument's kind in order, and finally the returned value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Signature {
    params: Vec<ValueKind>,
    ret: ValueKind,
}

impl Signature {
    /// Creates a signature from parameter kinds and a return kind.
    #[must_use]
    pub fn new(params: Vec<ValueKind>, ret: ValueKind) -> Self {
        Self { params, ret }
    }

    /// Signature of a function taking nothing and returning nothing.
    #[must_use]
    pub fn void() -> Self {
        Self::new(Vec::new(), ValueKind::Void)
    }

    /// Parameter kinds, in call order.
    #[must_use]
    pub fn params(&self) -> &[ValueKind] {
        &self.params
    }

    /// Return kind.
    #[must_use]
    pub fn ret(&self) -> ValueKind {
        self.ret
    }

    /// Number of parameters.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Validates an argument list against this signature.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArgumentCount`] if the number of arguments differs, or
    /// [`Error::ArgumentType`] for the first argument whose kind differs.
    pub fn check_args(&self, args: &[Value]) -> Result<()> {
        if args.len() != self.params.len() {
            return Err(Error::ArgumentCount {
                expected: self.params.len(),
                found: args.len(),
            });
        }

        for (index, (arg, expected)) in args.iter().zip(&self.params).enumerate() {
            let found = arg.kind();
            if found != *expected {
                return Err(Error::ArgumentType {
                    index,
                    expected: *expected,
                    found,
                });
            }
        }

        Ok(())
    }

    /// Validates a returned value against this signature.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReturnType`] if the value's kind differs from the
    /// declared return kind.
    pub fn check_return(&self, value: &Value) -> Result<()> {
        let found = value.kind();
        if found != self.ret {
            return Err(Error::ReturnType {
                expected: self.ret,
                found,
            });
        }
        Ok(())
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{param}")?;
        }
        write!(f, ") -> {}", self.ret)
    }
}
