//! Indirect call slots.

use std::{
    fmt,
    sync::{Arc, RwLock},
};

use crate::{
    target::{CallSite, Function},
    value::{Signature, Value},
    Error, Result,
};

struct SlotInner {
    label: Arc<str>,
    signature: Signature,
    current: RwLock<Function>,
}

/// A shared cell holding the function that call sites dispatch to.
///
/// A `FunctionSlot` is the in-process equivalent of a function pointer that
/// callers load before each call (a GOT entry, a callback pointer, a dispatch
/// variable). Code that wants to be hookable calls through the slot with
/// [`FunctionSlot::call`]; a [`crate::hook::SlotHook`] redirects those calls
/// by swapping the slot's contents.
///
/// The slot's signature is fixed at construction. Every function stored into it
/// later must have exactly that signature.
///
/// Handles are cheap to clone and all clones refer to the same cell.
///
/// # Examples
///
/// ```rust
/// use hookscope::{target::{Function, FunctionSlot}, value::{Signature, Value, ValueKind}};
///
/// let sig = Signature::new(vec![ValueKind::I32], ValueKind::I32);
/// let slot = FunctionSlot::new(Function::new("double", sig, |args| {
///     Ok(Value::I32(args[0].as_i32().unwrap_or(0) * 2))
/// }));
///
/// assert_eq!(slot.call(&[Value::I32(21)])?, Value::I32(42));
/// # Ok::<(), hookscope::Error>(())
/// ```
#[derive(Clone)]
pub struct FunctionSlot {
    inner: Arc<SlotInner>,
}

impl FunctionSlot {
    /// Creates a slot initially dispatching to `function`.
    ///
    /// The slot takes its label and its fixed signature from `function`.
    #[must_use]
    pub fn new(function: Function) -> Self {
        Self {
            inner: Arc::new(SlotInner {
                label: Arc::from(function.name()),
                signature: function.signature().clone(),
                current: RwLock::new(function),
            }),
        }
    }

    /// Returns the label of the slot (the name of its initial function).
    #[must_use]
    pub fn label(&self) -> &str {
        &self.inner.label
    }

    /// Returns the fixed signature of the slot.
    #[must_use]
    pub fn signature(&self) -> &Signature {
        &self.inner.signature
    }

    /// Returns the function the slot currently dispatches to.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockError`] if the slot's lock is poisoned.
    pub fn load(&self) -> Result<Function> {
        let current = self.inner.current.read().map_err(|_| Error::LockError)?;
        Ok(current.clone())
    }

    /// Calls the function the slot currently dispatches to.
    ///
    /// The current function is loaded first and invoked after the lock is
    /// released, so the callee may itself call through the slot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockError`] on a poisoned lock, or any error of
    /// [`Function::call`].
    pub fn call(&self, args: &[Value]) -> Result<Value> {
        self.load()?.call(args)
    }

    /// Replaces the slot's function and returns the previous one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SignatureMismatch`] if `function` has a different
    /// signature than the slot, or [`Error::LockError`] on a poisoned lock.
    pub fn swap(&self, function: Function) -> Result<Function> {
        self.check_signature(&function)?;
        let mut current = self.inner.current.write().map_err(|_| Error::LockError)?;
        Ok(std::mem::replace(&mut *current, function))
    }

    /// Replaces the slot's function only if it is still `expected`.
    ///
    /// Returns `true` if the slot held `expected` (by identity) and now holds
    /// `new`, `false` if the slot was left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SignatureMismatch`] if `new` has a different signature
    /// than the slot, or [`Error::LockError`] on a poisoned lock.
    pub fn compare_exchange(&self, expected: &Function, new: Function) -> Result<bool> {
        self.check_signature(&new)?;
        let mut current = self.inner.current.write().map_err(|_| Error::LockError)?;
        if !current.ptr_eq(expected) {
            return Ok(false);
        }
        *current = new;
        Ok(true)
    }

    fn check_signature(&self, function: &Function) -> Result<()> {
        if function.signature() != self.signature() {
            return Err(Error::SignatureMismatch {
                expected: self.signature().clone(),
                found: function.signature().clone(),
            });
        }
        Ok(())
    }
}

impl CallSite for FunctionSlot {
    fn signature(&self) -> Signature {
        self.inner.signature.clone()
    }

    fn load(&self) -> Result<Function> {
        FunctionSlot::load(self)
    }

    fn swap(&self, function: Function) -> Result<Function> {
        FunctionSlot::swap(self, function)
    }

    fn compare_exchange(&self, expected: &Function, new: Function) -> Result<bool> {
        FunctionSlot::compare_exchange(self, expected, new)
    }

    fn describe(&self) -> String {
        format!("slot '{}'", self.label())
    }
}

impl fmt::Debug for FunctionSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionSlot")
            .field("label", &self.inner.label)
            .field("signature", &self.inner.signature.to_string())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        test::{add_function, mul_function},
        value::ValueKind,
    };

    #[test]
    fn test_call_dispatches_to_current() {
        let slot = FunctionSlot::new(add_function("add"));
        assert_eq!(
            slot.call(&[Value::I32(3), Value::I32(4)]).unwrap(),
            Value::I32(7)
        );

        let previous = slot.swap(mul_function("mul")).unwrap();
        assert_eq!(previous.name(), "add");
        assert_eq!(
            slot.call(&[Value::I32(3), Value::I32(4)]).unwrap(),
            Value::I32(12)
        );
    }

    #[test]
    fn test_swap_rejects_other_signature() {
        let slot = FunctionSlot::new(add_function("add"));
        let other = Function::new("nop", Signature::void(), |_| Ok(Value::Void));

        assert!(matches!(
            slot.swap(other),
            Err(Error::SignatureMismatch { .. })
        ));
        assert_eq!(slot.load().unwrap().name(), "add");
    }

    #[test]
    fn test_compare_exchange() {
        let add = add_function("add");
        let mul = mul_function("mul");
        let slot = FunctionSlot::new(add.clone());

        assert!(!slot.compare_exchange(&mul, mul.clone()).unwrap());
        assert!(slot.load().unwrap().ptr_eq(&add));

        assert!(slot.compare_exchange(&add, mul.clone()).unwrap());
        assert!(slot.load().unwrap().ptr_eq(&mul));
    }

    #[test]
    fn test_clones_share_cell() {
        let slot = FunctionSlot::new(add_function("add"));
        let alias = slot.clone();

        alias.swap(mul_function("mul")).unwrap();
        assert_eq!(slot.load().unwrap().name(), "mul");
        assert_eq!(slot.label(), "add");
        assert_eq!(
            CallSite::signature(&slot),
            Signature::new(vec![ValueKind::I32, ValueKind::I32], ValueKind::I32)
        );
    }

    #[test]
    fn test_reentrant_call() {
        let slot = FunctionSlot::new(Function::new(
            "countdown",
            Signature::new(vec![ValueKind::I32], ValueKind::I32),
            |args| Ok(args[0].clone()),
        ));
        let inner = slot.clone();
        slot.swap(Function::new(
            "recurse",
            Signature::new(vec![ValueKind::I32], ValueKind::I32),
            move |args| {
                let n = args[0].as_i32().unwrap_or(0);
                if n == 0 {
                    Ok(Value::I32(0))
                } else {
                    inner.call(&[Value::I32(n - 1)])
                }
            },
        ))
        .unwrap();

        assert_eq!(slot.call(&[Value::I32(5)]).unwrap(), Value::I32(0));
    }
}
