//! Thread-safe registry handle.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::{
    hook::Hook,
    registry::{HookRegistry, RegistryConfig},
    target::{Function, Target},
    value::Value,
    Error, Result,
};

/// A cloneable handle to a [`HookRegistry`] guarded by a single lock.
///
/// Every operation acquires the lock for its whole duration, so mapping
/// mutations and hook transitions never interleave. Bulk operations keep the
/// lock across the entire batch. Use [`SharedRegistry::with`] to run several
/// operations as one critical section.
///
/// Originals invoked through [`call_original`](Self::call_original) run while
/// the lock is held and must not call back into the same registry.
///
/// # Examples
///
/// ```rust
/// use std::thread;
///
/// use hookscope::{
///     SharedRegistry,
///     target::{Function, FunctionSlot},
///     value::{Signature, Value},
/// };
///
/// let registry = SharedRegistry::new();
/// let handles: Vec<_> = (0..4)
///     .map(|i| {
///         let registry = registry.clone();
///         thread::spawn(move || {
///             let slot = FunctionSlot::new(Function::new("f", Signature::void(), |_| Ok(Value::Void)));
///             let nop = Function::new("nop", Signature::void(), |_| Ok(Value::Void));
///             registry.add(slot, nop, format!("hook-{i}"))
///         })
///     })
///     .collect();
///
/// for handle in handles {
///     handle.join().unwrap()?;
/// }
/// assert_eq!(registry.len()?, 4);
/// # Ok::<(), hookscope::Error>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct SharedRegistry {
    inner: Arc<Mutex<HookRegistry>>,
}

impl SharedRegistry {
    /// Creates an empty shared registry with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty shared registry with the given configuration.
    #[must_use]
    pub fn with_config(config: RegistryConfig) -> Self {
        HookRegistry::with_config(config).into()
    }

    /// Runs `f` with exclusive access to the registry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockError`] if the lock is poisoned.
    pub fn with<R>(&self, f: impl FnOnce(&mut HookRegistry) -> R) -> Result<R> {
        let mut registry = self.lock()?;
        Ok(f(&mut registry))
    }

    /// See [`HookRegistry::add`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockError`] or any error of [`HookRegistry::add`].
    pub fn add(
        &self,
        target: impl Into<Target>,
        replacement: Function,
        name: impl Into<String>,
    ) -> Result<()> {
        self.lock()?.add(target, replacement, name)
    }

    /// See [`HookRegistry::add_hook`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockError`] or any error of [`HookRegistry::add_hook`].
    pub fn add_hook<H>(&self, name: impl Into<String>, hook: H) -> Result<()>
    where
        H: Hook + 'static,
    {
        self.lock()?.add_hook(name, hook)
    }

    /// See [`HookRegistry::install`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockError`] or any error of [`HookRegistry::install`].
    pub fn install(&self, name: &str) -> Result<()> {
        self.lock()?.install(name)
    }

    /// See [`HookRegistry::install_all`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockError`] or any error of [`HookRegistry::install_all`].
    pub fn install_all(&self) -> Result<()> {
        self.lock()?.install_all()
    }

    /// See [`HookRegistry::uninstall`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockError`] or any error of [`HookRegistry::uninstall`].
    pub fn uninstall(&self, name: &str) -> Result<()> {
        self.lock()?.uninstall(name)
    }

    /// See [`HookRegistry::uninstall_all`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockError`] or any error of [`HookRegistry::uninstall_all`].
    pub fn uninstall_all(&self) -> Result<()> {
        self.lock()?.uninstall_all()
    }

    /// See [`HookRegistry::remove`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockError`] or any error of [`HookRegistry::remove`].
    pub fn remove(&self, name: &str) -> Result<()> {
        self.lock()?.remove(name)
    }

    /// See [`HookRegistry::clear`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockError`] if the lock is poisoned.
    pub fn clear(&self) -> Result<()> {
        self.lock()?.clear();
        Ok(())
    }

    /// See [`HookRegistry::call_original`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockError`] or any error of
    /// [`HookRegistry::call_original`].
    pub fn call_original(&self, name: &str, args: &[Value]) -> Result<Value> {
        self.lock()?.call_original(name, args)
    }

    /// See [`HookRegistry::is_installed`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockError`] or [`Error::NotFound`].
    pub fn is_installed(&self, name: &str) -> Result<bool> {
        self.lock()?.is_installed(name)
    }

    /// See [`HookRegistry::contains`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockError`] if the lock is poisoned.
    pub fn contains(&self, name: &str) -> Result<bool> {
        Ok(self.lock()?.contains(name))
    }

    /// See [`HookRegistry::len`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockError`] if the lock is poisoned.
    pub fn len(&self) -> Result<usize> {
        Ok(self.lock()?.len())
    }

    /// See [`HookRegistry::is_empty`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockError`] if the lock is poisoned.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.lock()?.is_empty())
    }

    /// Returns a snapshot of the registered names, in order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockError`] if the lock is poisoned.
    pub fn names(&self) -> Result<Vec<String>> {
        Ok(self.lock()?.names().map(str::to_string).collect())
    }

    fn lock(&self) -> Result<MutexGuard<'_, HookRegistry>> {
        self.inner.lock().map_err(|_| Error::LockError)
    }
}

impl From<HookRegistry> for SharedRegistry {
    fn from(registry: HookRegistry) -> Self {
        Self {
            inner: Arc::new(Mutex::new(registry)),
        }
    }
}
