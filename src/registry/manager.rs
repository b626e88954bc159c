//! The hook registry.

use std::{
    collections::{btree_map, BTreeMap},
    fmt,
};

use tracing::{debug, info, warn};

use crate::{
    hook::Hook,
    registry::{HookEntry, RegistryConfig},
    target::{Function, Target},
    value::Value,
    Error, Result,
};

/// Mapping from unique names to hooks, with explicit lifecycle operations.
///
/// The registry owns every hook from [`add`](Self::add) to
/// [`remove`](Self::remove) or [`clear`](Self::clear). Adding never installs
/// and uninstalling never removes; each step is driven by the caller.
///
/// # Iteration Order
///
/// Bulk operations and listings visit entries in ascending name order.
///
/// # Failure Semantics
///
/// All failures are returned to the caller immediately, with no retry and no
/// rollback. [`install_all`](Self::install_all) and
/// [`uninstall_all`](Self::uninstall_all) stop at the first failing entry:
/// entries already processed keep their new state and entries not yet reached
/// are never attempted.
///
/// # Idempotence
///
/// Installing an installed entry or uninstalling an uninstalled one succeeds
/// without consulting the hook.
///
/// # Thread Safety
///
/// All mutations take `&mut self`; callers serialize access. Use
/// [`crate::SharedRegistry`] to share one registry between threads behind a
/// single lock.
///
/// # Examples
///
/// ```rust
/// use hookscope::{
///     HookRegistry,
///     target::{Function, FunctionSlot},
///     value::{Signature, Value, ValueKind},
/// };
///
/// let sig = Signature::new(vec![ValueKind::Str], ValueKind::Bool);
/// let slot = FunctionSlot::new(Function::new("is_licensed", sig.clone(), |args| {
///     Ok(Value::Bool(args[0].as_str() == Some("valid-key")))
/// }));
/// let always = Function::new("always", sig, |_| Ok(Value::Bool(true)));
///
/// let mut registry = HookRegistry::new();
/// registry.add(slot.clone(), always, "license")?;
/// registry.install("license")?;
///
/// let key = [Value::from("bogus")];
/// assert_eq!(slot.call(&key)?, Value::Bool(true));
/// assert_eq!(registry.call_original("license", &key)?, Value::Bool(false));
///
/// registry.remove("license")?;
/// assert_eq!(slot.call(&key)?, Value::Bool(false));
/// # Ok::<(), hookscope::Error>(())
/// ```
#[derive(Default)]
pub struct HookRegistry {
    entries: BTreeMap<String, HookEntry>,
    config: RegistryConfig,
}

impl HookRegistry {
    /// Creates an empty registry with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty registry with the given configuration.
    #[must_use]
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            entries: BTreeMap::new(),
            config,
        }
    }

    /// Returns the registry's configuration.
    #[must_use]
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Creates a hook redirecting `target` to `replacement` and registers it
    /// under `name`.
    ///
    /// The strategy is selected from the kind of `target`. The new hook starts
    /// uninstalled.
    ///
    /// # Arguments
    ///
    /// * `target` - The original callable, e.g. a [`crate::target::FunctionSlot`]
    /// * `replacement` - The function calls are routed to once installed
    /// * `name` - Unique key for the hook
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateName`] if `name` is taken (the existing entry
    /// is unmodified), or any error of [`Target::into_hook`].
    pub fn add(
        &mut self,
        target: impl Into<Target>,
        replacement: Function,
        name: impl Into<String>,
    ) -> Result<()> {
        let name = name.into();
        if self.entries.contains_key(&name) {
            return Err(Error::DuplicateName(name));
        }

        let target = target.into();
        debug!(hook = %name, target = %target.describe(), replacement = replacement.name(), "creating hook");
        let hook = target.into_hook(replacement)?;
        self.insert(name, hook)
    }

    /// Registers a caller-provided hook implementation under `name`.
    ///
    /// The registry treats the hook as uninstalled, whatever it reports.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateName`] if `name` is taken.
    pub fn add_hook<H>(&mut self, name: impl Into<String>, hook: H) -> Result<()>
    where
        H: Hook + 'static,
    {
        self.insert(name.into(), Box::new(hook))
    }

    fn insert(&mut self, name: String, hook: Box<dyn Hook>) -> Result<()> {
        match self.entries.entry(name) {
            btree_map::Entry::Occupied(occupied) => Err(Error::DuplicateName(occupied.key().clone())),
            btree_map::Entry::Vacant(vacant) => {
                let name = vacant.key().clone();
                debug!(hook = %name, "hook registered");
                vacant.insert(HookEntry::new(name, hook));
                Ok(())
            }
        }
    }

    /// Activates the hook registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no such hook exists, or
    /// [`Error::InstallFailed`] if the hook refused to activate; the entry then
    /// stays uninstalled.
    pub fn install(&mut self, name: &str) -> Result<()> {
        self.entry_mut(name)?.install()
    }

    /// Activates every registered hook, stopping at the first failure.
    ///
    /// Already installed entries are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InstallFailed`] naming the first entry that refused to
    /// activate. Entries installed before it stay installed; entries after it
    /// are not attempted.
    pub fn install_all(&mut self) -> Result<()> {
        let total = self.entries.len();
        let mut installed = 0usize;

        for entry in self.entries.values_mut() {
            if entry.is_installed() {
                continue;
            }
            if let Err(error) = entry.install() {
                warn!(hook = entry.name(), installed, total, "aborting bulk install");
                return Err(error);
            }
            installed += 1;
        }

        info!(installed, total, "installed all hooks");
        Ok(())
    }

    /// Deactivates the hook registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no such hook exists, or
    /// [`Error::UninstallFailed`] if the hook refused to deactivate; the entry
    /// then stays installed.
    pub fn uninstall(&mut self, name: &str) -> Result<()> {
        self.entry_mut(name)?.uninstall()
    }

    /// Deactivates every registered hook, stopping at the first failure.
    ///
    /// Entries that are not installed are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UninstallFailed`] naming the first entry that refused
    /// to deactivate. Entries uninstalled before it stay uninstalled; entries
    /// after it are not attempted.
    pub fn uninstall_all(&mut self) -> Result<()> {
        let total = self.entries.len();
        let mut uninstalled = 0usize;

        for entry in self.entries.values_mut() {
            if !entry.is_installed() {
                continue;
            }
            if let Err(error) = entry.uninstall() {
                warn!(hook = entry.name(), uninstalled, total, "aborting bulk uninstall");
                return Err(error);
            }
            uninstalled += 1;
        }

        info!(uninstalled, total, "uninstalled all hooks");
        Ok(())
    }

    /// Removes the hook registered under `name`, uninstalling it first if
    /// needed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Lookup`] if no such hook exists ([`Error::NotFound`]
    /// with [`RegistryConfig::strict_lookup`]), or [`Error::UninstallFailed`]
    /// if the hook was installed and refused to deactivate. In that case the
    /// entry is kept, still installed.
    pub fn remove(&mut self, name: &str) -> Result<()> {
        let entry = self.lookup_mut(name)?;
        if entry.is_installed() {
            entry.uninstall()?;
        }

        self.entries.remove(name);
        debug!(hook = %name, "hook removed");
        Ok(())
    }

    /// Drops every entry.
    ///
    /// By default installed hooks are dropped without being uninstalled: their
    /// redirections stay active and can no longer be reached through the
    /// registry. With [`RegistryConfig::uninstall_on_clear`] installed hooks
    /// are uninstalled first on a best-effort basis, in repeated passes so
    /// that hooks stacked on one site unwind top-down. Clearing always
    /// succeeds.
    pub fn clear(&mut self) {
        if self.config.uninstall_on_clear {
            // Each pass that makes progress leaves fewer installed entries
            loop {
                let mut progressed = false;
                for entry in self.entries.values_mut().filter(|e| e.is_installed()) {
                    progressed |= entry.uninstall().is_ok();
                }
                if !progressed {
                    break;
                }
            }

            for entry in self.entries.values().filter(|e| e.is_installed()) {
                warn!(hook = entry.name(), "dropping hook that failed to uninstall");
            }
        }

        let active = self.entries.values().filter(|e| e.is_installed()).count();
        if active > 0 {
            warn!(
                active,
                "clearing registry with installed hooks, their redirections stay active"
            );
        }

        let total = self.entries.len();
        self.entries.clear();
        info!(total, "registry cleared");
    }

    /// Invokes the original target of the hook registered under `name`.
    ///
    /// Works whether or not the hook is installed. For an uninstalled hook
    /// the target's current dispatch is called, see [`Hook::invoke_original`].
    /// `args` may be empty for a call without arguments.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Lookup`] if no such hook exists ([`Error::NotFound`]
    /// with [`RegistryConfig::strict_lookup`]), or any error of
    /// [`Hook::invoke_original`], including argument validation errors.
    pub fn call_original(&self, name: &str, args: &[Value]) -> Result<Value> {
        self.lookup(name)?.invoke_original(args)
    }

    /// Returns whether the hook registered under `name` is installed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no such hook exists.
    pub fn is_installed(&self, name: &str) -> Result<bool> {
        self.entries
            .get(name)
            .map(HookEntry::is_installed)
            .ok_or_else(|| Error::NotFound(name.to_string()))
    }

    /// Returns the entry registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&HookEntry> {
        self.entries.get(name)
    }

    /// Returns `true` if a hook is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Returns the number of registered hooks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no hooks are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns an iterator over all entries, in name order.
    pub fn iter(&self) -> impl Iterator<Item = &HookEntry> {
        self.entries.values()
    }

    /// Returns an iterator over all registered names, in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Returns an iterator over the names of installed hooks, in order.
    pub fn installed(&self) -> impl Iterator<Item = &str> {
        self.entries
            .values()
            .filter(|e| e.is_installed())
            .map(HookEntry::name)
    }

    fn entry_mut(&mut self, name: &str) -> Result<&mut HookEntry> {
        self.entries
            .get_mut(name)
            .ok_or_else(|| Error::NotFound(name.to_string()))
    }

    fn lookup(&self, name: &str) -> Result<&HookEntry> {
        self.entries.get(name).ok_or_else(|| self.lookup_error(name))
    }

    fn lookup_mut(&mut self, name: &str) -> Result<&mut HookEntry> {
        let strict = self.config.strict_lookup;
        self.entries
            .get_mut(name)
            .ok_or_else(|| Self::lookup_failure(strict, name))
    }

    fn lookup_error(&self, name: &str) -> Error {
        Self::lookup_failure(self.config.strict_lookup, name)
    }

    fn lookup_failure(strict: bool, name: &str) -> Error {
        if strict {
            Error::NotFound(name.to_string())
        } else {
            Error::Lookup(format!("no entry for key '{name}'"))
        }
    }
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookRegistry")
            .field("hook_count", &self.entries.len())
            .field("installed_count", &self.installed().count())
            .field("config", &self.config)
            .finish()
    }
}
