//! Registry entries and their lifecycle state.

use std::fmt;

use tracing::{debug, warn};

use crate::{hook::Hook, value::Value, Error, Result};

/// Lifecycle state of a registered hook, as recorded by the registry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum HookState {
    /// The redirection is not active. Every hook starts here.
    #[default]
    Uninstalled,
    /// The redirection is active.
    Installed,
}

/// A named hook owned by a [`crate::HookRegistry`].
///
/// The entry's [`HookState`] changes only through successful install and
/// uninstall attempts made by the registry.
pub struct HookEntry {
    name: String,
    hook: Box<dyn Hook>,
    state: HookState,
}

impl HookEntry {
    pub(crate) fn new(name: String, hook: Box<dyn Hook>) -> Self {
        Self {
            name,
            hook,
            state: HookState::Uninstalled,
        }
    }

    /// Returns the name the hook is registered under.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the recorded lifecycle state.
    #[must_use]
    pub fn state(&self) -> HookState {
        self.state
    }

    /// Returns `true` if the recorded state is [`HookState::Installed`].
    #[must_use]
    pub fn is_installed(&self) -> bool {
        self.state == HookState::Installed
    }

    /// Returns the underlying hook.
    #[must_use]
    pub fn hook(&self) -> &dyn Hook {
        self.hook.as_ref()
    }

    pub(crate) fn install(&mut self) -> Result<()> {
        if self.is_installed() {
            return Ok(());
        }

        if !self.hook.try_install() {
            warn!(hook = %self.name, "hook failed to install");
            return Err(Error::InstallFailed(self.name.clone()));
        }

        self.state = HookState::Installed;
        if !self.hook.is_installed() {
            warn!(hook = %self.name, "hook reports uninstalled after a successful install");
        }
        debug!(hook = %self.name, "hook installed");
        Ok(())
    }

    pub(crate) fn uninstall(&mut self) -> Result<()> {
        if !self.is_installed() {
            return Ok(());
        }

        if !self.hook.try_uninstall() {
            warn!(hook = %self.name, "hook failed to uninstall");
            return Err(Error::UninstallFailed(self.name.clone()));
        }

        self.state = HookState::Uninstalled;
        if self.hook.is_installed() {
            warn!(hook = %self.name, "hook reports installed after a successful uninstall");
        }
        debug!(hook = %self.name, "hook uninstalled");
        Ok(())
    }

    pub(crate) fn invoke_original(&self, args: &[Value]) -> Result<Value> {
        self.hook.invoke_original(args)
    }
}

impl fmt::Debug for HookEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookEntry")
            .field("name", &self.name)
            .field("state", &self.state)
            .finish()
    }
}
