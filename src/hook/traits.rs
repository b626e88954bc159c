//! The hook capability contract.

use crate::{value::Value, Result};

/// One target-to-replacement binding.
///
/// `Hook` is the capability the registry drives. Implementations decide how a
/// redirection is activated (swapping a slot, patching a table entry, writing a
/// jump) and how the original behavior is reached while it is active. The
/// registry only relies on the four operations below.
///
/// # Contract
///
/// - [`try_install`](Hook::try_install) returns `true` iff the redirection is
///   active afterwards. On `false` the hook must be left uninstalled.
/// - [`try_uninstall`](Hook::try_uninstall) returns `true` iff the redirection
///   is inactive afterwards. On `false` the hook must be left installed.
/// - [`is_installed`](Hook::is_installed) reports the current state.
/// - [`invoke_original`](Hook::invoke_original) runs the target's behavior
///   regardless of whether the redirection is active.
///
/// # Examples
///
/// ```rust
/// use hookscope::{Hook, HookRegistry, Result, value::Value};
///
/// struct Flag {
///     on: bool,
/// }
///
/// impl Hook for Flag {
///     fn try_install(&mut self) -> bool {
///         self.on = true;
///         true
///     }
///
///     fn try_uninstall(&mut self) -> bool {
///         self.on = false;
///         true
///     }
///
///     fn is_installed(&self) -> bool {
///         self.on
///     }
///
///     fn invoke_original(&self, _args: &[Value]) -> Result<Value> {
///         Ok(Value::Void)
///     }
/// }
///
/// let mut registry = HookRegistry::new();
/// registry.add_hook("flag", Flag { on: false })?;
/// registry.install("flag")?;
/// assert!(registry.is_installed("flag")?);
/// # Ok::<(), hookscope::Error>(())
/// ```
pub trait Hook: Send {
    /// Attempts to activate the redirection.
    fn try_install(&mut self) -> bool;

    /// Attempts to deactivate the redirection.
    fn try_uninstall(&mut self) -> bool;

    /// Returns `true` while the redirection is active.
    fn is_installed(&self) -> bool;

    /// Invokes the original target with `args`.
    ///
    /// While installed this is the behavior the redirection displaced. While
    /// uninstalled the built-in strategies call whatever the site currently
    /// dispatches to, which is another hook's replacement if one is installed
    /// on the same site.
    ///
    /// # Errors
    ///
    /// Returns any error produced while validating `args` or running the
    /// original.
    fn invoke_original(&self, args: &[Value]) -> Result<Value>;
}

impl<H: Hook + ?Sized> Hook for Box<H> {
    fn try_install(&mut self) -> bool {
        (**self).try_install()
    }

    fn try_uninstall(&mut self) -> bool {
        (**self).try_uninstall()
    }

    fn is_installed(&self) -> bool {
        (**self).is_installed()
    }

    fn invoke_original(&self, args: &[Value]) -> Result<Value> {
        (**self).invoke_original(args)
    }
}
