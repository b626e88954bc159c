//! Hooks that redirect a [`CallSite`].

use std::fmt;

use tracing::{debug, warn};

use crate::{
    hook::Hook,
    target::{CallSite, Function, FunctionSlot, TableEntry},
    value::Value,
    Error, Result,
};

/// Hook on an indirect call slot.
pub type SlotHook = SiteHook<FunctionSlot>;

/// Hook on one entry of a function table.
pub type TableHook = SiteHook<TableEntry>;

/// A hook that redirects a [`CallSite`] to a replacement function.
///
/// Installing swaps the site to the replacement and keeps whatever the site
/// held before as the original. Because the original is captured at install
/// time, several hooks can be stacked on the same site; each one's original is
/// the hook (or function) below it.
///
/// Uninstalling restores the original only if the site still holds this hook's
/// replacement. If another hook was installed on top in the meantime the
/// uninstall is refused and the hook stays installed, so a stack of hooks must
/// be unwound in reverse install order.
///
/// Installing an installed hook, or uninstalling an uninstalled one, succeeds
/// without touching the site.
///
/// # Examples
///
/// ```rust
/// use hookscope::{
///     hook::{Hook, SlotHook},
///     target::{Function, FunctionSlot},
///     value::{Signature, Value, ValueKind},
/// };
///
/// let sig = Signature::new(vec![], ValueKind::I32);
/// let slot = FunctionSlot::new(Function::new("answer", sig.clone(), |_| Ok(Value::I32(42))));
/// let mut hook = SlotHook::new(slot.clone(), Function::new("lie", sig, |_| Ok(Value::I32(0))))?;
///
/// assert!(hook.try_install());
/// assert_eq!(slot.call(&[])?, Value::I32(0));
/// assert_eq!(hook.invoke_original(&[])?, Value::I32(42));
///
/// assert!(hook.try_uninstall());
/// assert_eq!(slot.call(&[])?, Value::I32(42));
/// # Ok::<(), hookscope::Error>(())
/// ```
pub struct SiteHook<S: CallSite> {
    site: S,
    replacement: Function,
    original: Option<Function>,
}

impl<S: CallSite> SiteHook<S> {
    /// Creates an uninstalled hook redirecting `site` to `replacement`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SignatureMismatch`] if `replacement` does not have the
    /// site's signature.
    pub fn new(site: S, replacement: Function) -> Result<Self> {
        let expected = site.signature();
        if replacement.signature() != &expected {
            return Err(Error::SignatureMismatch {
                expected,
                found: replacement.signature().clone(),
            });
        }

        Ok(Self {
            site,
            replacement,
            original: None,
        })
    }

    /// Returns the redirected site.
    #[must_use]
    pub fn site(&self) -> &S {
        &self.site
    }

    /// Returns the replacement function.
    #[must_use]
    pub fn replacement(&self) -> &Function {
        &self.replacement
    }

    /// Returns the function that was displaced by the last install, while
    /// installed.
    #[must_use]
    pub fn original(&self) -> Option<&Function> {
        self.original.as_ref()
    }
}

impl<S: CallSite> Hook for SiteHook<S> {
    fn try_install(&mut self) -> bool {
        if self.original.is_some() {
            return true;
        }

        match self.site.swap(self.replacement.clone()) {
            Ok(previous) => {
                debug!(
                    site = %self.site.describe(),
                    original = previous.name(),
                    replacement = self.replacement.name(),
                    "site redirected"
                );
                self.original = Some(previous);
                true
            }
            Err(error) => {
                warn!(site = %self.site.describe(), %error, "failed to redirect site");
                false
            }
        }
    }

    fn try_uninstall(&mut self) -> bool {
        let Some(original) = self.original.clone() else {
            return true;
        };

        match self.site.compare_exchange(&self.replacement, original) {
            Ok(true) => {
                debug!(site = %self.site.describe(), "site restored");
                self.original = None;
                true
            }
            Ok(false) => {
                warn!(
                    site = %self.site.describe(),
                    replacement = self.replacement.name(),
                    "site no longer holds this replacement, refusing to restore"
                );
                false
            }
            Err(error) => {
                warn!(site = %self.site.describe(), %error, "failed to restore site");
                false
            }
        }
    }

    fn is_installed(&self) -> bool {
        self.original.is_some()
    }

    fn invoke_original(&self, args: &[Value]) -> Result<Value> {
        match &self.original {
            Some(original) => original.call(args),
            None => self.site.load()?.call(args),
        }
    }
}

impl<S: CallSite> fmt::Debug for SiteHook<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SiteHook")
            .field("site", &self.site.describe())
            .field("replacement", &self.replacement.name())
            .field("installed", &self.original.is_some())
            .finish()
    }
}
