//! Registry configuration.
//!
//! [`RegistryConfig`] controls the two behaviors of the registry whose
//! historical semantics are questionable:
//!
//! - how `remove` and `call_original` report an unknown name
//! - whether `clear` uninstalls hooks before forgetting them
//!
//! The default keeps the historical behavior. [`RegistryConfig::strict()`]
//! switches both to the safer alternative.
//!
//! # Example
//!
//! ```rust
//! use hookscope::{HookRegistry, RegistryConfig};
//!
//! let registry = HookRegistry::with_config(RegistryConfig::strict());
//! assert!(registry.config().strict_lookup);
//!
//! let config = RegistryConfig::default().with_uninstall_on_clear(true);
//! assert!(!config.strict_lookup);
//! ```

/// Behavioral switches for a [`crate::HookRegistry`].
///
/// # Presets
///
/// | Preset | `strict_lookup` | `uninstall_on_clear` |
/// |--------|-----------------|----------------------|
/// | [`compatible()`](Self::compatible) (default) | `false` | `false` |
/// | [`strict()`](Self::strict) | `true` | `true` |
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Report unknown names in `remove` and `call_original` as
    /// [`crate::Error::NotFound`].
    ///
    /// When `false`, those two operations report an unknown name with the
    /// unstructured [`crate::Error::Lookup`] instead, while `install` and
    /// `uninstall` always use `NotFound`.
    pub strict_lookup: bool,

    /// Attempt to uninstall every installed hook before `clear` drops it.
    ///
    /// When `false`, `clear` forgets installed hooks without deactivating
    /// them, leaving their redirections active. Uninstall failures during
    /// clearing are logged and the entry is dropped regardless.
    pub uninstall_on_clear: bool,
}

impl RegistryConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Historical semantics: lookup divergence kept, `clear` does not uninstall.
    #[must_use]
    pub fn compatible() -> Self {
        Self::default()
    }

    /// Unified `NotFound` lookups and uninstall-on-clear.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            strict_lookup: true,
            uninstall_on_clear: true,
        }
    }

    /// Sets [`strict_lookup`](Self::strict_lookup).
    #[must_use]
    pub fn with_strict_lookup(mut self, enabled: bool) -> Self {
        self.strict_lookup = enabled;
        self
    }

    /// Sets [`uninstall_on_clear`](Self::uninstall_on_clear).
    #[must_use]
    pub fn with_uninstall_on_clear(mut self, enabled: bool) -> Self {
        self.uninstall_on_clear = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        assert_eq!(RegistryConfig::compatible(), RegistryConfig::default());
        assert_eq!(
            RegistryConfig::strict(),
            RegistryConfig::new()
                .with_strict_lookup(true)
                .with_uninstall_on_clear(true)
        );
    }
}
