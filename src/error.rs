use thiserror::Error;

use crate::value::{Signature, ValueKind};

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Registry lookups, hook transitions and the argument checks performed at a
/// [`crate::target::Function`] call boundary all report through this enum. Each
/// variant carries enough context to tell the caller which hook or argument was
/// at fault.
///
/// # Error Categories
///
/// ## Registry Errors
/// - [`Error::NotFound`] - No hook is registered under the given name
/// - [`Error::DuplicateName`] - A hook with the same name is already registered
/// - [`Error::Lookup`] - Unstructured lookup failure of `remove` / `call_original`
///
/// ## Hook Transition Errors
/// - [`Error::InstallFailed`] - The hook refused to activate its redirection
/// - [`Error::UninstallFailed`] - The hook refused to deactivate its redirection
///
/// ## Invocation Errors
/// - [`Error::ArgumentCount`] - Wrong number of arguments for the signature
/// - [`Error::ArgumentType`] - An argument does not match its declared kind
/// - [`Error::ReturnType`] - A function body returned a value of the wrong kind
/// - [`Error::SignatureMismatch`] - Target and replacement disagree on their signature
/// - [`Error::InvalidTarget`] - The redirection point could not be resolved
///
/// ## Miscellaneous
/// - [`Error::LockError`] - Thread synchronization failure
/// - [`Error::Error`] - Failure reported by a function body
///
/// # Examples
///
/// ```rust
/// use hookscope::{Error, HookRegistry};
///
/// let mut registry = HookRegistry::new();
/// match registry.install("missing") {
///     Err(Error::NotFound(name)) => assert_eq!(name, "missing"),
///     other => panic!("unexpected result: {other:?}"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    // Registry Errors
    /// No hook is registered under the given name.
    ///
    /// Raised by `install`, `uninstall` and `is_installed`. With
    /// [`crate::RegistryConfig::strict_lookup`] enabled, `remove` and
    /// `call_original` raise it as well.
    #[error("No hook registered under the name '{0}'")]
    NotFound(String),

    /// A hook with this name is already registered.
    ///
    /// The existing entry is left untouched.
    #[error("A hook named '{0}' is already registered")]
    DuplicateName(String),

    /// Unstructured lookup failure.
    ///
    /// `remove` and `call_original` report an absent name with this variant
    /// instead of [`Error::NotFound`] unless strict lookup is configured.
    #[error("Lookup failed - {0}")]
    Lookup(String),

    // Hook Transition Errors
    /// The hook reported a failed activation.
    ///
    /// The entry stays uninstalled. Bulk installs stop at the first entry
    /// producing this error; the associated name identifies that entry.
    #[error("Failed to install hook '{0}'")]
    InstallFailed(String),

    /// The hook reported a failed deactivation.
    ///
    /// The entry stays installed. Bulk uninstalls stop at the first entry
    /// producing this error; the associated name identifies that entry.
    #[error("Failed to uninstall hook '{0}'")]
    UninstallFailed(String),

    // Invocation Errors
    /// The number of arguments does not match the signature.
    #[error("Expected {expected} arguments, got {found}")]
    ArgumentCount {
        /// Number of parameters declared by the signature
        expected: usize,
        /// Number of arguments supplied
        found: usize,
    },

    /// An argument's kind does not match the declared parameter kind.
    #[error("Argument {index} has kind {found}, expected {expected}")]
    ArgumentType {
        /// Zero-based position of the offending argument
        index: usize,
        /// Declared parameter kind
        expected: ValueKind,
        /// Kind of the supplied value
        found: ValueKind,
    },

    /// A function body returned a value of the wrong kind.
    #[error("Returned value has kind {found}, expected {expected}")]
    ReturnType {
        /// Declared return kind
        expected: ValueKind,
        /// Kind of the returned value
        found: ValueKind,
    },

    /// Two functions that must be interchangeable have different signatures.
    ///
    /// Occurs when a replacement does not match its target, or when a function
    /// of a different shape is stored into a slot or table entry.
    #[error("Signature mismatch - expected {expected}, found {found}")]
    SignatureMismatch {
        /// Signature of the redirection point
        expected: Signature,
        /// Signature of the offered function
        found: Signature,
    },

    /// The redirection point could not be resolved.
    #[error("Invalid hook target - {0}")]
    InvalidTarget(String),

    // Miscellaneous
    /// Failed to lock target.
    ///
    /// This error occurs when thread synchronization fails, typically
    /// when a lock was poisoned by a panicking function body.
    #[error("Failed to lock target")]
    LockError,

    /// Generic error for miscellaneous failures.
    ///
    /// Function bodies use this to report their own failures.
    #[error("{0}")]
    Error(String),
}
