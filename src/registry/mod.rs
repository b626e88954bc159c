//! Named hook registry.
//!
//! The registry maps unique names to [`crate::Hook`] instances and sequences
//! their lifecycle. It is the only component callers interact with once hooks
//! are created.
//!
//! # Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | `manager` | [`HookRegistry`], the single-owner registry |
//! | `entry` | [`HookEntry`] and its [`HookState`] |
//! | `config` | [`RegistryConfig`] behavioral switches |
//! | `shared` | [`SharedRegistry`], a lock-guarded handle for multi-threaded use |
//!
//! # Operations
//!
//! | Operation | Errors |
//! |-----------|--------|
//! | [`HookRegistry::add`] / [`HookRegistry::add_hook`] | `DuplicateName` |
//! | [`HookRegistry::install`] | `NotFound`, `InstallFailed` |
//! | [`HookRegistry::install_all`] | `InstallFailed` (fail-fast) |
//! | [`HookRegistry::uninstall`] | `NotFound`, `UninstallFailed` |
//! | [`HookRegistry::uninstall_all`] | `UninstallFailed` (fail-fast) |
//! | [`HookRegistry::remove`] | `UninstallFailed`, `Lookup` |
//! | [`HookRegistry::clear`] | never fails |
//! | [`HookRegistry::call_original`] | `Lookup`, invocation errors |
//!
//! With [`RegistryConfig::strict_lookup`], `remove` and `call_original` report
//! `NotFound` instead of `Lookup`.
//!
//! # Entry Lifecycle
//!
//! ```text
//!   add ──► Uninstalled ◄──uninstall──┐
//!               │                      │
//!               └──────install────► Installed
//!               │
//!   remove ◄────┘  (an installed entry is uninstalled first)
//! ```

mod config;
mod entry;
mod manager;
mod shared;

pub use config::RegistryConfig;
pub use entry::{HookEntry, HookState};
pub use manager::HookRegistry;
pub use shared::SharedRegistry;
