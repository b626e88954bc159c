//! Hook capability and the built-in hook strategies.
//!
//! A hook is one binding between a target and a replacement. The registry
//! never patches anything itself; it drives hooks through the [`Hook`] trait:
//!
//! - **install** - activate the redirection so calls reach the replacement
//! - **uninstall** - deactivate it so calls reach the target again
//! - **is_installed** - query the current state
//! - **invoke_original** - run the target's behavior even while redirected
//!
//! # Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | `traits` | The [`Hook`] capability trait |
//! | `site` | [`SiteHook`], the strategy for any [`crate::target::CallSite`] |
//!
//! # Strategies
//!
//! The strategy is picked from the [`crate::target::Target`] when the hook is
//! created:
//!
//! | Target | Strategy | Redirection |
//! |--------|----------|-------------|
//! | [`crate::target::Target::Slot`] | [`SlotHook`] | swap the slot's function |
//! | [`crate::target::Target::Table`] | [`TableHook`] | swap one table entry |
//!
//! Other techniques (inline detours, import table patching, ...) plug in by
//! implementing [`Hook`] and registering with [`crate::HookRegistry::add_hook`].
//!
//! # Lifecycle
//!
//! ```text
//!  create ──► Uninstalled ──try_install──► Installed
//!                  ▲                           │
//!                  └──────try_uninstall────────┘
//! ```

mod site;
mod traits;

pub use site::{SiteHook, SlotHook, TableHook};
pub use traits::Hook;
