//! # hookscope Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the hookscope library. Import this module to get quick access to everything needed
//! to create, install and call through hooks.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all hookscope operations
pub use crate::Error;

/// The result type used throughout hookscope
pub use crate::Result;

// ================================================================================================
// Registry
// ================================================================================================

/// Registry, its entries and configuration
pub use crate::registry::{HookEntry, HookRegistry, HookState, RegistryConfig, SharedRegistry};

// ================================================================================================
// Hooks
// ================================================================================================

/// Hook capability and built-in strategies
pub use crate::hook::{Hook, SiteHook, SlotHook, TableHook};

// ================================================================================================
// Targets and Values
// ================================================================================================

/// Redirection points
pub use crate::target::{CallSite, Function, FunctionSlot, FunctionTable, TableEntry, Target};

/// Type-erased calling convention
pub use crate::value::{Signature, Value, ValueKind};
