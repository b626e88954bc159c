//! Redirection points that hooks can patch.
//!
//! A hook needs somewhere to write its replacement. This module provides the
//! in-process redirection points supported out of the box:
//!
//! - [`FunctionSlot`] - an indirect call cell, the analogue of a function pointer or GOT entry
//! - [`FunctionTable`] / [`TableEntry`] - an indexed table, the analogue of a vtable
//!
//! Both implement [`CallSite`], the minimal load / swap / compare-exchange
//! contract that [`crate::hook::SiteHook`] is written against. A [`Target`]
//! names one redirection point and decides, at hook creation time, which
//! strategy is used to hook it.
//!
//! # Examples
//!
//! ```rust
//! use hookscope::{target::{Function, FunctionSlot, Target}, value::{Signature, Value}};
//!
//! let slot = FunctionSlot::new(Function::new("tick", Signature::void(), |_| Ok(Value::Void)));
//! let target: Target = slot.clone().into();
//! assert!(matches!(target, Target::Slot(_)));
//! ```

mod function;
mod slot;
mod table;

pub use function::{Function, FunctionBody};
pub use slot::FunctionSlot;
pub use table::{FunctionTable, TableEntry};

use crate::{
    hook::{Hook, SlotHook, TableHook},
    value::Signature,
    Result,
};

/// A location that dispatches calls to a swappable [`Function`].
///
/// Implementations must make [`CallSite::swap`] and
/// [`CallSite::compare_exchange`] atomic with respect to each other, and must
/// reject functions whose signature differs from [`CallSite::signature`].
pub trait CallSite: Send {
    /// Signature every function stored in this site must have.
    fn signature(&self) -> Signature;

    /// Returns the function currently stored in the site.
    ///
    /// # Errors
    ///
    /// Returns an error if the site cannot be read.
    fn load(&self) -> Result<Function>;

    /// Stores `function` and returns the previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the signature differs or the site cannot be written.
    fn swap(&self, function: Function) -> Result<Function>;

    /// Stores `new` only if the site still holds `expected`.
    ///
    /// Returns whether the exchange happened.
    ///
    /// # Errors
    ///
    /// Returns an error if the signature differs or the site cannot be written.
    fn compare_exchange(&self, expected: &Function, new: Function) -> Result<bool>;

    /// Human-readable description used in log events.
    fn describe(&self) -> String;
}

/// The original callable a hook redirects.
///
/// The variant selects the hook strategy when the hook is created by
/// [`crate::HookRegistry::add`].
#[derive(Clone, Debug)]
pub enum Target {
    /// Redirect an indirect call slot, hooked with a [`SlotHook`].
    Slot(FunctionSlot),
    /// Redirect one entry of a function table, hooked with a [`TableHook`].
    ///
    /// The index is validated when the hook is created.
    Table {
        /// Table holding the entry
        table: FunctionTable,
        /// Index of the entry within the table
        index: usize,
    },
}

impl Target {
    /// Creates the hook strategy matching this target.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidTarget`] for an out of range table index,
    /// or [`crate::Error::SignatureMismatch`] if `replacement` does not have the
    /// target's signature.
    pub fn into_hook(self, replacement: Function) -> Result<Box<dyn Hook>> {
        match self {
            Target::Slot(slot) => Ok(Box::new(SlotHook::new(slot, replacement)?)),
            Target::Table { table, index } => {
                let entry = table.entry(index)?;
                Ok(Box::new(TableHook::new(entry, replacement)?))
            }
        }
    }

    /// Human-readable description of the target.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Target::Slot(slot) => CallSite::describe(slot),
            Target::Table { table, index } => {
                format!("entry {} of table '{}'", index, table.name())
            }
        }
    }
}

impl From<FunctionSlot> for Target {
    fn from(slot: FunctionSlot) -> Self {
        Target::Slot(slot)
    }
}

impl From<TableEntry> for Target {
    fn from(entry: TableEntry) -> Self {
        Target::Table {
            table: entry.table().clone(),
            index: entry.index(),
        }
    }
}
