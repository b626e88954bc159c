//! Function tables and their entries.

use std::{fmt, sync::Arc};

use crate::{
    target::{CallSite, Function, FunctionSlot},
    value::{Signature, Value},
    Error, Result,
};

/// A fixed-length, shared table of functions.
///
/// `FunctionTable` models a virtual-method table or an import table: callers
/// dispatch through an index, and a [`crate::hook::TableHook`] redirects a
/// single index by swapping that entry. Each entry keeps the signature of the
/// function it was created with.
///
/// # Examples
///
/// ```rust
/// use hookscope::{target::{Function, FunctionTable}, value::{Signature, Value}};
///
/// let table = FunctionTable::new("vtable", vec![
///     Function::new("first", Signature::void(), |_| Ok(Value::Void)),
///     Function::new("second", Signature::void(), |_| Ok(Value::Void)),
/// ]);
///
/// assert_eq!(table.len(), 2);
/// assert_eq!(table.get(1)?.name(), "second");
/// assert!(table.entry(2).is_err());
/// # Ok::<(), hookscope::Error>(())
/// ```
#[derive(Clone)]
pub struct FunctionTable {
    name: Arc<str>,
    slots: Arc<[FunctionSlot]>,
}

impl FunctionTable {
    /// Creates a table from its initial functions.
    #[must_use]
    pub fn new(name: impl Into<String>, functions: Vec<Function>) -> Self {
        let slots: Vec<FunctionSlot> = functions.into_iter().map(FunctionSlot::new).collect();
        Self {
            name: Arc::from(name.into()),
            slots: slots.into(),
        }
    }

    /// Returns the table's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns the function currently stored at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTarget`] if `index` is out of range, or
    /// [`Error::LockError`] on a poisoned lock.
    pub fn get(&self, index: usize) -> Result<Function> {
        self.slot(index)?.load()
    }

    /// Calls the function currently stored at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTarget`] if `index` is out of range, or any
    /// error of [`FunctionSlot::call`].
    pub fn call(&self, index: usize, args: &[Value]) -> Result<Value> {
        self.slot(index)?.call(args)
    }

    /// Resolves `index` into a hookable [`TableEntry`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTarget`] if `index` is out of range.
    pub fn entry(&self, index: usize) -> Result<TableEntry> {
        self.slot(index)?;
        Ok(TableEntry {
            table: self.clone(),
            index,
        })
    }

    fn slot(&self, index: usize) -> Result<&FunctionSlot> {
        self.slots.get(index).ok_or_else(|| {
            Error::InvalidTarget(format!(
                "index {} out of range for table '{}' with {} entries",
                index,
                self.name,
                self.slots.len()
            ))
        })
    }
}

impl fmt::Debug for FunctionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionTable")
            .field("name", &self.name)
            .field("len", &self.slots.len())
            .finish()
    }
}

/// One resolved entry of a [`FunctionTable`].
///
/// Obtained from [`FunctionTable::entry`], which guarantees the index is in
/// range.
#[derive(Clone, Debug)]
pub struct TableEntry {
    table: FunctionTable,
    index: usize,
}

impl TableEntry {
    /// Returns the table this entry belongs to.
    #[must_use]
    pub fn table(&self) -> &FunctionTable {
        &self.table
    }

    /// Returns the entry's index within its table.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    fn slot(&self) -> &FunctionSlot {
        // In range by construction, see FunctionTable::entry
        &self.table.slots[self.index]
    }
}

impl CallSite for TableEntry {
    fn signature(&self) -> Signature {
        self.slot().signature().clone()
    }

    fn load(&self) -> Result<Function> {
        self.slot().load()
    }

    fn swap(&self, function: Function) -> Result<Function> {
        self.slot().swap(function)
    }

    fn compare_exchange(&self, expected: &Function, new: Function) -> Result<bool> {
        self.slot().compare_exchange(expected, new)
    }

    fn describe(&self) -> String {
        format!("entry {} of table '{}'", self.index, self.table.name)
    }
}
