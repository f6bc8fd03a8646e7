//! Key-value storage primitive backing the note store.

mod file;
mod memory;

pub use file::FileBackend;
pub use memory::MemoryBackend;

use crate::error::Result;

/// Key under which the serialized note snapshot is stored.
pub const NOTES_KEY: &str = "notes";

/// Key under which the selection pointer is stored. Removed when nothing
/// is selected.
pub const SELECTION_KEY: &str = "selection";

/// Local-storage-style key-value backend. The note store is the only
/// component that reads or writes through it.
pub trait Backend {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove `key` if present. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;
}
