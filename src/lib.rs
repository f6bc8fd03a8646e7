pub mod config;
pub mod entity;
pub mod error;
pub mod search;
pub mod snapshot;
pub mod storage;
pub mod store;

pub use entity::{Note, NotePatch};
pub use error::{JotpadError, Result};
pub use storage::{Backend, FileBackend, MemoryBackend};
pub use store::{Clock, NoteStore, SystemClock};
