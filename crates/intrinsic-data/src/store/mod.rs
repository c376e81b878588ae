//! Storage backends implementing the source and sink traits.

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::{SqliteStore, StoreStats};
