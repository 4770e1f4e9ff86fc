pub mod json_backend;
pub mod memory;
pub mod persistence;

use crate::errors::Result;

/// Abstraction over durable string-blob stores addressed by a key.
pub trait KeyValueStore: Send + Sync {
    /// Returns the blob stored under `key`, or `None` when nothing is stored.
    fn get(&self, key: &str) -> Result<Option<String>>;
    /// Replaces whatever is stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

pub use json_backend::JsonFileStore;
pub use memory::MemoryStore;
pub use persistence::{LedgerPersistence, DEFAULT_STORAGE_KEY};
