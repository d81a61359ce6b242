//! Key-value persistence for leaderboard and settings
//!
//! Values are JSON strings stored under fixed keys. Backends:
//! - [`MemoryStore`]: in-process map (tests, or when nothing else is available)
//! - [`FileStore`]: one file per key in a data directory (native)
//! - `platform::storage::LocalStorage`: browser LocalStorage (wasm32)

use std::collections::HashMap;

use crate::error::Result;

#[cfg(not(target_arch = "wasm32"))]
mod file;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;

/// Minimal blob store the game persists through
pub trait KvStore {
    /// Read the value stored under `key`, if any
    ///
    /// Backends treat unreadable data as absent and log the failure.
    fn read(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value
    fn write(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl KvStore for MemoryStore {
    fn read(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<S: KvStore + ?Sized> KvStore for Box<S> {
    fn read(&self, key: &str) -> Option<String> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).write(key, value)
    }
}
