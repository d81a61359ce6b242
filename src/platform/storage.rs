//! Browser LocalStorage backend

use crate::error::Result;
use crate::persistence::KvStore;

/// `window.localStorage`, when the browser allows it
///
/// Private browsing modes can deny storage; reads then return nothing and
/// writes are dropped with a warning.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    storage: Option<web_sys::Storage>,
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalStorage {
    pub fn new() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        if storage.is_none() {
            log::warn!("LocalStorage unavailable - scores will not persist");
        }
        Self { storage }
    }
}

impl KvStore for LocalStorage {
    fn read(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        if let Some(storage) = &self.storage {
            if storage.set_item(key, value).is_err() {
                log::warn!("LocalStorage rejected write to {}", key);
            }
        }
        Ok(())
    }
}
