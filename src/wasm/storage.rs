use web_sys::Storage;

use crate::error::{Error, Result};
use crate::theme::{KeyValueStore, MemoryStore};

/// `window.localStorage`, or an in-memory map when the browser refuses access
/// (private mode, sandboxed iframes).
pub enum BrowserStore {
    Local(Storage),
    Memory(MemoryStore),
}

impl BrowserStore {
    pub fn open(window: &web_sys::Window) -> Self {
        match window.local_storage() {
            Ok(Some(storage)) => BrowserStore::Local(storage),
            _ => {
                log::warn!("localStorage unavailable, theme will not persist");
                BrowserStore::Memory(MemoryStore::new())
            }
        }
    }
}

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        match self {
            BrowserStore::Local(storage) => storage.get_item(key).ok().flatten(),
            BrowserStore::Memory(mem) => mem.get(key),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match self {
            BrowserStore::Local(storage) => storage
                .set_item(key, value)
                .map_err(|e| Error::ResourceUnavailable(format!("localStorage: {e:?}"))),
            BrowserStore::Memory(mem) => mem.set(key, value),
        }
    }
}
