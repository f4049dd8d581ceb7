//! Key-Value Storage
//!
//! Browser `localStorage` behind a small trait, with an in-memory stand-in used
//! when the browser refuses storage (private windows) and in tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::{UiError, UiResult};

pub trait KeyValueStorage {
    fn get(&self, key: &str) -> UiResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> UiResult<()>;
    fn remove(&self, key: &str) -> UiResult<()>;
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for Rc<S> {
    fn get(&self, key: &str) -> UiResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> UiResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> UiResult<()> {
        (**self).remove(key)
    }
}

/// `window.localStorage`
pub struct LocalStorage {
    inner: web_sys::Storage,
}

impl LocalStorage {
    pub fn open() -> UiResult<Self> {
        let win = web_sys::window().ok_or_else(|| UiError::Storage("no window".into()))?;
        let inner = win
            .local_storage()
            .map_err(|e| UiError::Storage(format!("{:?}", e)))?
            .ok_or_else(|| UiError::Storage("localStorage unavailable".into()))?;
        Ok(Self { inner })
    }
}

impl KeyValueStorage for LocalStorage {
    fn get(&self, key: &str) -> UiResult<Option<String>> {
        self.inner.get_item(key).map_err(|e| UiError::Storage(format!("{:?}", e)))
    }

    fn set(&self, key: &str, value: &str) -> UiResult<()> {
        self.inner.set_item(key, value).map_err(|e| UiError::Storage(format!("{:?}", e)))
    }

    fn remove(&self, key: &str) -> UiResult<()> {
        self.inner.remove_item(key).map_err(|e| UiError::Storage(format!("{:?}", e)))
    }
}

#[derive(Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> UiResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> UiResult<()> {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> UiResult<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Local storage when the browser allows it, memory otherwise
pub fn browser_storage() -> Rc<dyn KeyValueStorage> {
    match LocalStorage::open() {
        Ok(storage) => Rc::new(storage),
        Err(e) => {
            log::warn!("[STORAGE] falling back to memory: {}", e);
            Rc::new(MemoryStorage::new())
        }
    }
}
