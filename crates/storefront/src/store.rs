//! Local key-value storage for session state.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use thiserror::Error;

use marketplace_core::DomainError;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to serialize value for {key}: {message}")]
    Serialize { key: String, message: String },

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// String key/value storage (the browser-storage boundary).
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: String) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

impl<S> KeyValueStore for Arc<S>
where
    S: KeyValueStore + ?Sized,
{
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

/// In-memory store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: RwLock<HashMap<String, String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        let map = self.inner.read().ok()?;
        map.get(key).cloned()
    }

    fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;
        map.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;
        map.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let store = InMemoryStore::new();
        assert_eq!(store.get("k"), None);

        store.set("k", "v".to_string()).unwrap();
        assert_eq!(store.get("k").as_deref(), Some("v"));

        store.remove("k").unwrap();
        assert_eq!(store.get("k"), None);
    }

    #[test]
    fn arc_store_shares_state() {
        let store = Arc::new(InMemoryStore::new());
        let other = Arc::clone(&store);

        store.set("k", "v".to_string()).unwrap();
        assert_eq!(other.get("k").as_deref(), Some("v"));
    }
}
