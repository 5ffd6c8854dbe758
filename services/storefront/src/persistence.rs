//! Persistence boundary between the stores and client-local storage

use std::marker::PhantomData;
use std::sync::Arc;

use common::{error::StorageResult, storage::LocalStorage};
use serde::{Serialize, de::DeserializeOwned};
use tracing::warn;

/// A single JSON value stored under a fixed key
pub struct Persisted<T> {
    storage: Arc<dyn LocalStorage>,
    key: &'static str,
    _value: PhantomData<fn() -> T>,
}

impl<T> Persisted<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(storage: Arc<dyn LocalStorage>, key: &'static str) -> Self {
        Self {
            storage,
            key,
            _value: PhantomData,
        }
    }

    /// Load the stored value.
    ///
    /// A value that no longer decodes is logged and treated as absent, so a
    /// corrupt entry never prevents a store from starting.
    pub fn load(&self) -> StorageResult<Option<T>> {
        let Some(raw) = self.storage.get(self.key)? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!("Discarding unreadable '{}' entry: {}", self.key, e);
                Ok(None)
            }
        }
    }

    /// Replace the stored value
    pub fn save(&self, value: &T) -> StorageResult<()> {
        let raw = serde_json::to_string(value)?;
        self.storage.set(self.key, &raw)
    }

    /// Remove the stored value
    pub fn remove(&self) -> StorageResult<()> {
        self.storage.delete(self.key)
    }
}
