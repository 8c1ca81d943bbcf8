use super::{validate_key, KeyValueStore, StorageError};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory store. Values are held in serialized form, so a corrupt entry can be
/// planted with [`MemoryStore::insert_raw`] and is detected on read just like a
/// damaged file.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `raw` verbatim under `key`, bypassing JSON encoding.
    pub fn insert_raw(&self, key: &str, raw: impl Into<String>) -> Result<(), StorageError> {
        validate_key(key)?;
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        entries.insert(key.to_string(), raw.into());
        Ok(())
    }

    /// Returns the serialized form stored under `key`.
    pub fn raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        validate_key(key)?;
        let Some(raw) = self.raw(key)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StorageError::Corrupt {
                key: key.to_string(),
                source,
            })
    }

    fn set(&self, key: &str, value: &Value) -> Result<(), StorageError> {
        validate_key(key)?;
        let raw = serde_json::to_string(value).map_err(|source| StorageError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.insert_raw(key, raw)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_absent_returns_none() {
        let store = MemoryStore::new();
        assert!(store.get("pm_resources").unwrap().is_none());
    }

    #[test]
    fn test_set_then_get() {
        let store = MemoryStore::new();
        store.set("pm_resources", &json!([{"name": "QA"}])).unwrap();
        assert_eq!(
            store.get("pm_resources").unwrap(),
            Some(json!([{"name": "QA"}]))
        );

        store.remove("pm_resources").unwrap();
        assert!(store.get("pm_resources").unwrap().is_none());
    }

    #[test]
    fn test_corrupt_value_is_reported() {
        let store = MemoryStore::new();
        store.insert_raw("pm_tasks", "{not json").unwrap();
        assert!(matches!(
            store.get("pm_tasks"),
            Err(StorageError::Corrupt { .. })
        ));
    }
}
