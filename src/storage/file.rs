use super::{validate_key, KeyValueStore, StorageError};
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Directory-backed store: the value for `key` lives in `<dir>/<key>.json`.
///
/// Writes go to a sibling temp file first and are then renamed over the target,
/// so a crash mid-write leaves the previous value intact.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens (and creates if needed) the data directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StorageError::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        validate_key(key)?;
        let path = self.path_for(key);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(StorageError::Io { path, source }),
        };
        debug!(path = %path.display(), "Loaded");
        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|source| StorageError::Corrupt {
                key: key.to_string(),
                source,
            })
    }

    fn set(&self, key: &str, value: &Value) -> Result<(), StorageError> {
        validate_key(key)?;
        let path = self.path_for(key);
        let mut contents =
            serde_json::to_string_pretty(value).map_err(|source| StorageError::Encode {
                key: key.to_string(),
                source,
            })?;
        contents.push('\n');

        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, contents).map_err(|source| StorageError::Io {
            path: tmp_path.clone(),
            source,
        })?;
        fs::rename(&tmp_path, &path).map_err(|source| StorageError::Io {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), "Saved");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_round_trip_through_disk() {
        let temp = tempfile::tempdir().expect("tempdir");
        let store = FileStore::open(temp.path().join("data")).unwrap();

        assert!(store.get("pm_projects").unwrap().is_none());
        store.set("pm_projects", &json!([1, 2, 3])).unwrap();
        assert!(temp.path().join("data/pm_projects.json").exists());
        assert!(!temp.path().join("data/pm_projects.json.tmp").exists());

        let reopened = FileStore::open(temp.path().join("data")).unwrap();
        assert_eq!(reopened.get("pm_projects").unwrap(), Some(json!([1, 2, 3])));
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let temp = tempfile::tempdir().expect("tempdir");
        let store = FileStore::open(temp.path()).unwrap();
        fs::write(temp.path().join("pm_tasks.json"), "[{").unwrap();

        assert!(matches!(
            store.get("pm_tasks"),
            Err(StorageError::Corrupt { .. })
        ));
    }

    #[test]
    fn test_remove_missing_is_ok() {
        let temp = tempfile::tempdir().expect("tempdir");
        let store = FileStore::open(temp.path()).unwrap();
        store.remove("pm_resources").unwrap();
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let temp = tempfile::tempdir().expect("tempdir");
        let store = FileStore::open(temp.path()).unwrap();
        assert!(matches!(
            store.set("../x", &json!(null)),
            Err(StorageError::InvalidKey(_))
        ));
    }
}
