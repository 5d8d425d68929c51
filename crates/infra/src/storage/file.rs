use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{KeyValueStorage, StorageError};

/// Directory-backed storage: one `<key>.json` file per slot.
///
/// Writes go to a sibling temporary file which is then renamed over the slot, so a
/// crash mid-write leaves the previous contents intact.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open (creating if needed) a storage directory.
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

    fn slot_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.slot_path(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.slot_path(key)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(|source| StorageError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &path).map_err(|source| StorageError::Io { path, source })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.slot_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn round_trips_through_disk() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::open(dir.path().join("data")).unwrap();

        assert_eq!(storage.get("ims_inventory").unwrap(), None);
        storage.set("ims_inventory", "[1,2]").unwrap();
        assert_eq!(storage.get("ims_inventory").unwrap().as_deref(), Some("[1,2]"));
        assert!(storage.dir().join("ims_inventory.json").exists());
        assert!(!storage.dir().join("ims_inventory.json.tmp").exists());

        storage.remove("ims_inventory").unwrap();
        storage.remove("ims_inventory").unwrap();
        assert_eq!(storage.get("ims_inventory").unwrap(), None);
    }

    #[test]
    fn survives_reopen() {
        let dir = tempdir().unwrap();
        FileStorage::open(dir.path()).unwrap().set("slot", "kept").unwrap();
        let reopened = FileStorage::open(dir.path()).unwrap();
        assert_eq!(reopened.get("slot").unwrap().as_deref(), Some("kept"));
    }

    #[test]
    fn rejects_path_like_keys() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();
        for key in ["", "../escape", ".hidden", "a/b"] {
            assert!(matches!(storage.get(key), Err(StorageError::InvalidKey(_))), "key {key:?}");
        }
    }
}
