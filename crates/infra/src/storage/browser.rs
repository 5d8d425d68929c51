use super::{KeyValueStorage, StorageError};

/// The browser's `window.localStorage`.
///
/// Single-tab assumption: writes from another tab are silently overwritten by the
/// next save here.
#[derive(Debug, Clone)]
pub struct BrowserStorage {
    inner: web_sys::Storage,
}

impl BrowserStorage {
    pub fn local() -> Result<Self, StorageError> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no window object".to_string()))?;
        let inner = window
            .local_storage()
            .map_err(|e| StorageError::Unavailable(format!("localStorage access denied: {e:?}")))?
            .ok_or_else(|| StorageError::Unavailable("localStorage is disabled".to_string()))?;
        Ok(Self { inner })
    }
}

impl KeyValueStorage for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner
            .get_item(key)
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        // Quota errors surface here.
        self.inner
            .set_item(key, value)
            .map_err(|e| StorageError::WriteRejected(format!("{e:?}")))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner
            .remove_item(key)
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))
    }
}
