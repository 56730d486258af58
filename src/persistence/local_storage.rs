//! Browser LocalStorage backend (wasm32 only)

use super::{HighScoreStore, StoreError};

/// Integer preferences in `window.localStorage`, namespaced as `<prefs>.<key>`
#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    prefs_name: String,
}

impl LocalStorageStore {
    pub fn new(prefs_name: &str) -> Self {
        Self {
            prefs_name: prefs_name.to_string(),
        }
    }

    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .ok_or_else(|| StoreError::Unavailable("no window".to_string()))?
            .local_storage()
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))?
            .ok_or_else(|| StoreError::Unavailable("LocalStorage disabled".to_string()))
    }

    fn item_key(&self, key: &str) -> String {
        format!("{}.{}", self.prefs_name, key)
    }
}

impl HighScoreStore for LocalStorageStore {
    fn load(&self, key: &str) -> Result<Option<u32>, StoreError> {
        let storage = Self::storage()?;
        let item = storage
            .get_item(&self.item_key(key))
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))?;
        match item {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    fn save(&mut self, key: &str, value: u32) -> Result<(), StoreError> {
        let storage = Self::storage()?;
        storage
            .set_item(&self.item_key(key), &value.to_string())
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))
    }
}
