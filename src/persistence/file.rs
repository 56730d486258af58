//! JSON preferences file
//!
//! One file per preferences namespace, holding a flat `{ "name": value }` map.
//! Writes go to `<file>.tmp` first and are renamed over the real file.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{HighScoreStore, StoreError};

type Prefs = BTreeMap<String, u32>;

/// Preferences file on disk
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store for `prefs_name` inside the per-user data directory
    pub fn in_data_dir(prefs_name: &str) -> Option<Self> {
        let dirs = directories::ProjectDirs::from("", "", "flappy-coins")?;
        Some(Self::new(dirs.data_dir().join(format!("{}.json", prefs_name))))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_prefs(&self) -> Result<Prefs, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Prefs::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_prefs(&self, prefs: &Prefs) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(prefs)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl HighScoreStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<u32>, StoreError> {
        Ok(self.read_prefs()?.get(key).copied())
    }

    fn save(&mut self, key: &str, value: u32) -> Result<(), StoreError> {
        // A corrupt file is replaced rather than blocking the save
        let mut prefs = match self.read_prefs() {
            Ok(prefs) => prefs,
            Err(StoreError::Json(e)) => {
                log::warn!("Discarding corrupt preferences {}: {}", self.path.display(), e);
                Prefs::new()
            }
            Err(e) => return Err(e),
        };
        prefs.insert(key.to_string(), value);
        self.write_prefs(&prefs)
    }
}
