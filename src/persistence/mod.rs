//! High score persistence
//!
//! Backends:
//! - `MemoryStore`: in-process map (tests, fallback when nothing else works)
//! - `FileStore`: JSON preferences file with tmp → rename writes (native)
//! - `LocalStorageStore`: browser LocalStorage (wasm32)

use std::fmt;

pub mod memory;

#[cfg(not(target_arch = "wasm32"))]
pub mod file;

#[cfg(target_arch = "wasm32")]
pub mod local_storage;

pub use memory::MemoryStore;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;

#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

/// Storage failure
#[derive(Debug)]
pub enum StoreError {
    /// Filesystem error
    Io(std::io::Error),
    /// Stored data could not be parsed or written
    Json(serde_json::Error),
    /// Backend not reachable (e.g. LocalStorage disabled)
    Unavailable(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "I/O error: {}", e),
            StoreError::Json(e) => write!(f, "corrupt preferences: {}", e),
            StoreError::Unavailable(msg) => write!(f, "storage unavailable: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            StoreError::Json(e) => Some(e),
            StoreError::Unavailable(_) => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Json(e)
    }
}

/// Integer preferences keyed by name
pub trait HighScoreStore {
    /// Stored value, `None` if the key was never written
    fn load(&self, key: &str) -> Result<Option<u32>, StoreError>;

    /// Store a value, replacing any previous one
    fn save(&mut self, key: &str, value: u32) -> Result<(), StoreError>;
}
