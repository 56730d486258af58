//! High score keeper
//!
//! Binds a [`HighScoreStore`] to the fixed key this game uses. Storage
//! failures are logged and swallowed; gameplay never sees them.

use crate::consts::HIGH_SCORE_KEY;
use crate::persistence::HighScoreStore;

/// Loads and saves the high score through a store
#[derive(Debug)]
pub struct HighScoreKeeper<S: HighScoreStore> {
    store: S,
    key: String,
}

impl<S: HighScoreStore> HighScoreKeeper<S> {
    /// Keeper using the default high score key
    pub fn new(store: S) -> Self {
        Self::with_key(store, HIGH_SCORE_KEY)
    }

    pub fn with_key(store: S, key: &str) -> Self {
        Self {
            store,
            key: key.to_string(),
        }
    }

    /// Stored high score, 0 if none was saved or the store is unreadable
    pub fn load(&self) -> u32 {
        match self.store.load(&self.key) {
            Ok(Some(score)) => {
                log::info!("Loaded high score {}", score);
                score
            }
            Ok(None) => {
                log::info!("No high score found, starting fresh");
                0
            }
            Err(e) => {
                log::warn!("Could not load high score: {}", e);
                0
            }
        }
    }

    /// Persist a new high score. Returns false if the write failed.
    pub fn save(&mut self, score: u32) -> bool {
        match self.store.save(&self.key, score) {
            Ok(()) => {
                log::info!("High score saved ({})", score);
                true
            }
            Err(e) => {
                log::warn!("Could not save high score {}: {}", score, e);
                false
            }
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}
