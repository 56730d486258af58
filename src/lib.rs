//! Flappy Coins - A one-button arcade game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, scoring)
//! - `game_loop`: Per-frame driver that owns the session and talks to persistence
//! - `persistence`: High score storage backends
//! - `highscores`: High score keeper bound to a store
//! - `tuning`: Data-driven game balance

pub mod game_loop;
pub mod highscores;
pub mod persistence;
pub mod sim;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use game_loop::{FrameResult, GameLoop};
pub use highscores::HighScoreKeeper;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Virtual viewport dimensions (y up, origin bottom-left)
    pub const VIRTUAL_WIDTH: f32 = 720.0;
    pub const VIRTUAL_HEIGHT: f32 = 1280.0;

    /// Preferences namespace the high score lives under
    pub const PREFS_NAME: &str = "flappy_bird";
    /// Key of the high score inside the preferences namespace
    pub const HIGH_SCORE_KEY: &str = "high_score";

    /// Nominal frame time used by the headless driver
    pub const FRAME_DT: f32 = 1.0 / 60.0;
    /// Largest frame time fed to the simulation (avoids tunnelling after a stall)
    pub const MAX_FRAME_DT: f32 = 0.1;
}
