//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Randomness only through the caller's RNG
//! - No rendering, audio or storage dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Circle, Rect, circle_circle_overlap, circle_rect_overlap};
pub use state::{Coin, CoinKind, GamePhase, GameSession, PipePair, Player, SoundEvent, PLAYER_FRAMES};
pub use tick::{TickInput, TickOutcome, tick};
