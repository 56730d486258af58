//! Frame driver
//!
//! Owns the session, the seeded RNG and the high score keeper. The host calls
//! [`GameLoop::advance`] once per rendered frame and draws the returned
//! [`FrameResult`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::consts::MAX_FRAME_DT;
use crate::highscores::HighScoreKeeper;
use crate::persistence::HighScoreStore;
use crate::sim::{CoinKind, GamePhase, GameSession, Rect, SoundEvent, TickInput, tick};
use crate::tuning::Tuning;

/// Everything the presentation layer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameResult {
    pub phase: GamePhase,
    /// Bottom-left of the player sprite
    pub player: Vec2,
    /// Wing animation texture index
    pub player_frame: usize,
    pub pipe_top: Rect,
    pub pipe_bottom: Rect,
    /// Bottom-left of the coin sprite
    pub coin: Vec2,
    pub coin_kind: CoinKind,
    pub score: u32,
    pub high_score: u32,
    pub scroll_speed: f32,
    /// Sounds to play this frame
    pub sounds: Vec<SoundEvent>,
}

/// Game instance holding all state
#[derive(Debug)]
pub struct GameLoop<S: HighScoreStore> {
    session: GameSession,
    rng: Pcg32,
    tuning: Tuning,
    high_scores: HighScoreKeeper<S>,
}

impl<S: HighScoreStore> GameLoop<S> {
    /// Start a game, loading the stored high score
    pub fn new(tuning: Tuning, store: S, seed: u64) -> Self {
        let high_scores = HighScoreKeeper::new(store);
        let session = GameSession::new(&tuning, high_scores.load());
        log::info!("Game ready (seed {}, high score {})", seed, session.high_score);
        Self {
            session,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            high_scores,
        }
    }

    /// Advance one frame of `dt` seconds
    pub fn advance(&mut self, dt: f32, touched: bool) -> FrameResult {
        let dt = if dt.is_finite() { dt.clamp(0.0, MAX_FRAME_DT) } else { 0.0 };
        let input = TickInput { touched };

        let outcome = tick(&mut self.session, &input, dt, &mut self.rng, &self.tuning);

        // Fire and forget: a failed write leaves the in-memory score intact
        if let Some(score) = outcome.new_high_score {
            self.high_scores.save(score);
        }

        self.frame(outcome.sounds)
    }

    fn frame(&self, sounds: Vec<SoundEvent>) -> FrameResult {
        let session = &self.session;
        FrameResult {
            phase: session.phase,
            player: session.player.pos,
            player_frame: session.player.sprite_index(),
            pipe_top: session.pipe.top_rect(&self.tuning),
            pipe_bottom: session.pipe.bottom_rect(&self.tuning),
            coin: session.coin.pos,
            coin_kind: session.coin.kind,
            score: session.score,
            high_score: session.high_score,
            scroll_speed: session.scroll_speed,
            sounds,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Direct access for hosts that restore or script a session
    pub fn session_mut(&mut self) -> &mut GameSession {
        &mut self.session
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn high_scores(&self) -> &HighScoreKeeper<S> {
        &self.high_scores
    }
}
