//! Game state and core simulation types
//!
//! Everything a run needs lives in [`GameSession`]; there is no hidden global state.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{Circle, Rect};
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Player hovers at the start position, waiting for the first touch
    #[default]
    WaitingToStart,
    /// Active gameplay
    Playing,
    /// Run ended, waiting for a touch to restart
    GameOver,
}

/// Sounds the presentation layer should play this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundEvent {
    /// Player flapped
    WingFlap,
    /// Player hit a pipe
    Collision,
    /// Player passed a pipe
    Score,
    /// Player picked up a coin
    CoinCollected,
}

/// Number of wing animation frames
pub const PLAYER_FRAMES: usize = 3;

/// The player-controlled bird
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Bottom-left of the sprite
    pub pos: Vec2,
    /// Subtracted from `pos.y` each tick, grows with gravity
    pub fall_offset: f32,
    /// Wing animation counter in [0, 3]
    pub anim_frame: f32,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.player_x, tuning.height / 2.0),
            fall_offset: tuning.fall_offset_initial,
            anim_frame: 0.0,
        }
    }

    /// Kick the bird upward
    pub fn flap(&mut self, tuning: &Tuning) {
        self.fall_offset = tuning.flap_impulse;
    }

    /// Apply one tick of gravity. The bird rests once it reaches the floor
    /// unless it was touched this tick.
    pub fn fall(&mut self, touched: bool, tuning: &Tuning) {
        if self.pos.y > 0.0 || touched {
            self.pos.y -= self.fall_offset;
        }
        self.fall_offset += tuning.gravity_step;
    }

    pub fn animate(&mut self, dt: f32, tuning: &Tuning) {
        self.anim_frame += dt * tuning.anim_rate;
        if self.anim_frame > PLAYER_FRAMES as f32 {
            self.anim_frame = 0.0;
        }
    }

    /// Texture index for the current wing frame
    pub fn sprite_index(&self) -> usize {
        (self.anim_frame as usize).min(PLAYER_FRAMES - 1)
    }

    pub fn collider(&self, tuning: &Tuning) -> Circle {
        let half = Vec2::new(tuning.player_width, tuning.player_height) / 2.0;
        Circle::new(self.pos + half, tuning.player_radius())
    }
}

/// Top and bottom pipe sharing one horizontal position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipePair {
    /// Left edge of both pipes
    pub x: f32,
    /// Vertical shift of the gap from screen center
    pub offset: f32,
    /// Set once the player has scored this pipe instance
    pub passed: bool,
}

impl PipePair {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            x: tuning.width,
            offset: 0.0,
            passed: false,
        }
    }

    /// Screen-space y of the gap center
    fn gap_center(&self, tuning: &Tuning) -> f32 {
        tuning.height / 2.0 + self.offset
    }

    pub fn top_rect(&self, tuning: &Tuning) -> Rect {
        Rect::new(
            self.x,
            self.gap_center(tuning) + tuning.pipe_gap / 2.0,
            tuning.pipe_width,
            tuning.pipe_height,
        )
    }

    pub fn bottom_rect(&self, tuning: &Tuning) -> Rect {
        Rect::new(
            self.x,
            self.gap_center(tuning) - tuning.pipe_gap / 2.0 - tuning.pipe_height,
            tuning.pipe_width,
            tuning.pipe_height,
        )
    }

    /// True once the pipe has fully left the screen
    pub fn is_offscreen(&self, tuning: &Tuning) -> bool {
        self.x < -tuning.pipe_width
    }

    /// Move back to the right edge with a new gap position
    pub fn respawn<R: Rng>(&mut self, rng: &mut R, tuning: &Tuning) {
        self.x = tuning.width;
        self.offset = if tuning.pipe_offset_range > 0.0 {
            rng.random_range(-tuning.pipe_offset_range..tuning.pipe_offset_range)
        } else {
            0.0
        };
        self.passed = false;
    }
}

/// Coin variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CoinKind {
    #[default]
    Silver,
    Gold,
}

impl CoinKind {
    /// Draw a coin kind, gold with probability `tuning.gold_chance`
    pub fn roll<R: Rng>(rng: &mut R, tuning: &Tuning) -> Self {
        if rng.random_bool(tuning.gold_chance) {
            CoinKind::Gold
        } else {
            CoinKind::Silver
        }
    }

    /// Points awarded on pickup
    pub fn value(&self, tuning: &Tuning) -> u32 {
        match self {
            CoinKind::Silver => tuning.silver_value,
            CoinKind::Gold => tuning.gold_value,
        }
    }
}

/// A collectible coin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    /// Bottom-left of the sprite
    pub pos: Vec2,
    pub kind: CoinKind,
}

impl Coin {
    pub fn new(pipe: &PipePair, tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(pipe.x + tuning.width / 2.0, 0.0),
            kind: CoinKind::Silver,
        }
    }

    pub fn collider(&self, tuning: &Tuning) -> Circle {
        let half = Vec2::new(tuning.coin_width, tuning.coin_height) / 2.0;
        Circle::new(self.pos + half, tuning.coin_radius())
    }

    pub fn is_offscreen(&self, tuning: &Tuning) -> bool {
        self.pos.x < -tuning.coin_width
    }

    /// Park the coin far above the screen so it cannot be collected again
    /// before it respawns
    pub fn park(&mut self, tuning: &Tuning) {
        self.pos.y = tuning.height * 2.0;
    }

    /// Place the coin half a screen behind the pipe at a random height
    pub fn respawn<R: Rng>(&mut self, pipe_x: f32, rng: &mut R, tuning: &Tuning) {
        self.pos.x = pipe_x + tuning.width / 2.0;
        self.pos.y = if tuning.height > 0.0 {
            rng.random_range(0.0..tuning.height)
        } else {
            0.0
        };
        self.kind = CoinKind::roll(rng, tuning);
    }
}

/// Complete game session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    /// Current phase
    pub phase: GamePhase,
    pub player: Player,
    pub pipe: PipePair,
    pub coin: Coin,
    /// Horizontal speed shared by pipe and coin
    pub scroll_speed: f32,
    /// Score of the current run
    pub score: u32,
    /// Best score seen so far (persisted by the host)
    pub high_score: u32,
    /// Set once the first GameOver tick has settled the high score
    game_over_settled: bool,
}

impl GameSession {
    /// Create a fresh session with a previously stored high score
    pub fn new(tuning: &Tuning, high_score: u32) -> Self {
        let pipe = PipePair::new(tuning);
        let coin = Coin::new(&pipe, tuning);
        Self {
            phase: GamePhase::WaitingToStart,
            player: Player::new(tuning),
            pipe,
            coin,
            scroll_speed: tuning.scroll_speed_base,
            score: 0,
            high_score,
            game_over_settled: false,
        }
    }

    /// Reset everything except the high score
    pub fn reset(&mut self, tuning: &Tuning) {
        *self = Self::new(tuning, self.high_score);
    }

    /// Raise the scroll speed one step, never past the cap
    pub fn ramp_scroll_speed(&mut self, tuning: &Tuning) {
        if self.scroll_speed < tuning.scroll_speed_max {
            self.scroll_speed = (self.scroll_speed + tuning.scroll_speed_step).min(tuning.scroll_speed_max);
        }
    }

    /// Settle the high score on the first GameOver tick.
    /// Returns the new high score if this run beat it.
    pub(crate) fn settle_high_score(&mut self) -> Option<u32> {
        if self.game_over_settled {
            return None;
        }
        self.game_over_settled = true;
        if self.score > self.high_score {
            self.high_score = self.score;
            Some(self.score)
        } else {
            None
        }
    }
}
