//! Game balance values
//!
//! Every number the simulation reads lives here so a host can ship a JSON
//! override without recompiling. Missing fields fall back to the defaults.

use serde::{Deserialize, Serialize};

use crate::consts::{VIRTUAL_HEIGHT, VIRTUAL_WIDTH};

/// Tunable gameplay parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === World ===
    /// Virtual world width
    pub width: f32,
    /// Virtual world height
    pub height: f32,

    // === Scrolling ===
    /// Scroll speed at the start of a run (units/s)
    pub scroll_speed_base: f32,
    /// Added to the scroll speed on every pipe pass
    pub scroll_speed_step: f32,
    /// Scroll speed cap
    pub scroll_speed_max: f32,

    // === Player ===
    /// Left edge of the player sprite while alive
    pub player_x: f32,
    /// Player sprite size (scaled)
    pub player_width: f32,
    pub player_height: f32,
    /// Fall-offset accumulator value at session start
    pub fall_offset_initial: f32,
    /// Added to the fall-offset accumulator every playing tick
    pub gravity_step: f32,
    /// Fall-offset value set by a flap (negative = upward)
    pub flap_impulse: f32,
    /// Animation frames advanced per second
    pub anim_rate: f32,
    /// Leftward drift of the player after a crash (units/s)
    pub game_over_drift: f32,

    // === Pipes ===
    /// Vertical gap between the top and bottom pipe
    pub pipe_gap: f32,
    pub pipe_width: f32,
    pub pipe_height: f32,
    /// Respawn offset is drawn from `[-pipe_offset_range, pipe_offset_range)`
    pub pipe_offset_range: f32,

    // === Coins ===
    pub coin_width: f32,
    pub coin_height: f32,
    /// Probability that a respawned coin is gold
    pub gold_chance: f64,
    pub silver_value: u32,
    pub gold_value: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            width: VIRTUAL_WIDTH,
            height: VIRTUAL_HEIGHT,

            scroll_speed_base: 300.0,
            scroll_speed_step: 10.0,
            scroll_speed_max: 600.0,

            player_x: 50.0,
            player_width: 68.0,
            player_height: 48.0,
            fall_offset_initial: 0.0,
            gravity_step: 1.0,
            flap_impulse: -15.0,
            anim_rate: 10.0,
            game_over_drift: 500.0,

            pipe_gap: 350.0,
            pipe_width: 130.0,
            pipe_height: 1000.0,
            pipe_offset_range: 200.0,

            coin_width: 60.0,
            coin_height: 60.0,
            gold_chance: 0.25,
            silver_value: 5,
            gold_value: 10,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(tuning.sanitized())
    }

    /// Load tuning from a JSON file, falling back to defaults on any failure
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Invalid tuning file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read tuning file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Clamp values that would break simulation invariants
    fn sanitized(mut self) -> Self {
        self.scroll_speed_base = self.scroll_speed_base.max(0.0);
        self.scroll_speed_step = self.scroll_speed_step.max(0.0);
        self.scroll_speed_max = self.scroll_speed_max.max(self.scroll_speed_base);
        self.gold_chance = self.gold_chance.clamp(0.0, 1.0);
        self.pipe_offset_range = self.pipe_offset_range.abs();
        for size in [
            &mut self.player_width,
            &mut self.player_height,
            &mut self.pipe_gap,
            &mut self.pipe_width,
            &mut self.pipe_height,
            &mut self.coin_width,
            &mut self.coin_height,
        ] {
            *size = size.max(0.0);
        }
        self
    }

    /// Radius of the player's collision circle
    pub fn player_radius(&self) -> f32 {
        self.player_width / 2.0
    }

    /// Radius of the coin's collision circle
    pub fn coin_radius(&self) -> f32 {
        self.coin_height / 2.0
    }
}
