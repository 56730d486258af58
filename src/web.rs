//! Browser host binding
//!
//! A JS renderer owns the canvas, audio and input. Each animation frame it calls
//! `advance(dt, touched)` and receives the frame as a JSON string.

use wasm_bindgen::prelude::*;

use crate::consts::PREFS_NAME;
use crate::game_loop::GameLoop;
use crate::persistence::LocalStorageStore;
use crate::tuning::Tuning;

#[wasm_bindgen]
pub struct WebGame {
    game: GameLoop<LocalStorageStore>,
}

#[wasm_bindgen]
impl WebGame {
    /// Create a game, optionally with a JSON tuning override
    #[wasm_bindgen(constructor)]
    pub fn new(tuning_json: Option<String>) -> WebGame {
        console_error_panic_hook::set_once();
        // Ignore the error if a previous instance already installed the logger
        let _ = console_log::init_with_level(log::Level::Info);

        let tuning = match tuning_json.as_deref().map(Tuning::from_json) {
            Some(Ok(tuning)) => tuning,
            Some(Err(e)) => {
                log::warn!("Invalid tuning override, using defaults: {}", e);
                Tuning::default()
            }
            None => Tuning::default(),
        };

        let seed = rand::random::<u64>();
        WebGame {
            game: GameLoop::new(tuning, LocalStorageStore::new(PREFS_NAME), seed),
        }
    }

    /// Advance one frame and return it as JSON
    pub fn advance(&mut self, dt: f32, touched: bool) -> String {
        let frame = self.game.advance(dt, touched);
        match serde_json::to_string(&frame) {
            Ok(json) => json,
            Err(e) => {
                log::error!("Failed to encode frame: {}", e);
                String::from("{}")
            }
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> f32 {
        self.game.tuning().width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> f32 {
        self.game.tuning().height
    }
}
