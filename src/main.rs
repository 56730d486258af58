//! Flappy Coins entry point
//!
//! Native builds run a headless session with a simple autopilot and log what
//! happens. The browser build is driven from JS through `flappy_coins::web`.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::Path;

    use flappy_coins::consts::{FRAME_DT, PREFS_NAME};
    use flappy_coins::persistence::{FileStore, HighScoreStore, MemoryStore};
    use flappy_coins::sim::{GamePhase, GameSession, SoundEvent};
    use flappy_coins::{GameLoop, Tuning};

    /// Frames simulated when no count is given (one minute at 60 Hz)
    const DEFAULT_FRAMES: u32 = 60 * 60;
    /// How long the autopilot lingers on the game over screen
    const RESTART_DELAY_FRAMES: u32 = 60;

    pub fn run() {
        let mut args = std::env::args().skip(1);
        let tuning = match args.next() {
            Some(path) => Tuning::load(Path::new(&path)),
            None => Tuning::default(),
        };
        let frames = args
            .next()
            .and_then(|n| n.parse().ok())
            .unwrap_or(DEFAULT_FRAMES);

        let seed = rand::random::<u64>();
        match FileStore::in_data_dir(PREFS_NAME) {
            Some(store) => {
                log::info!("High score file: {}", store.path().display());
                play(GameLoop::new(tuning, store, seed), frames);
            }
            None => {
                log::warn!("No data directory available, high score will not persist");
                play(GameLoop::new(tuning, MemoryStore::new(), seed), frames);
            }
        }
    }

    fn play<S: HighScoreStore>(mut game: GameLoop<S>, frames: u32) {
        let mut runs = 0u32;
        let mut best = 0u32;
        let mut game_over_frames = 0u32;

        for _ in 0..frames {
            let touched = autopilot(game.session(), game.tuning(), &mut game_over_frames);
            let frame = game.advance(FRAME_DT, touched);

            for sound in &frame.sounds {
                match sound {
                    SoundEvent::Collision => {
                        runs += 1;
                        best = best.max(frame.score);
                    }
                    SoundEvent::CoinCollected => log::debug!("Coin! score {}", frame.score),
                    SoundEvent::Score => log::debug!("Passed pipe, score {}", frame.score),
                    SoundEvent::WingFlap => {}
                }
            }
        }

        log::info!(
            "Simulated {} frames: {} runs, best run {}, high score {}",
            frames,
            runs,
            best,
            game.session().high_score
        );
        println!("runs: {runs}  best: {best}  high score: {}", game.session().high_score);
    }

    /// Flap whenever the bird sinks below the middle of the gap
    fn autopilot(session: &GameSession, tuning: &Tuning, game_over_frames: &mut u32) -> bool {
        match session.phase {
            GamePhase::WaitingToStart => true,
            GamePhase::Playing => {
                *game_over_frames = 0;
                let bird_center = session.player.pos.y + tuning.player_height / 2.0;
                let gap_center = tuning.height / 2.0 + session.pipe.offset;
                bird_center < gap_center - tuning.pipe_gap / 6.0 && session.player.fall_offset > 0.0
            }
            GamePhase::GameOver => {
                *game_over_frames += 1;
                *game_over_frames >= RESTART_DELAY_FRAMES
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Flappy Coins (native, headless) starting...");
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is flappy_coins::web::WebGame, this is just to satisfy the compiler
}
