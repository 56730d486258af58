//! Per-frame simulation tick
//!
//! Core game loop that advances the session by one rendered frame.

use rand::Rng;

use super::collision::{circle_circle_overlap, circle_rect_overlap};
use super::state::{GamePhase, GameSession, SoundEvent};
use crate::tuning::Tuning;

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Screen was touched this frame (already edge-detected by the host)
    pub touched: bool,
}

/// What happened during a tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickOutcome {
    /// Sounds to play, in the order they happened
    pub sounds: Vec<SoundEvent>,
    /// Set on the first GameOver tick when the run beat the high score
    pub new_high_score: Option<u32>,
}

/// Advance the session by one frame of `dt` seconds
pub fn tick<R: Rng>(
    session: &mut GameSession,
    input: &TickInput,
    dt: f32,
    rng: &mut R,
    tuning: &Tuning,
) -> TickOutcome {
    let mut outcome = TickOutcome::default();

    match session.phase {
        GamePhase::WaitingToStart => {
            if input.touched {
                flap(session, &mut outcome, tuning);
                session.phase = GamePhase::Playing;
                log::info!("Run started");
            }
        }
        GamePhase::Playing => {
            scroll_objects(session, dt, rng, tuning);

            if input.touched {
                flap(session, &mut outcome, tuning);
            }

            // A zero-length frame advances no physics unless the player flapped
            if dt > 0.0 || input.touched {
                session.player.fall(input.touched, tuning);
            }

            detect_collisions(session, &mut outcome, tuning);
            validate_score(session, &mut outcome, tuning);
        }
        GamePhase::GameOver => {
            session.player.pos.x -= dt * tuning.game_over_drift;

            outcome.new_high_score = session.settle_high_score();
            if let Some(score) = outcome.new_high_score {
                log::info!("New high score: {}", score);
            }

            if input.touched {
                session.reset(tuning);
                log::info!("Session reset, waiting to start");
            }
        }
    }

    // Wings keep flapping on every screen
    session.player.animate(dt, tuning);

    outcome
}

fn flap(session: &mut GameSession, outcome: &mut TickOutcome, tuning: &Tuning) {
    session.player.flap(tuning);
    outcome.sounds.push(SoundEvent::WingFlap);
}

/// Scroll pipe and coin left, recycling whichever left the screen
fn scroll_objects<R: Rng>(session: &mut GameSession, dt: f32, rng: &mut R, tuning: &Tuning) {
    let step = session.scroll_speed * dt;
    session.pipe.x -= step;
    session.coin.pos.x -= step;

    if session.pipe.is_offscreen(tuning) {
        session.pipe.respawn(rng, tuning);
        log::debug!("Pipe respawned with offset {:.1}", session.pipe.offset);
    }

    if session.coin.is_offscreen(tuning) {
        session.coin.respawn(session.pipe.x, rng, tuning);
        log::debug!(
            "Coin respawned as {:?} at ({:.1}, {:.1})",
            session.coin.kind,
            session.coin.pos.x,
            session.coin.pos.y
        );
    }
}

/// Player vs. top pipe, bottom pipe and coin
fn detect_collisions(session: &mut GameSession, outcome: &mut TickOutcome, tuning: &Tuning) {
    let player = session.player.collider(tuning);

    let hit_top = circle_rect_overlap(&player, &session.pipe.top_rect(tuning));
    let hit_bottom = circle_rect_overlap(&player, &session.pipe.bottom_rect(tuning));
    let hit_coin = circle_circle_overlap(&player, &session.coin.collider(tuning));

    // Coin first: its sound precedes the crash sound when both happen in one tick
    if hit_coin {
        let value = session.coin.kind.value(tuning);
        session.score += value;
        session.coin.park(tuning);
        outcome.sounds.push(SoundEvent::CoinCollected);
        log::debug!("Collected {:?} coin (+{})", session.coin.kind, value);
    }

    if (hit_top || hit_bottom) && session.phase == GamePhase::Playing {
        outcome.sounds.push(SoundEvent::Collision);
        session.phase = GamePhase::GameOver;
        log::info!("Game over with score {}", session.score);
    }
}

/// Award a point the first time the pipe scrolls past the player
fn validate_score(session: &mut GameSession, outcome: &mut TickOutcome, tuning: &Tuning) {
    if session.pipe.passed || session.pipe.x >= session.player.pos.x {
        return;
    }

    session.score += 1;
    session.pipe.passed = true;
    outcome.sounds.push(SoundEvent::Score);
    session.ramp_scroll_speed(tuning);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::CoinKind;
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const DT: f32 = 1.0 / 60.0;

    fn touch() -> TickInput {
        TickInput { touched: true }
    }

    fn playing_session(tuning: &Tuning) -> GameSession {
        let mut session = GameSession::new(tuning, 0);
        session.phase = GamePhase::Playing;
        session
    }

    #[test]
    fn test_touch_starts_run() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut session = GameSession::new(&tuning, 0);

        // No touch - stays put
        let outcome = tick(&mut session, &TickInput::default(), DT, &mut rng, &tuning);
        assert_eq!(session.phase, GamePhase::WaitingToStart);
        assert!(outcome.sounds.is_empty());
        assert_eq!(session.pipe.x, tuning.width);
        assert_eq!(session.player.pos.y, tuning.height / 2.0);

        let outcome = tick(&mut session, &touch(), DT, &mut rng, &tuning);
        assert_eq!(session.phase, GamePhase::Playing);
        assert_eq!(outcome.sounds, vec![SoundEvent::WingFlap]);
        assert_eq!(session.player.fall_offset, tuning.flap_impulse);
    }

    #[test]
    fn test_flap_lifts_then_gravity_wins() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut session = GameSession::new(&tuning, 0);
        tick(&mut session, &touch(), DT, &mut rng, &tuning);

        let start_y = session.player.pos.y;
        tick(&mut session, &TickInput::default(), DT, &mut rng, &tuning);
        assert_eq!(session.player.pos.y, start_y + 15.0);
        assert_eq!(session.player.fall_offset, tuning.flap_impulse + tuning.gravity_step);

        // After enough ticks the accumulator turns positive and the bird drops
        for _ in 0..20 {
            tick(&mut session, &TickInput::default(), DT, &mut rng, &tuning);
        }
        assert!(session.player.fall_offset > 0.0);
    }

    #[test]
    fn test_pipe_pass_scores_once() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut session = playing_session(&tuning);
        session.pipe.x = session.player.pos.x + 1.0;
        session.coin.pos.x = tuning.width * 1.5;

        let outcome = tick(&mut session, &TickInput::default(), 0.01, &mut rng, &tuning);
        assert_eq!(session.score, 1);
        assert!(session.pipe.passed);
        assert_eq!(outcome.sounds, vec![SoundEvent::Score]);
        assert_eq!(session.scroll_speed, tuning.scroll_speed_base + tuning.scroll_speed_step);

        let outcome = tick(&mut session, &TickInput::default(), 0.01, &mut rng, &tuning);
        assert_eq!(session.score, 1);
        assert!(!outcome.sounds.contains(&SoundEvent::Score));
    }

    #[test]
    fn test_many_small_ticks_before_pass() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut session = playing_session(&tuning);
        session.pipe.x = session.player.pos.x + 3.0;

        let mut scores = 0;
        for _ in 0..100 {
            // Hold the bird still in the gap
            session.player.fall_offset = 0.0;
            let outcome = tick(&mut session, &TickInput::default(), 0.001, &mut rng, &tuning);
            scores += outcome.sounds.iter().filter(|s| **s == SoundEvent::Score).count();
        }
        assert_eq!(scores, 1);
        assert_eq!(session.score, 1);
        assert_eq!(session.phase, GamePhase::Playing);
    }

    #[test]
    fn test_top_pipe_collision_ends_run() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut session = playing_session(&tuning);
        session.pipe.x = session.player.pos.x;
        session.pipe.passed = true;
        session.pipe.offset = -400.0;

        let outcome = tick(&mut session, &TickInput::default(), 0.0, &mut rng, &tuning);
        assert_eq!(session.phase, GamePhase::GameOver);
        assert_eq!(outcome.sounds, vec![SoundEvent::Collision]);

        for _ in 0..5 {
            let outcome = tick(&mut session, &TickInput::default(), DT, &mut rng, &tuning);
            assert!(!outcome.sounds.contains(&SoundEvent::Collision));
            assert_eq!(session.phase, GamePhase::GameOver);
        }
    }

    #[test]
    fn test_bottom_pipe_collision_ends_run() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut session = playing_session(&tuning);
        session.pipe.x = session.player.pos.x;
        session.pipe.passed = true;
        session.pipe.offset = 400.0;

        let outcome = tick(&mut session, &TickInput::default(), 0.0, &mut rng, &tuning);
        assert_eq!(session.phase, GamePhase::GameOver);
        assert_eq!(outcome.sounds, vec![SoundEvent::Collision]);
    }

    #[test]
    fn test_gold_coin_pickup() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut session = playing_session(&tuning);
        session.coin.kind = CoinKind::Gold;
        let center = session.player.collider(&tuning).center;
        session.coin.pos = center - Vec2::new(tuning.coin_width, tuning.coin_height) / 2.0;

        let outcome = tick(&mut session, &TickInput::default(), 0.0, &mut rng, &tuning);
        assert_eq!(session.score, tuning.gold_value);
        assert_eq!(outcome.sounds, vec![SoundEvent::CoinCollected]);
        assert_eq!(session.coin.pos.y, tuning.height * 2.0);
        assert_eq!(session.phase, GamePhase::Playing);

        // Parked coin can't be picked up again
        let outcome = tick(&mut session, &TickInput::default(), 0.0, &mut rng, &tuning);
        assert!(outcome.sounds.is_empty());
        assert_eq!(session.score, tuning.gold_value);
    }

    #[test]
    fn test_coin_and_pipe_same_tick() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut session = playing_session(&tuning);
        session.pipe.x = session.player.pos.x;
        session.pipe.passed = true;
        session.pipe.offset = -400.0;
        let center = session.player.collider(&tuning).center;
        session.coin.pos = center - Vec2::splat(tuning.coin_height / 2.0);

        let outcome = tick(&mut session, &TickInput::default(), 0.0, &mut rng, &tuning);
        assert_eq!(outcome.sounds, vec![SoundEvent::CoinCollected, SoundEvent::Collision]);
        assert_eq!(session.score, tuning.silver_value);
        assert_eq!(session.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_respawn_uses_injected_rng() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(77);
        let mut expected = rng.clone();
        let mut session = playing_session(&tuning);
        session.pipe.x = -tuning.pipe_width + 1.0;
        session.pipe.passed = true;
        session.coin.pos.x = -tuning.coin_width + 1.0;
        session.player.pos.y = 2_000.0;

        tick(&mut session, &TickInput::default(), 0.01, &mut rng, &tuning);

        let offset: f32 = expected.random_range(-tuning.pipe_offset_range..tuning.pipe_offset_range);
        let coin_y: f32 = expected.random_range(0.0..tuning.height);
        let kind = CoinKind::roll(&mut expected, &tuning);

        assert_eq!(session.pipe.x, tuning.width);
        assert_eq!(session.pipe.offset, offset);
        assert!(!session.pipe.passed);
        assert_eq!(session.coin.pos.x, tuning.width * 1.5);
        assert_eq!(session.coin.pos.y, coin_y);
        assert_eq!(session.coin.kind, kind);
    }

    #[test]
    fn test_high_score_settled_once() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut session = GameSession::new(&tuning, 30);
        session.phase = GamePhase::GameOver;
        session.score = 50;

        let outcome = tick(&mut session, &TickInput::default(), DT, &mut rng, &tuning);
        assert_eq!(outcome.new_high_score, Some(50));
        assert_eq!(session.high_score, 50);

        for _ in 0..3 {
            let outcome = tick(&mut session, &TickInput::default(), DT, &mut rng, &tuning);
            assert_eq!(outcome.new_high_score, None);
        }
    }

    #[test]
    fn test_game_over_drift_and_restart() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut session = GameSession::new(&tuning, 0);
        session.phase = GamePhase::GameOver;
        session.score = 3;

        tick(&mut session, &TickInput::default(), 0.1, &mut rng, &tuning);
        assert!((session.player.pos.x - (tuning.player_x - 50.0)).abs() < 0.001);

        let outcome = tick(&mut session, &touch(), DT, &mut rng, &tuning);
        assert!(outcome.sounds.is_empty());
        assert_eq!(session.phase, GamePhase::WaitingToStart);
        assert_eq!(session.score, 0);
        assert_eq!(session.high_score, 3);
        assert_eq!(session.player.pos.x, tuning.player_x);
        assert_eq!(session.scroll_speed, tuning.scroll_speed_base);
    }

    #[test]
    fn test_zero_dt_is_idempotent() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);

        for mut session in [GameSession::new(&tuning, 0), playing_session(&tuning)] {
            let before = session.clone();
            tick(&mut session, &TickInput::default(), 0.0, &mut rng, &tuning);
            tick(&mut session, &TickInput::default(), 0.0, &mut rng, &tuning);
            assert_eq!(session, before);
        }
    }

    #[test]
    fn test_zero_dt_touch_still_flaps() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut session = playing_session(&tuning);
        let start_y = session.player.pos.y;

        let outcome = tick(&mut session, &touch(), 0.0, &mut rng, &tuning);
        assert_eq!(outcome.sounds, vec![SoundEvent::WingFlap]);
        assert_eq!(session.player.pos.y, start_y - tuning.flap_impulse);
        assert_eq!(session.player.fall_offset, tuning.flap_impulse + tuning.gravity_step);
    }

    #[test]
    fn test_determinism() {
        let tuning = Tuning::default();
        let mut rng1 = Pcg32::seed_from_u64(99999);
        let mut rng2 = Pcg32::seed_from_u64(99999);
        let mut s1 = GameSession::new(&tuning, 0);
        let mut s2 = GameSession::new(&tuning, 0);

        for i in 0..600 {
            let input = TickInput { touched: i % 9 == 0 };
            let o1 = tick(&mut s1, &input, DT, &mut rng1, &tuning);
            let o2 = tick(&mut s2, &input, DT, &mut rng2, &tuning);
            assert_eq!(o1, o2);
        }
        assert_eq!(s1, s2);
    }
}
