//! Per-frame simulation step
//!
//! Advances the ball, resolves hoop collisions, decides makes and misses,
//! and runs the delayed reset.

use super::collision::{ball_hoop_collision, ball_out_of_bounds, ball_scores, bounce_velocity};
use super::state::{FeedbackEvent, FeedbackKind, GameState, ShotOutcome, ShotPhase};
use crate::consts::*;

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, dt: f32) {
    age_feedback(state, dt);

    match state.phase {
        ShotPhase::Ready => {}

        ShotPhase::Flying => {
            state.ball.update(state.tuning.gravity, dt);

            let collision = ball_hoop_collision(state.ball.pos, state.ball.radius, &state.hoop);
            if collision.is_hit() {
                state.ball.vel = bounce_velocity(state.ball.vel, collision, &state.tuning);
                log::trace!(
                    "{:?} hit, vel now ({:.1}, {:.1})",
                    collision,
                    state.ball.vel.x,
                    state.ball.vel.y
                );
            }

            if ball_scores(state.ball.pos, state.ball.vel, state.ball.radius, &state.hoop) {
                state.score += 1;
                state
                    .feedback
                    .push(FeedbackEvent::new(FeedbackKind::Success, state.hoop.pos));
                state.phase = ShotPhase::Settling {
                    outcome: ShotOutcome::Made,
                    remaining: RESET_DELAY,
                };
                log::info!("Swish! Score: {}", state.score);
            } else if ball_out_of_bounds(state.ball.pos, state.viewport, OUT_OF_BOUNDS_MARGIN) {
                state
                    .feedback
                    .push(FeedbackEvent::new(FeedbackKind::Miss, state.viewport / 2.0));
                state.phase = ShotPhase::Settling {
                    outcome: ShotOutcome::Missed,
                    remaining: RESET_DELAY,
                };
                log::info!("Missed shot {} (score {})", state.shots, state.score);
            }
        }

        ShotPhase::Settling { outcome, remaining } => {
            // Ball keeps falling through the net / off screen while the
            // feedback shows; the shot is already decided.
            state.ball.update(state.tuning.gravity, dt);
            let remaining = remaining - dt;
            if remaining <= 0.0 {
                log::debug!("Resetting ball after {:?}", outcome);
                state.reset();
            } else {
                state.phase = ShotPhase::Settling { outcome, remaining };
            }
        }
    }
}

/// Count down feedback lifetimes and drop the expired ones
fn age_feedback(state: &mut GameState, dt: f32) {
    for event in &mut state.feedback {
        event.remaining -= dt;
    }
    state.feedback.retain(|e| e.remaining > 0.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::CourtVariant;
    use glam::Vec2;
    use proptest::prelude::*;

    const DT: f32 = 1.0 / 60.0;

    fn game() -> GameState {
        GameState::new(CourtVariant::Vertical, 800, 600).unwrap()
    }

    /// Put the ball somewhere and launch it from there
    fn launched(pos: Vec2, vel: Vec2) -> GameState {
        let mut state = game();
        state.ball.pos = pos;
        assert!(state.shoot(vel));
        state
    }

    proptest! {
        #[test]
        fn prop_resting_ball_is_untouched(dt in 0.0f32..1.0) {
            let mut state = game();
            let before = state.ball.clone();
            tick(&mut state, dt);
            prop_assert_eq!(state.ball.pos, before.pos);
            prop_assert_eq!(state.ball.vel, before.vel);
            prop_assert!(state.is_ready());
        }

        #[test]
        fn prop_gravity_integrates_exactly(
            vx in -300.0f32..300.0,
            vy in -600.0f32..-100.0,
            dt in 0.001f32..0.02,
        ) {
            // Start low in the court so nothing is hit in one step
            let mut state = launched(Vec2::new(400.0, 500.0), Vec2::new(vx, vy));
            tick(&mut state, dt);
            let expected = vy + state.tuning.gravity * dt;
            prop_assert!((state.ball.vel.y - expected).abs() < 1e-3);
            prop_assert!((state.ball.vel.x - vx).abs() < 1e-6);
        }
    }

    #[test]
    fn test_make_scores_and_resets_after_delay() {
        // Just inside the rim opening, falling
        let mut state = launched(Vec2::new(405.0, 125.0), Vec2::new(0.0, 50.0));
        tick(&mut state, DT);

        assert_eq!(state.score, 1);
        assert_eq!(state.feedback.len(), 1);
        assert_eq!(state.feedback[0].kind, FeedbackKind::Success);
        assert_eq!(state.feedback[0].pos, state.hoop.pos);
        assert!(matches!(
            state.phase,
            ShotPhase::Settling {
                outcome: ShotOutcome::Made,
                ..
            }
        ));

        // Still falling through the net; no double counting
        for _ in 0..20 {
            tick(&mut state, DT);
        }
        assert_eq!(state.score, 1);
        assert!(state.ball.in_flight);

        // 0.5 s after the make the ball is back
        for _ in 0..15 {
            tick(&mut state, DT);
        }
        assert!(state.is_ready());
        assert_eq!(state.ball.pos, state.ball.rest);
        assert_eq!(state.feedback.len(), 1);
    }

    #[test]
    fn test_feedback_expires_after_lifetime() {
        let mut state = launched(Vec2::new(405.0, 125.0), Vec2::new(0.0, 50.0));
        tick(&mut state, DT);
        assert_eq!(state.feedback.len(), 1);

        // 1.5 s lifetime
        for _ in 0..88 {
            tick(&mut state, DT);
        }
        assert_eq!(state.feedback.len(), 1);
        for _ in 0..3 {
            tick(&mut state, DT);
        }
        assert!(state.feedback.is_empty());
    }

    #[test]
    fn test_out_of_bounds_is_a_miss() {
        let mut state = launched(Vec2::new(400.0, 695.0), Vec2::new(0.0, 600.0));
        tick(&mut state, DT);
        assert_eq!(state.score, 0);
        assert_eq!(state.feedback.len(), 1);
        assert_eq!(state.feedback[0].kind, FeedbackKind::Miss);
        assert_eq!(state.feedback[0].pos, Vec2::new(400.0, 300.0));
        assert!(matches!(
            state.phase,
            ShotPhase::Settling {
                outcome: ShotOutcome::Missed,
                ..
            }
        ));

        // Further frames do not pile up more misses
        tick(&mut state, DT);
        assert_eq!(state.feedback.len(), 1);
    }

    #[test]
    fn test_reset_cancels_pending_delayed_reset() {
        let mut state = launched(Vec2::new(400.0, 695.0), Vec2::new(0.0, 600.0));
        tick(&mut state, DT);
        state.reset();
        assert!(state.is_ready());

        // Grab and aim; the old timer must not snap the ball back
        assert!(state.pointer_down(state.ball.rest));
        state.pointer_move(state.ball.rest + Vec2::new(0.0, 60.0));
        for _ in 0..60 {
            tick(&mut state, DT);
        }
        assert!(state.gesture.is_dragging());
        assert_eq!(state.ball.pos, state.ball.rest + Vec2::new(0.0, 60.0));
    }

    #[test]
    fn test_backboard_bounce_in_flight() {
        // Rising into the underside of the backboard, off to the side of the rim
        let hoop = game().hoop.pos;
        let mut state = launched(hoop + Vec2::new(-45.0, -10.0), Vec2::new(200.0, -400.0));
        tick(&mut state, DT);
        assert!(state.ball.vel.x < 0.0);
    }

    #[test]
    fn test_deterministic_trajectory() {
        let mut state = game();
        let rest = state.ball.rest;
        let pull = 50.0 * std::f32::consts::FRAC_1_SQRT_2;

        // Pull down-left at 45 degrees, launch up-right
        assert!(state.pointer_down(rest));
        state.pointer_move(rest + Vec2::new(-pull, pull));
        let vel = state.pointer_up().unwrap();
        assert!((vel.x - 3.0 * pull).abs() < 1e-3);
        assert!((vel.y + 3.0 * pull).abs() < 1e-3);

        let start = state.ball.pos;
        assert!(start.distance(rest + Vec2::new(-pull, pull)) < 1e-3);

        let g = state.tuning.gravity;
        for n in 1..=20 {
            tick(&mut state, DT);
            let t = n as f32 * DT;
            let expected_x = start.x + vel.x * t;
            let expected_y = start.y + vel.y * t + g * DT * DT * (n * (n + 1)) as f32 / 2.0;
            assert!(
                (state.ball.pos.x - expected_x).abs() < 1e-2,
                "frame {}: x {} vs {}",
                n,
                state.ball.pos.x,
                expected_x
            );
            assert!(
                (state.ball.pos.y - expected_y).abs() < 1e-2,
                "frame {}: y {} vs {}",
                n,
                state.ball.pos.y,
                expected_y
            );
        }
        assert_eq!(state.phase, ShotPhase::Flying);
    }
}
