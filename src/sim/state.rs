//! Game state and core simulation types
//!
//! Everything the basketball game needs between frames lives in `GameState`,
//! including the pending post-shot reset, so dropping the state also cancels
//! any reset that has not fired yet.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::gesture::{GestureTracker, Release};
use crate::consts::*;
use crate::error::{CanvasError, Result};
use crate::tuning::{CourtVariant, Tuning};

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Where the ball sits between shots
    pub rest: Vec2,
    pub in_flight: bool,
}

impl Ball {
    pub fn new(rest: Vec2, radius: f32) -> Self {
        Self {
            pos: rest,
            vel: Vec2::ZERO,
            radius,
            rest,
            in_flight: false,
        }
    }

    /// Snap back to the rest position
    pub fn reset(&mut self) {
        self.pos = self.rest;
        self.vel = Vec2::ZERO;
        self.in_flight = false;
    }

    /// Semi-implicit Euler step: velocity first, then position
    pub fn update(&mut self, gravity: f32, dt: f32) {
        if !self.in_flight {
            return;
        }
        self.vel.y += gravity * dt;
        self.pos += self.vel * dt;
    }

    pub fn shoot(&mut self, vel: Vec2) {
        self.vel = vel;
        self.in_flight = true;
    }
}

/// Backboard plus rim
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hoop {
    /// Rim center
    pub pos: Vec2,
    pub rim_radius: f32,
    /// Backboard width and height
    pub backboard_size: Vec2,
    /// Backboard center relative to the rim center
    pub backboard_offset: Vec2,
    /// Drawn net length below the rim
    pub net_height: f32,
}

impl Hoop {
    /// Hoop for the vertical court: backboard sits directly above the rim
    pub fn new(pos: Vec2) -> Self {
        Self::for_variant(CourtVariant::Vertical, pos)
    }

    pub fn for_variant(variant: CourtVariant, pos: Vec2) -> Self {
        let (backboard_size, backboard_offset) = match variant {
            CourtVariant::Vertical => (
                Vec2::new(BACKBOARD_WIDTH, BACKBOARD_HEIGHT),
                Vec2::new(0.0, -(RIM_RADIUS + BACKBOARD_HEIGHT / 2.0)),
            ),
            // Side-on court: a thin upright board behind the far edge of the rim
            CourtVariant::Horizontal => (
                Vec2::new(12.0, BACKBOARD_WIDTH),
                Vec2::new(RIM_RADIUS + 6.0, -BACKBOARD_WIDTH / 2.0 + 10.0),
            ),
        };
        Self {
            pos,
            rim_radius: RIM_RADIUS,
            backboard_size,
            backboard_offset,
            net_height: NET_HEIGHT,
        }
    }

    pub fn backboard_center(&self) -> Vec2 {
        self.pos + self.backboard_offset
    }

    /// Backboard rectangle as (min, max) corners
    pub fn backboard_bounds(&self) -> (Vec2, Vec2) {
        let center = self.backboard_center();
        let half = self.backboard_size / 2.0;
        (center - half, center + half)
    }
}

/// Make/miss feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedbackKind {
    Success,
    Miss,
}

/// A short-lived on-screen message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackEvent {
    pub kind: FeedbackKind,
    pub pos: Vec2,
    /// Seconds left before the event disappears
    pub remaining: f32,
}

impl FeedbackEvent {
    pub fn new(kind: FeedbackKind, pos: Vec2) -> Self {
        Self {
            kind,
            pos,
            remaining: FEEDBACK_LIFETIME,
        }
    }

    /// Fade factor in [0, 1]
    pub fn alpha(&self) -> f32 {
        (self.remaining / FEEDBACK_LIFETIME).clamp(0.0, 1.0)
    }
}

/// How a shot ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShotOutcome {
    Made,
    Missed,
}

/// Where the ball is in its shot cycle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ShotPhase {
    /// Resting, can be grabbed
    Ready,
    /// In the air, colliding and scoring
    Flying,
    /// Shot decided; ball keeps moving until the reset delay runs out
    Settling { outcome: ShotOutcome, remaining: f32 },
}

/// Complete basketball game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub variant: CourtVariant,
    pub tuning: Tuning,
    /// Viewport width and height in canvas pixels
    pub viewport: Vec2,
    pub ball: Ball,
    pub hoop: Hoop,
    pub gesture: GestureTracker,
    /// Live feedback events, oldest first
    pub feedback: Vec<FeedbackEvent>,
    pub phase: ShotPhase,
    pub score: u32,
    pub shots: u32,
}

impl GameState {
    /// Create a game for a viewport with the variant's default tuning
    pub fn new(variant: CourtVariant, width: u32, height: u32) -> Result<Self> {
        Self::with_tuning(variant, variant.tuning(), width, height)
    }

    pub fn with_tuning(
        variant: CourtVariant,
        tuning: Tuning,
        width: u32,
        height: u32,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(CanvasError::EmptySurface { width, height });
        }
        let (w, h) = (width as f32, height as f32);
        Ok(Self {
            variant,
            tuning,
            viewport: Vec2::new(w, h),
            ball: Ball::new(variant.ball_rest(w, h), BALL_RADIUS),
            hoop: Hoop::for_variant(variant, variant.hoop_position(w, h)),
            gesture: GestureTracker::new(),
            feedback: Vec::new(),
            phase: ShotPhase::Ready,
            score: 0,
            shots: 0,
        })
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.phase, ShotPhase::Ready)
    }

    /// Launch the resting ball. Ignored unless the ball is ready.
    pub fn shoot(&mut self, vel: Vec2) -> bool {
        if !self.is_ready() || self.ball.in_flight {
            return false;
        }
        self.gesture.cancel();
        self.ball.shoot(vel);
        self.phase = ShotPhase::Flying;
        self.shots += 1;
        log::debug!("Shot {} launched at ({:.1}, {:.1})", self.shots, vel.x, vel.y);
        true
    }

    /// Put the ball back at rest. Cancels any pending delayed reset.
    pub fn reset(&mut self) {
        self.ball.reset();
        self.gesture.cancel();
        self.phase = ShotPhase::Ready;
    }

    /// Reset the ball and clear score and feedback
    pub fn reset_game(&mut self) {
        self.reset();
        self.score = 0;
        self.shots = 0;
        self.feedback.clear();
        log::info!("Game reset");
    }

    /// Reposition ball rest point and hoop for a new viewport size
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::warn!("Ignoring resize to empty viewport {}x{}", width, height);
            return;
        }
        let (w, h) = (width as f32, height as f32);
        self.viewport = Vec2::new(w, h);
        self.ball.rest = self.variant.ball_rest(w, h);
        self.hoop.pos = self.variant.hoop_position(w, h);
        if !self.ball.in_flight {
            self.reset();
        }
    }

    /// Pointer went down. Returns true if the ball was grabbed.
    pub fn pointer_down(&mut self, pointer: Vec2) -> bool {
        if !self.is_ready() || self.ball.in_flight {
            return false;
        }
        let grabbed = self.gesture.begin(pointer, self.ball.pos, self.ball.radius);
        if grabbed {
            log::debug!("Ball grabbed at ({:.1}, {:.1})", pointer.x, pointer.y);
        }
        grabbed
    }

    /// Pointer moved. While aiming the ball follows the pull.
    pub fn pointer_move(&mut self, pointer: Vec2) {
        self.gesture.move_to(pointer);
        if let Some(drag) = self.gesture.drag() {
            self.ball.pos = drag.anchor + self.gesture.drag_offset();
        }
    }

    /// Pointer released. Returns the launch velocity if a shot was taken.
    pub fn pointer_up(&mut self) -> Option<Vec2> {
        let release = self.gesture.end()?;
        self.release(release)
    }

    /// Pointer cancelled by the host; the aim is abandoned
    pub fn pointer_cancel(&mut self) {
        if self.gesture.is_dragging() {
            self.reset();
        }
    }

    fn release(&mut self, release: Release) -> Option<Vec2> {
        match self
            .tuning
            .launch_velocity(release.delta, release.power, MIN_POWER)
        {
            Some(vel) => {
                self.shoot(vel);
                Some(vel)
            }
            None => {
                log::debug!("Pull too weak ({:.1}), shot cancelled", release.power);
                self.reset();
                None
            }
        }
    }
}
