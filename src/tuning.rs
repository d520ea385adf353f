//! Data-driven game balance
//!
//! The game ships in two court variants. The vertical court shoots straight
//! up at a hoop near the top edge; the horizontal court lobs across the
//! screen, so it launches harder and gets extra lift.
//!
//! Damping values are tuned by feel, not derived from physics.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Which court layout the game runs with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CourtVariant {
    /// Ball at the bottom center, hoop near the top
    #[default]
    Vertical,
    /// Ball at the bottom left, hoop on the right
    Horizontal,
}

impl CourtVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            CourtVariant::Vertical => "Vertical",
            CourtVariant::Horizontal => "Horizontal",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "vertical" | "v" => Some(CourtVariant::Vertical),
            "horizontal" | "h" => Some(CourtVariant::Horizontal),
            _ => None,
        }
    }

    /// Ball rest position for a viewport
    pub fn ball_rest(&self, width: f32, height: f32) -> Vec2 {
        match self {
            CourtVariant::Vertical => Vec2::new(width / 2.0, height - 80.0),
            CourtVariant::Horizontal => Vec2::new(120.0, height - 120.0),
        }
    }

    /// Hoop center for a viewport
    pub fn hoop_position(&self, width: f32, height: f32) -> Vec2 {
        match self {
            CourtVariant::Vertical => Vec2::new(width / 2.0, 120.0),
            CourtVariant::Horizontal => Vec2::new(width - 160.0, height * 0.35),
        }
    }

    /// Default tuning for this court
    pub fn tuning(&self) -> Tuning {
        match self {
            CourtVariant::Vertical => Tuning {
                gravity: 800.0,
                launch_gain: 3.0,
                max_velocity: 600.0,
                lift: 1.0,
                ..Tuning::default()
            },
            CourtVariant::Horizontal => Tuning {
                gravity: 900.0,
                launch_gain: 6.0,
                max_velocity: 1200.0,
                lift: 1.2,
                ..Tuning::default()
            },
        }
    }
}

/// Physics and launch constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    /// Downward acceleration (pixels/s²)
    pub gravity: f32,
    /// Launch speed per pixel of drag
    pub launch_gain: f32,
    /// Launch speed cap (pixels/s)
    pub max_velocity: f32,
    /// Multiplier on the vertical launch component
    pub lift: f32,
    /// Backboard bounce: vx multiplier (sign flip included)
    pub backboard_bounce_x: f32,
    /// Backboard bounce: vy multiplier
    pub backboard_bounce_y: f32,
    /// Rim bounce: vx multiplier
    pub rim_bounce_x: f32,
    /// Rim bounce: vy multiplier
    pub rim_bounce_y: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 800.0,
            launch_gain: 3.0,
            max_velocity: 600.0,
            lift: 1.0,
            backboard_bounce_x: -0.7,
            backboard_bounce_y: 0.9,
            rim_bounce_x: -0.6,
            rim_bounce_y: -0.5,
        }
    }
}

impl Tuning {
    /// Map a drag release to a launch velocity.
    ///
    /// `delta` is `start - current`, so pulling back launches forward.
    /// Returns `None` when the pull is too weak to count as a shot.
    pub fn launch_velocity(&self, delta: Vec2, power: f32, min_power: f32) -> Option<Vec2> {
        if power < min_power || power <= 0.0 {
            return None;
        }
        let scale = (power * self.launch_gain).min(self.max_velocity) / power;
        Some(Vec2::new(delta.x * scale, delta.y * scale * self.lift))
    }
}
