//! Canvas Toys - the interactive canvas core of the portfolio site
//!
//! Core modules:
//! - `sim`: Slingshot basketball simulation (physics, collisions, gestures)
//! - `paint`: Paint pad pixel buffer, strokes, flood fill and export
//! - `renderer`: Drawing surface abstraction and scene drawing
//! - `platform`: Frame driver and host scheduling seams
//! - `gallery`: Monthly drawing gallery (persistence collaborator)
//! - `tuning`: Data-driven game balance

pub mod error;
pub mod gallery;
pub mod paint;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::CanvasError;
pub use gallery::{GalleryItem, ImageStore, MonthlyGallery};
pub use paint::{PaintPad, PixelBuffer, Rgba, Tool};
pub use platform::{FrameDriver, FrameScheduler, Simulation, StopHandle};
pub use settings::Settings;
pub use tuning::{CourtVariant, Tuning};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Longest frame the simulation will integrate in one step (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 15.0;

    /// Hoop geometry
    pub const RIM_RADIUS: f32 = 30.0;
    pub const BACKBOARD_WIDTH: f32 = 100.0;
    pub const BACKBOARD_HEIGHT: f32 = 70.0;
    pub const NET_HEIGHT: f32 = 40.0;

    /// Pointer must land within this many ball radii to grab the ball
    pub const GRAB_RADIUS_FACTOR: f32 = 3.0;
    /// Maximum visual pull distance while aiming
    pub const MAX_PULL: f32 = 120.0;
    /// Releases weaker than this are treated as a cancelled shot
    pub const MIN_POWER: f32 = 20.0;

    /// Distance past the viewport edge before a shot counts as a miss
    pub const OUT_OF_BOUNDS_MARGIN: f32 = 100.0;
    /// Lifetime of a make/miss feedback event (seconds)
    pub const FEEDBACK_LIFETIME: f32 = 1.5;
    /// Delay between a make/miss and the ball snapping back (seconds)
    pub const RESET_DELAY: f32 = 0.5;

    /// Paint pad defaults
    pub const PAD_WIDTH: u32 = 400;
    pub const PAD_HEIGHT: u32 = 300;
    /// Largest pixel buffer allowed (4096 x 4096)
    pub const MAX_PIXELS: usize = 4096 * 4096;
    pub const MIN_BRUSH_SIZE: f32 = 1.0;
    pub const MAX_BRUSH_SIZE: f32 = 20.0;
    pub const DEFAULT_BRUSH_SIZE: f32 = 4.0;
}

/// Scale `v` down so its length does not exceed `max`, keeping direction
#[inline]
pub fn clamp_length(v: Vec2, max: f32) -> Vec2 {
    let len = v.length();
    if len > max && len > 0.0 {
        v * (max / len)
    } else {
        v
    }
}
