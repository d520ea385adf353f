//! Basketball simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Time only advances through `tick(state, dt)`
//! - Pointer input arrives as plain points
//! - No rendering or platform dependencies

pub mod collision;
pub mod gesture;
pub mod state;
pub mod tick;

pub use collision::{
    CollisionResult, ball_backboard_overlap, ball_hoop_collision, ball_out_of_bounds,
    ball_rim_contact, ball_scores, bounce_velocity,
};
pub use gesture::{Drag, GestureTracker, Release};
pub use state::{
    Ball, FeedbackEvent, FeedbackKind, GameState, Hoop, ShotOutcome, ShotPhase,
};
pub use tick::tick;
