//! Drag-to-shoot gesture tracking
//!
//! Turns pointer down/move/up into a slingshot release. The tracker only
//! knows about points; whether the ball may be grabbed at all (it must be
//! resting) is decided by the game state.

use glam::Vec2;

use crate::clamp_length;
use crate::consts::{GRAB_RADIUS_FACTOR, MAX_PULL};

/// An in-progress drag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drag {
    /// Where the pointer went down
    pub start: Vec2,
    /// Latest pointer position
    pub current: Vec2,
    /// Ball position when the drag began
    pub anchor: Vec2,
}

impl Drag {
    /// Pull vector, `start - current` (points where the ball will fly)
    #[inline]
    pub fn delta(&self) -> Vec2 {
        self.start - self.current
    }
}

/// A finished drag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Release {
    pub delta: Vec2,
    pub power: f32,
    /// Direction of `delta` in radians
    pub angle: f32,
}

#[derive(Debug, Clone, Default)]
pub struct GestureTracker {
    drag: Option<Drag>,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self { drag: None }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn drag(&self) -> Option<&Drag> {
        self.drag.as_ref()
    }

    /// Start a drag if the pointer landed close enough to the ball.
    ///
    /// A new begin replaces any drag already in progress.
    pub fn begin(&mut self, pointer: Vec2, ball_pos: Vec2, ball_radius: f32) -> bool {
        if (pointer - ball_pos).length() >= ball_radius * GRAB_RADIUS_FACTOR {
            return false;
        }
        self.drag = Some(Drag {
            start: pointer,
            current: pointer,
            anchor: ball_pos,
        });
        true
    }

    pub fn move_to(&mut self, pointer: Vec2) {
        if let Some(drag) = self.drag.as_mut() {
            drag.current = pointer;
        }
    }

    /// Finish the drag, returning the release (None if nothing was held)
    pub fn end(&mut self) -> Option<Release> {
        let drag = self.drag.take()?;
        let delta = drag.delta();
        Some(Release {
            delta,
            power: delta.length(),
            angle: delta.y.atan2(delta.x),
        })
    }

    /// Drop the drag without releasing
    pub fn cancel(&mut self) {
        self.drag = None;
    }

    /// Where to draw the ball relative to its anchor while aiming.
    ///
    /// Follows the pointer, capped at `MAX_PULL`.
    pub fn drag_offset(&self) -> Vec2 {
        match self.drag {
            Some(drag) => clamp_length(-drag.delta(), MAX_PULL),
            None => Vec2::ZERO,
        }
    }
}
