//! Collision detection and response against the hoop
//!
//! The hoop is two collidable regions: the backboard rectangle and the rim
//! circle. Both responses are velocity multipliers, not an elastic bounce.

use glam::Vec2;

use super::state::Hoop;
use crate::tuning::Tuning;

/// Result of a collision check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionResult {
    None,
    Rim,
    Backboard,
}

impl CollisionResult {
    pub fn is_hit(&self) -> bool {
        !matches!(self, CollisionResult::None)
    }
}

/// Check the ball against the hoop. The backboard wins when both overlap.
pub fn ball_hoop_collision(ball_pos: Vec2, ball_radius: f32, hoop: &Hoop) -> CollisionResult {
    if ball_backboard_overlap(ball_pos, ball_radius, hoop) {
        return CollisionResult::Backboard;
    }
    if ball_rim_contact(ball_pos, ball_radius, hoop) {
        return CollisionResult::Rim;
    }
    CollisionResult::None
}

/// AABB overlap between the ball's bounding box and the backboard
pub fn ball_backboard_overlap(ball_pos: Vec2, ball_radius: f32, hoop: &Hoop) -> bool {
    let (min, max) = hoop.backboard_bounds();
    ball_pos.x - ball_radius < max.x
        && ball_pos.x + ball_radius > min.x
        && ball_pos.y - ball_radius < max.y
        && ball_pos.y + ball_radius > min.y
}

/// Ball center inside the annulus `(rim - r, rim + r)` around the hoop center
pub fn ball_rim_contact(ball_pos: Vec2, ball_radius: f32, hoop: &Hoop) -> bool {
    let dist = ball_pos.distance(hoop.pos);
    dist < hoop.rim_radius + ball_radius && dist > hoop.rim_radius - ball_radius
}

/// Apply the bounce for a collision
pub fn bounce_velocity(vel: Vec2, collision: CollisionResult, tuning: &Tuning) -> Vec2 {
    match collision {
        CollisionResult::None => vel,
        CollisionResult::Backboard => Vec2::new(
            vel.x * tuning.backboard_bounce_x,
            vel.y * tuning.backboard_bounce_y,
        ),
        CollisionResult::Rim => Vec2::new(vel.x * tuning.rim_bounce_x, vel.y * tuning.rim_bounce_y),
    }
}

/// A make: falling, inside the rim opening, and below the rim line
pub fn ball_scores(ball_pos: Vec2, ball_vel: Vec2, ball_radius: f32, hoop: &Hoop) -> bool {
    if ball_vel.y <= 0.0 {
        return false;
    }
    ball_pos.distance(hoop.pos) < hoop.rim_radius - ball_radius && ball_pos.y > hoop.pos.y
}

/// Ball left the viewport by more than `margin` (the top edge is open)
pub fn ball_out_of_bounds(ball_pos: Vec2, viewport: Vec2, margin: f32) -> bool {
    ball_pos.y > viewport.y + margin || ball_pos.x < -margin || ball_pos.x > viewport.x + margin
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::CourtVariant;

    fn hoop() -> Hoop {
        Hoop::new(Vec2::new(500.0, 120.0))
    }

    #[test]
    fn test_backboard_hit_reflects_vx() {
        let tuning = Tuning::default();
        let vel = bounce_velocity(Vec2::new(200.0, 100.0), CollisionResult::Backboard, &tuning);
        assert!(vel.x < 0.0);
        assert!((vel.x - (-140.0)).abs() < 1e-3);
        assert!((vel.y - 90.0).abs() < 1e-3);
    }

    #[test]
    fn test_rim_hit_reflects_both_axes() {
        let tuning = Tuning::default();
        let vel = bounce_velocity(Vec2::new(100.0, 200.0), CollisionResult::Rim, &tuning);
        assert!((vel.x - (-60.0)).abs() < 1e-3);
        assert!((vel.y - (-100.0)).abs() < 1e-3);
    }

    #[test]
    fn test_backboard_checked_before_rim() {
        // Touching the rim top while the ball's box reaches into the board
        let pos = Vec2::new(500.0, 95.0);
        assert!(ball_rim_contact(pos, 15.0, &hoop()));
        assert!(ball_backboard_overlap(pos, 15.0, &hoop()));
        assert_eq!(ball_hoop_collision(pos, 15.0, &hoop()), CollisionResult::Backboard);
    }

    #[test]
    fn test_rim_hit_outside_backboard() {
        let pos = Vec2::new(530.0, 130.0);
        assert!(!ball_backboard_overlap(pos, 15.0, &hoop()));
        assert_eq!(ball_hoop_collision(pos, 15.0, &hoop()), CollisionResult::Rim);
    }

    #[test]
    fn test_rim_reachable_on_both_courts() {
        for variant in [CourtVariant::Vertical, CourtVariant::Horizontal] {
            let hoop = Hoop::for_variant(variant, Vec2::new(500.0, 300.0));
            let (min, max) = hoop.backboard_bounds();
            let inside = |p: Vec2| p.cmpgt(min).all() && p.cmplt(max).all();
            assert!(!inside(hoop.pos), "{:?} board covers the rim", variant);

            // Near side and underside of the rim
            for offset in [Vec2::new(-hoop.rim_radius, 0.0), Vec2::new(0.0, hoop.rim_radius)] {
                assert_eq!(
                    ball_hoop_collision(hoop.pos + offset, 15.0, &hoop),
                    CollisionResult::Rim,
                    "{:?} at {:?}",
                    variant,
                    offset
                );
            }
        }
    }

    #[test]
    fn test_ball_in_rim_opening_is_not_a_rim_hit() {
        // Distance 5 from center is inside the inner radius 15
        let pos = Vec2::new(505.0, 120.0);
        assert_eq!(ball_hoop_collision(pos, 15.0, &hoop()), CollisionResult::None);
    }

    #[test]
    fn test_clear_miss() {
        let pos = Vec2::new(100.0, 500.0);
        assert_eq!(ball_hoop_collision(pos, 15.0, &hoop()), CollisionResult::None);
        assert!(!CollisionResult::None.is_hit());
    }

    #[test]
    fn test_scoring_needs_all_three_conditions() {
        let hoop = hoop();
        let inside_below = Vec2::new(505.0, 125.0);
        assert!(ball_scores(inside_below, Vec2::new(0.0, 50.0), 15.0, &hoop));

        // Moving up
        assert!(!ball_scores(inside_below, Vec2::new(0.0, -50.0), 15.0, &hoop));
        // Not moving vertically
        assert!(!ball_scores(inside_below, Vec2::new(10.0, 0.0), 15.0, &hoop));
        // Too far from the center (distance 15 is not < 15)
        assert!(!ball_scores(Vec2::new(500.0, 135.0), Vec2::new(0.0, 50.0), 15.0, &hoop));
        // Above the rim line
        assert!(!ball_scores(Vec2::new(505.0, 115.0), Vec2::new(0.0, 50.0), 15.0, &hoop));
    }

    #[test]
    fn test_out_of_bounds_margin() {
        let viewport = Vec2::new(800.0, 600.0);
        assert!(!ball_out_of_bounds(Vec2::new(400.0, 699.0), viewport, 100.0));
        assert!(ball_out_of_bounds(Vec2::new(400.0, 701.0), viewport, 100.0));
        assert!(ball_out_of_bounds(Vec2::new(-101.0, 300.0), viewport, 100.0));
        assert!(ball_out_of_bounds(Vec2::new(901.0, 300.0), viewport, 100.0));
        // Flying high above the court is not a miss
        assert!(!ball_out_of_bounds(Vec2::new(400.0, -500.0), viewport, 100.0));
    }
}
