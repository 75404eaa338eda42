//! Collision detection for axis-aligned rectangles
//!
//! The board, paddle and bricks are all axis-aligned rectangles; the ball is
//! approximated by its bounding box for overlap tests, which is how the
//! classic canvas game behaves. Reflection is a sign flip on one velocity
//! axis, so no normal computation is needed here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Center point of the rectangle
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Check if a point is inside the rectangle (edges inclusive)
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }
}

/// Check overlap between a ball (center ± radius, treated as an AABB) and a
/// rectangle. Strict inequalities: touching edges exactly does not count,
/// matching the per-tick discrete test of the original game.
#[inline]
pub fn ball_rect_overlap(center: Vec2, radius: f32, rect: &Rect) -> bool {
    center.x + radius > rect.x
        && center.x - radius < rect.right()
        && center.y + radius > rect.y
        && center.y - radius < rect.bottom()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_ball_rect_overlap_hit() {
        let brick = Rect::new(100.0, 80.0, 80.0, 25.0);
        // Ball center just above the brick, radius reaches in
        assert!(ball_rect_overlap(Vec2::new(140.0, 75.0), 8.0, &brick));
        // Ball fully inside
        assert!(ball_rect_overlap(Vec2::new(140.0, 92.0), 8.0, &brick));
    }

    #[test]
    fn test_ball_rect_overlap_miss() {
        let brick = Rect::new(100.0, 80.0, 80.0, 25.0);
        assert!(!ball_rect_overlap(Vec2::new(140.0, 60.0), 8.0, &brick));
        assert!(!ball_rect_overlap(Vec2::new(50.0, 92.0), 8.0, &brick));
        // Exactly touching the top edge is not an overlap
        assert!(!ball_rect_overlap(Vec2::new(140.0, 72.0), 8.0, &brick));
    }

    #[test]
    fn test_rect_contains_point() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert!(r.contains_point(Vec2::new(25.0, 40.0)));
        assert!(r.contains_point(Vec2::new(10.0, 20.0)));
        assert!(!r.contains_point(Vec2::new(41.0, 40.0)));
    }

    #[test]
    fn test_rect_center() {
        let r = Rect::new(100.0, 80.0, 80.0, 25.0);
        assert_eq!(r.center(), Vec2::new(140.0, 92.5));
    }

    proptest! {
        /// A ball centered inside a rectangle always overlaps it.
        #[test]
        fn prop_center_inside_overlaps(
            x in -500.0f32..500.0,
            y in -500.0f32..500.0,
            w in 1.0f32..200.0,
            h in 1.0f32..200.0,
            radius in 0.1f32..50.0,
            tx in 0.01f32..0.99,
            ty in 0.01f32..0.99,
        ) {
            let rect = Rect::new(x, y, w, h);
            let center = Vec2::new(x + w * tx, y + h * ty);
            prop_assert!(ball_rect_overlap(center, radius, &rect));
        }

        /// A ball farther than its radius from the rectangle never overlaps.
        #[test]
        fn prop_far_ball_misses(
            w in 1.0f32..200.0,
            h in 1.0f32..200.0,
            radius in 0.1f32..50.0,
            gap in 0.001f32..100.0,
        ) {
            let rect = Rect::new(0.0, 0.0, w, h);
            let center = Vec2::new(w + radius + gap, h / 2.0);
            prop_assert!(!ball_rect_overlap(center, radius, &rect));
        }
    }
}
