/// Plane geometry shared by every entity: a 2-D vector and the overlap test
/// used for all hit detection.

use std::ops::{Add, AddAssign};

use serde::Deserialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Vec2 { x, y }
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

/// "Fat AABB" test: the circle is treated as its bounding square, so corners
/// count as hits.  `rect_pos` is the top-left corner.
///
/// Edges touching exactly counts as an overlap.
pub fn circle_overlaps_rect(center: Vec2, radius: f32, rect_pos: Vec2, rect_size: Vec2) -> bool {
    center.x + radius >= rect_pos.x
        && center.x - radius <= rect_pos.x + rect_size.x
        && center.y + radius >= rect_pos.y
        && center.y - radius <= rect_pos.y + rect_size.y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_assign_matches_add() {
        let mut a = Vec2::new(1.5, -2.0);
        let b = Vec2::new(0.5, 4.0);
        let sum = a + b;
        a += b;
        assert_eq!(a, sum);
        assert_eq!(a, Vec2::new(2.0, 2.0));
    }

    #[test]
    fn corner_of_bounding_square_counts_as_hit() {
        // Circle centre is diagonally outside the rect, but its square touches.
        let hit = circle_overlaps_rect(
            Vec2::new(-3.0, -3.0),
            3.0,
            Vec2::ZERO,
            Vec2::new(10.0, 10.0),
        );
        assert!(hit);
    }
}
