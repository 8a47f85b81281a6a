//! Circular obstacles placed in the flow

use crate::core_types::Vec2;
use serde::{Deserialize, Serialize};

/// A solid circle in simulation space.
///
/// Obstacles are rasterized into the solid mask on every boundary pass, so
/// moving one only takes effect on the next tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Circle centre (simulation units)
    pub center: Vec2,
    /// Circle radius (simulation units)
    pub radius: f32,
}

impl Obstacle {
    /// Create a new obstacle
    #[must_use]
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// A circle at the middle of a square domain with radius `domain_size / 8`
    #[must_use]
    pub fn default_for_domain(domain_size: f32) -> Self {
        Self::new(
            Vec2::new(domain_size * 0.5, domain_size * 0.5),
            domain_size / 8.0,
        )
    }

    /// True if `point` lies inside or on the circle
    #[inline]
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        (point - self.center).norm_squared() <= self.radius * self.radius
    }

    /// Move the circle by `displacement`
    pub fn translate(&mut self, displacement: Vec2) {
        self.center += displacement;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_boundary_is_inclusive() {
        let obstacle = Obstacle::new(Vec2::new(1.0, 1.0), 0.5);
        assert!(obstacle.contains(Vec2::new(1.0, 1.0)));
        assert!(obstacle.contains(Vec2::new(1.5, 1.0)));
        assert!(!obstacle.contains(Vec2::new(1.51, 1.0)));
    }

    #[test]
    fn test_translate() {
        let mut obstacle = Obstacle::new(Vec2::new(0.25, 0.5), 0.1);
        obstacle.translate(Vec2::new(0.25, -0.25));
        assert_eq!(obstacle.center, Vec2::new(0.5, 0.25));
        assert_eq!(obstacle.radius, 0.1);
    }

    #[test]
    fn test_default_for_domain() {
        let obstacle = Obstacle::default_for_domain(2.0);
        assert_eq!(obstacle.center, Vec2::new(1.0, 1.0));
        assert_eq!(obstacle.radius, 0.25);
    }
}
