//! Circle-circle collision detection and separation
//!
//! Every interaction in the game is a circle overlap. The signed deltas are
//! kept alongside the hit flag because the push-out response reuses them.

use glam::Vec2;

use super::object::Body;

/// Result of a circle overlap check between `a` and `b`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collision {
    /// Circles overlap (strictly closer than the radii sum)
    pub hit: bool,
    /// Centre distance
    pub distance: f32,
    pub sum_of_radii: f32,
    /// `a.x - b.x`
    pub dx: f32,
    /// `a.y - b.y`
    pub dy: f32,
}

impl Collision {
    pub fn between(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> Self {
        let dx = a.x - b.x;
        let dy = a.y - b.y;
        let distance = dy.hypot(dx);
        let sum_of_radii = a_radius + b_radius;
        Self {
            hit: distance < sum_of_radii,
            distance,
            sum_of_radii,
            dx,
            dy,
        }
    }

    /// How deep the circles interpenetrate (negative when apart)
    pub fn overlap(&self) -> f32 {
        self.sum_of_radii - self.distance
    }

    /// Unit vector from `b` toward `a`; straight up when centres coincide
    pub fn separation(&self) -> Vec2 {
        if self.distance > 0.0 {
            Vec2::new(self.dx / self.distance, self.dy / self.distance)
        } else {
            Vec2::NEG_Y
        }
    }

    /// Where to put `a` so it rests one pixel outside `b` (at `anchor`)
    pub fn push_out(&self, anchor: Vec2) -> Vec2 {
        anchor + self.separation() * (self.sum_of_radii + 1.0)
    }
}

/// Check two bodies for overlap
pub fn check_collision<A: Body + ?Sized, B: Body + ?Sized>(a: &A, b: &B) -> Collision {
    Collision::between(
        a.position(),
        a.collision_radius(),
        b.position(),
        b.collision_radius(),
    )
}

/// Move `position` (radius `radius`) out of every blocker it overlaps
pub fn resolve_against<'a, I>(mut position: Vec2, radius: f32, blockers: I) -> Vec2
where
    I: IntoIterator<Item = &'a dyn Body>,
{
    for blocker in blockers {
        let hit = Collision::between(
            position,
            radius,
            blocker.position(),
            blocker.collision_radius(),
        );
        if hit.hit {
            position = hit.push_out(blocker.position());
        }
    }
    position
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    struct Circle(Vec2, f32);

    impl Body for Circle {
        fn position(&self) -> Vec2 {
            self.0
        }
        fn collision_radius(&self) -> f32 {
            self.1
        }
    }

    #[test]
    fn test_overlap_reports_deltas() {
        let a = Circle(Vec2::new(10.0, 0.0), 6.0);
        let b = Circle(Vec2::new(0.0, 0.0), 6.0);
        let result = check_collision(&a, &b);
        assert!(result.hit);
        assert!((result.distance - 10.0).abs() < 1e-5);
        assert_eq!(result.sum_of_radii, 12.0);
        assert_eq!(result.dx, 10.0);
        assert_eq!(result.dy, 0.0);
        assert!((result.overlap() - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_touching_is_not_a_hit() {
        let result = Collision::between(Vec2::ZERO, 5.0, Vec2::new(10.0, 0.0), 5.0);
        assert!(!result.hit);
    }

    #[test]
    fn test_push_out_of_coincident_goes_up() {
        let result = Collision::between(Vec2::ONE, 5.0, Vec2::ONE, 5.0);
        assert!(result.hit);
        let pushed = result.push_out(Vec2::ONE);
        assert!((pushed.x - 1.0).abs() < 1e-5);
        assert!((pushed.y - (1.0 - 11.0)).abs() < 1e-5);
    }

    #[test]
    fn test_resolve_against_multiple_blockers() {
        let rock = Circle(Vec2::new(0.0, 0.0), 40.0);
        let blockers: [&dyn Body; 1] = [&rock];
        let resolved = resolve_against(Vec2::new(30.0, 0.0), 30.0, blockers);
        assert!((resolved.x - 71.0).abs() < 1e-4);
        assert!(resolved.y.abs() < 1e-4);
    }

    proptest! {
        #[test]
        fn prop_collision_is_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0,
            ar in 1.0f32..80.0, br in 1.0f32..80.0,
        ) {
            let ab = Collision::between(Vec2::new(ax, ay), ar, Vec2::new(bx, by), br);
            let ba = Collision::between(Vec2::new(bx, by), br, Vec2::new(ax, ay), ar);
            prop_assert_eq!(ab.hit, ba.hit);
            prop_assert!((ab.distance - ba.distance).abs() < 1e-3);
            prop_assert_eq!(ab.dx, -ba.dx);
            prop_assert_eq!(ab.dy, -ba.dy);
        }

        #[test]
        fn prop_push_out_clears_overlap(
            ax in -100.0f32..100.0, ay in -100.0f32..100.0,
            ar in 1.0f32..60.0, br in 1.0f32..60.0,
        ) {
            let a = Vec2::new(ax, ay);
            let hit = Collision::between(a, ar, Vec2::ZERO, br);
            prop_assume!(hit.hit);
            let moved = hit.push_out(Vec2::ZERO);
            let after = Collision::between(moved, ar, Vec2::ZERO, br);
            prop_assert!(!after.hit);
        }
    }
}
