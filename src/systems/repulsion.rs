//! Repulsion Field - pushes live bodies away from the pointer
//!
//! Force law: for a body at distance `d` from the pointer with `1 < d < R`,
//! apply `k * (1 - d/R)` along the pointer→body direction. Linear falloff to
//! zero at the radius; skipped at `d <= 1` where the direction is unstable.

use crate::rigid_body::{BodyId, Vec2};
use crate::rigid_body_system::RigidBodySystem;

/// Below this distance the direction is too unstable to push along
pub const MIN_REPULSION_DISTANCE: f32 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RepulsionField {
    radius: f32,
    strength: f32,
}

impl RepulsionField {
    pub fn new(radius: f32, strength: f32) -> Self {
        Self { radius, strength }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn strength(&self) -> f32 {
        self.strength
    }

    /// Force magnitude at distance `d` (0 outside the open interval (1, R))
    #[inline]
    pub fn magnitude_at(&self, d: f32) -> f32 {
        if d > MIN_REPULSION_DISTANCE && d < self.radius {
            self.strength * (1.0 - d / self.radius)
        } else {
            0.0
        }
    }

    /// Force on a body at `body_pos`, or `None` when it is out of reach
    pub fn force_on(&self, body_pos: Vec2, pointer: Vec2) -> Option<Vec2> {
        let delta = body_pos - pointer;
        let d = delta.length();
        let magnitude = self.magnitude_at(d);
        if magnitude <= 0.0 {
            return None;
        }
        Some(delta * (magnitude / d))
    }

    /// Inject forces for one step. Returns the number of bodies pushed.
    pub fn apply<I>(&self, world: &mut RigidBodySystem, bodies: I, pointer: Vec2) -> usize
    where
        I: IntoIterator<Item = BodyId>,
    {
        let mut pushed = 0;
        for id in bodies {
            let Some(body) = world.body_mut(id) else {
                continue;
            };
            if let Some(force) = self.force_on(body.pos, pointer) {
                body.apply_force(force);
                pushed += 1;
            }
        }
        pushed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rigid_body::RigidBody;

    const R: f32 = 150.0;
    const K: f32 = 0.01;

    #[test]
    fn magnitude_vanishes_at_and_beyond_radius() {
        let field = RepulsionField::new(R, K);
        assert_eq!(field.magnitude_at(R), 0.0);
        assert_eq!(field.magnitude_at(R + 0.5), 0.0);
        assert_eq!(field.magnitude_at(10_000.0), 0.0);
    }

    #[test]
    fn magnitude_is_skipped_at_singularity() {
        let field = RepulsionField::new(R, K);
        assert_eq!(field.magnitude_at(1.0), 0.0);
        assert_eq!(field.magnitude_at(0.0), 0.0);
    }

    #[test]
    fn magnitude_approaches_strength_near_one() {
        let field = RepulsionField::new(R, K);
        let m = field.magnitude_at(1.0 + 1e-4);
        assert!((m - K).abs() < K * 0.01, "m = {}", m);
    }

    #[test]
    fn magnitude_is_monotonically_non_increasing() {
        let field = RepulsionField::new(R, K);
        let mut prev = f32::INFINITY;
        let mut d = 1.01;
        while d < R {
            let m = field.magnitude_at(d);
            assert!(m <= prev, "not monotonic at d = {}", d);
            prev = m;
            d += 0.37;
        }
    }

    #[test]
    fn force_points_away_from_pointer() {
        let field = RepulsionField::new(R, K);
        let center = Vec2::new(400.0, 300.0);
        let body = Vec2::new(400.0 + 45.0, 300.0 - 60.0); // d = 75 = R/2
        let f = field.force_on(body, center).expect("inside radius");

        let dir = (body - center).normalize();
        let fdir = f.normalize();
        assert!((dir.x - fdir.x).abs() < 1e-5);
        assert!((dir.y - fdir.y).abs() < 1e-5);
        assert!((f.length() - K * 0.5).abs() < 1e-6);
    }

    #[test]
    fn apply_only_touches_bodies_in_range() {
        let field = RepulsionField::new(R, K);
        let mut world = RigidBodySystem::new();
        let near = world.add_body(RigidBody::new_circle(475.0, 300.0, 40.0));
        let far = world.add_body(RigidBody::new_circle(700.0, 300.0, 40.0));

        let pushed = field.apply(&mut world, [near, far], Vec2::new(400.0, 300.0));

        assert_eq!(pushed, 1);
        assert!(world.body(near).expect("near").force.x > 0.0);
        assert_eq!(world.body(far).expect("far").force, Vec2::zero());
    }

    #[test]
    fn apply_ignores_unknown_ids() {
        let field = RepulsionField::new(R, K);
        let mut world = RigidBodySystem::new();
        assert_eq!(field.apply(&mut world, [7, 8], Vec2::zero()), 0);
    }
}
