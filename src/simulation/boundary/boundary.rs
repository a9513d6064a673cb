//! Boundary Set - floor and two walls just outside the viewport
//!
//! Built once from the viewport at start-up and never moved. The boundaries
//! are not live bodies, so the repulsion field never sees them.

use crate::rigid_body::{BodyId, RigidBody};
use crate::rigid_body_system::RigidBodySystem;

use super::Viewport;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundarySet {
    pub floor: BodyId,
    pub left_wall: BodyId,
    pub right_wall: BodyId,
}

impl BoundarySet {
    /// Insert the three static bodies into `world`.
    pub fn build(world: &mut RigidBodySystem, viewport: Viewport, thickness: f32) -> Self {
        let [floor, left, right] = boundary_bodies(viewport, thickness);
        Self {
            floor: world.add_body(floor),
            left_wall: world.add_body(left),
            right_wall: world.add_body(right),
        }
    }

    pub fn ids(&self) -> [BodyId; 3] {
        [self.floor, self.left_wall, self.right_wall]
    }
}

/// Floor centered just below the bottom edge; walls just outside the sides.
pub fn boundary_bodies(viewport: Viewport, thickness: f32) -> [RigidBody; 3] {
    let (w, h, t) = (viewport.width, viewport.height, thickness);
    [
        RigidBody::new_static_rect(w / 2.0, h + t / 2.0, w, t),
        RigidBody::new_static_rect(-t / 2.0, h / 2.0, t, h),
        RigidBody::new_static_rect(w + t / 2.0, h / 2.0, t, h),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rigid_body::{Shape, Vec2};

    #[test]
    fn geometry_matches_viewport() {
        let [floor, left, right] = boundary_bodies(Viewport::new(800.0, 600.0), 100.0);

        assert_eq!(floor.pos, Vec2::new(400.0, 650.0));
        assert_eq!(floor.shape, Shape::Rect { half_width: 400.0, half_height: 50.0 });
        assert_eq!(left.pos, Vec2::new(-50.0, 300.0));
        assert_eq!(left.shape, Shape::Rect { half_width: 50.0, half_height: 300.0 });
        assert_eq!(right.pos, Vec2::new(850.0, 300.0));
        assert!(floor.is_static && left.is_static && right.is_static);
    }

    #[test]
    fn build_inserts_exactly_three_statics() {
        let mut world = RigidBodySystem::new();
        let set = BoundarySet::build(&mut world, Viewport::new(320.0, 240.0), 100.0);
        assert_eq!(world.body_count(), 3);
        for id in set.ids() {
            assert!(world.body(id).expect("boundary").is_static);
        }
    }
}
