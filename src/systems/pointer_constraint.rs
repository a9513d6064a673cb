//! Pointer Grab Constraint - soft spring between the pointer and one held body
//!
//! Press picks the dynamic body under the pointer; every step the grabbed
//! anchor is pulled towards the pointer by `stiffness` of the remaining gap.
//! Release drops the link. Nothing is drawn for it.

use crate::rigid_body::{BodyId, Vec2};
use crate::rigid_body_system::RigidBodySystem;

#[derive(Clone, Copy, Debug, PartialEq)]
struct Grab {
    body: BodyId,
    /// Anchor in the body's local (unrotated) frame
    local_anchor: Vec2,
}

#[derive(Clone, Debug)]
pub struct GrabConstraint {
    stiffness: f32,
    grab: Option<Grab>,
}

impl GrabConstraint {
    pub fn new(stiffness: f32) -> Self {
        Self {
            stiffness: stiffness.clamp(0.0, 1.0),
            grab: None,
        }
    }

    pub fn stiffness(&self) -> f32 {
        self.stiffness
    }

    pub fn held_body(&self) -> Option<BodyId> {
        self.grab.map(|g| g.body)
    }

    /// Try to pick up the body under `pointer`. Returns the grabbed ID.
    pub fn press(&mut self, world: &RigidBodySystem, pointer: Vec2) -> Option<BodyId> {
        let id = world.dynamic_body_at(pointer)?;
        let body = world.body(id)?;
        self.grab = Some(Grab {
            body: id,
            local_anchor: rotate(pointer - body.pos, -body.angle),
        });
        Some(id)
    }

    pub fn release(&mut self) {
        self.grab = None;
    }

    /// Pull the held body towards the pointer (run before integration).
    pub fn apply(&mut self, world: &mut RigidBodySystem, pointer: Vec2) {
        let Some(grab) = self.grab else {
            return;
        };
        let Some(body) = world.body_mut(grab.body) else {
            // Body vanished (world cleared): the link goes with it.
            self.grab = None;
            return;
        };

        let anchor = body.pos + rotate(grab.local_anchor, body.angle);
        let correction = (pointer - anchor) * self.stiffness;
        body.pos += correction;
        body.velocity = body.velocity * (1.0 - self.stiffness) + correction;
        body.angular_vel *= 1.0 - self.stiffness;
    }
}

fn rotate(v: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rigid_body::RigidBody;
    use crate::rigid_body_system::EngineSettings;

    fn weightless_world() -> RigidBodySystem {
        RigidBodySystem::with_settings(EngineSettings {
            gravity: Vec2::zero(),
            ..EngineSettings::default()
        })
    }

    #[test]
    fn press_on_empty_space_grabs_nothing() {
        let world = weightless_world();
        let mut grab = GrabConstraint::new(0.1);
        assert_eq!(grab.press(&world, Vec2::new(10.0, 10.0)), None);
        assert_eq!(grab.held_body(), None);
    }

    #[test]
    fn press_ignores_static_bodies() {
        let mut world = weightless_world();
        world.add_body(RigidBody::new_static_rect(0.0, 0.0, 100.0, 100.0));
        let mut grab = GrabConstraint::new(0.1);
        assert_eq!(grab.press(&world, Vec2::zero()), None);
    }

    #[test]
    fn dragging_pulls_body_towards_pointer() {
        let mut world = weightless_world();
        let id = world.add_body(RigidBody::new_circle(100.0, 100.0, 40.0));
        let mut grab = GrabConstraint::new(0.1);
        assert_eq!(grab.press(&world, Vec2::new(110.0, 100.0)), Some(id));

        let target = Vec2::new(300.0, 100.0);
        for _ in 0..120 {
            grab.apply(&mut world, target);
            world.step(16.0);
        }

        let body = world.body(id).expect("body");
        // Anchor was grabbed 10 units right of center.
        assert!((body.pos.x - 290.0).abs() < 5.0, "x = {}", body.pos.x);
    }

    #[test]
    fn release_detaches() {
        let mut world = weightless_world();
        let id = world.add_body(RigidBody::new_circle(0.0, 0.0, 40.0));
        let mut grab = GrabConstraint::new(0.1);
        grab.press(&world, Vec2::zero());
        grab.release();
        grab.apply(&mut world, Vec2::new(500.0, 0.0));
        assert_eq!(world.body(id).expect("body").pos, Vec2::zero());
    }

    #[test]
    fn grab_is_dropped_when_body_disappears() {
        let mut world = weightless_world();
        world.add_body(RigidBody::new_circle(0.0, 0.0, 40.0));
        let mut grab = GrabConstraint::new(0.1);
        grab.press(&world, Vec2::zero());
        world.clear();
        grab.apply(&mut world, Vec2::new(5.0, 5.0));
        assert_eq!(grab.held_body(), None);
    }
}
