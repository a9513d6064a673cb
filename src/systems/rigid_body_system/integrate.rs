use crate::rigid_body::{RigidBody, Vec2};

use super::system::EngineSettings;

/// Semi-implicit Euler with air damping.
///
/// Velocities are measured per step, so accelerations are scaled by `dt²`
/// (`dt` in milliseconds). The accumulated force is consumed here.
pub(super) fn integrate_body(body: &mut RigidBody, settings: &EngineSettings, dt: f32) {
    if body.is_static {
        body.force = Vec2::zero();
        return;
    }

    let damping = 1.0 - settings.air_friction;
    let accel = body.force * body.inv_mass + settings.gravity * settings.gravity_scale;
    body.velocity = body.velocity * damping + accel * (dt * dt);

    // Clamp to keep bodies from tunneling through boundaries
    let speed = body.velocity.length();
    if speed > settings.max_speed {
        body.velocity = body.velocity * (settings.max_speed / speed);
    }

    body.pos += body.velocity;
    body.angular_vel *= damping;
    body.angle += body.angular_vel;
    body.force = Vec2::zero();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_body_accelerates_downward() {
        let settings = EngineSettings::default();
        let mut body = RigidBody::new_circle(0.0, 0.0, 10.0);
        integrate_body(&mut body, &settings, 1000.0 / 60.0);
        assert!(body.velocity.y > 0.0);
        assert!(body.pos.y > 0.0);
        assert_eq!(body.velocity.x, 0.0);
    }

    #[test]
    fn force_is_consumed_by_one_step() {
        let settings = EngineSettings {
            gravity: Vec2::zero(),
            ..EngineSettings::default()
        };
        let mut body = RigidBody::new_circle(0.0, 0.0, 10.0);
        body.apply_force(Vec2::new(0.01, 0.0));
        integrate_body(&mut body, &settings, 10.0);
        let vx = body.velocity.x;
        assert!(vx > 0.0);
        assert_eq!(body.force, Vec2::zero());

        // No new force: only damping acts on the second step.
        integrate_body(&mut body, &settings, 10.0);
        assert!(body.velocity.x < vx);
    }

    #[test]
    fn speed_is_capped() {
        let settings = EngineSettings::default();
        let mut body = RigidBody::new_circle(0.0, 0.0, 10.0);
        body.velocity = Vec2::new(1000.0, 0.0);
        integrate_body(&mut body, &settings, 16.0);
        assert!(body.velocity.length() <= settings.max_speed + 1e-3);
    }

    #[test]
    fn static_body_stays_put() {
        let settings = EngineSettings::default();
        let mut wall = RigidBody::new_static_rect(5.0, 5.0, 10.0, 10.0);
        integrate_body(&mut wall, &settings, 16.0);
        assert_eq!(wall.pos, Vec2::new(5.0, 5.0));
    }
}
