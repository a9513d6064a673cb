use crate::rigid_body::{BodyId, RigidBody, Vec2};

use super::collision::{detect, Contact};
use super::integrate::integrate_body;

/// Velocity solver passes per step
const SOLVER_ITERATIONS: usize = 6;
/// Penetration tolerated before positional correction kicks in
const PENETRATION_SLOP: f32 = 0.05;
/// Fraction of the remaining penetration removed per step
const CORRECTION_PERCENT: f32 = 0.8;
/// Impacts slower than this (units per step) do not bounce
const RESTING_THRESHOLD: f32 = 1.0;

/// Global engine tunables
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EngineSettings {
    /// Gravity direction and strength
    pub gravity: Vec2,
    /// Multiplier applied to `gravity`
    pub gravity_scale: f32,
    /// Per-step velocity damping (0 = none)
    pub air_friction: f32,
    /// Speed cap (units per step) keeping bodies from tunneling through walls
    pub max_speed: f32,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, 1.0),
            gravity_scale: 0.001,
            air_friction: 0.01,
            max_speed: 40.0,
        }
    }
}

/// Manages all rigid bodies in the simulation
pub struct RigidBodySystem {
    bodies: Vec<RigidBody>,
    next_id: BodyId,
    settings: EngineSettings,
    contacts: Vec<Contact>,
}

impl RigidBodySystem {
    pub fn new() -> Self {
        Self::with_settings(EngineSettings::default())
    }

    pub fn with_settings(settings: EngineSettings) -> Self {
        Self {
            bodies: Vec::new(),
            next_id: 1,
            settings,
            contacts: Vec::new(),
        }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Add a body and return its freshly assigned ID.
    pub fn add_body(&mut self, mut body: RigidBody) -> BodyId {
        let id = self.next_id;
        self.next_id = self.next_id.saturating_add(1);
        body.id = id;
        body.force = Vec2::zero();
        self.bodies.push(body);
        id
    }

    /// Remove all bodies. IDs keep increasing so stale handles never alias new bodies.
    pub fn clear(&mut self) {
        self.bodies.clear();
        self.contacts.clear();
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn bodies(&self) -> &[RigidBody] {
        &self.bodies
    }

    pub fn body(&self, id: BodyId) -> Option<&RigidBody> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut RigidBody> {
        self.bodies.iter_mut().find(|b| b.id == id)
    }

    /// Accumulate a force on a body for the next step.
    /// Returns false if the body does not exist.
    pub fn apply_force(&mut self, id: BodyId, force: Vec2) -> bool {
        match self.body_mut(id) {
            Some(body) => {
                body.apply_force(force);
                true
            }
            None => false,
        }
    }

    /// First dynamic body whose shape contains `point`, preferring the closest center.
    pub fn dynamic_body_at(&self, point: Vec2) -> Option<BodyId> {
        self.bodies
            .iter()
            .filter(|b| !b.is_static && b.contains_point(point))
            .min_by(|a, b| {
                a.pos
                    .distance(point)
                    .partial_cmp(&b.pos.distance(point))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|b| b.id)
    }

    /// Advance the world by `dt` milliseconds.
    ///
    /// Order: integrate forces and velocities, then detect contacts,
    /// solve contact impulses, and finally push overlapping bodies apart.
    pub fn step(&mut self, dt: f32) {
        let settings = self.settings;
        for body in self.bodies.iter_mut() {
            integrate_body(body, &settings, dt);
        }

        self.collect_contacts();
        for _ in 0..SOLVER_ITERATIONS {
            self.solve_velocities();
        }
        self.correct_positions();
    }

    /// Brute-force broad phase; body counts stay in the tens.
    fn collect_contacts(&mut self) {
        self.contacts.clear();
        let n = self.bodies.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let (a, b) = (&self.bodies[i], &self.bodies[j]);
                if a.is_static && b.is_static {
                    continue;
                }
                let Some((normal, depth, point)) = detect(a, b) else {
                    continue;
                };

                let ra = point - a.pos;
                let rb = point - b.pos;
                let vn = (b.velocity_at(rb) - a.velocity_at(ra)).dot(normal);
                let target_vn = if vn < -RESTING_THRESHOLD {
                    -vn * a.restitution.max(b.restitution)
                } else {
                    0.0
                };

                self.contacts.push(Contact {
                    a: i,
                    b: j,
                    normal,
                    depth,
                    point,
                    target_vn,
                    normal_impulse: 0.0,
                    tangent_impulse: 0.0,
                });
            }
        }
    }

    /// One sequential-impulse pass over every contact.
    fn solve_velocities(&mut self) {
        for c in self.contacts.iter_mut() {
            let (a, b) = pair_mut(&mut self.bodies, c.a, c.b);
            let ra = c.point - a.pos;
            let rb = c.point - b.pos;
            let n = c.normal;

            // Normal impulse (accumulated, never pulling)
            let rv = b.velocity_at(rb) - a.velocity_at(ra);
            let vn = rv.dot(n);
            let k_n = effective_mass(a, b, ra, rb, n);
            if k_n <= 0.0 {
                continue;
            }
            let old = c.normal_impulse;
            c.normal_impulse = (old + (c.target_vn - vn) / k_n).max(0.0);
            let jn = c.normal_impulse - old;
            a.apply_impulse(-(n * jn), ra);
            b.apply_impulse(n * jn, rb);

            // Friction, bounded by the Coulomb cone
            let t = n.perp();
            let rv = b.velocity_at(rb) - a.velocity_at(ra);
            let vt = rv.dot(t);
            let k_t = effective_mass(a, b, ra, rb, t);
            if k_t <= 0.0 {
                continue;
            }
            let mu = (a.friction * b.friction).sqrt();
            let max_t = mu * c.normal_impulse;
            let old_t = c.tangent_impulse;
            c.tangent_impulse = (old_t - vt / k_t).clamp(-max_t, max_t);
            let jt = c.tangent_impulse - old_t;
            a.apply_impulse(-(t * jt), ra);
            b.apply_impulse(t * jt, rb);
        }
    }

    fn correct_positions(&mut self) {
        for c in self.contacts.iter() {
            let (a, b) = pair_mut(&mut self.bodies, c.a, c.b);
            let inv_sum = a.inv_mass + b.inv_mass;
            if inv_sum <= 0.0 {
                continue;
            }
            let amount = (c.depth - PENETRATION_SLOP).max(0.0) * CORRECTION_PERCENT / inv_sum;
            let shift = c.normal * amount;
            a.pos -= shift * a.inv_mass;
            b.pos += shift * b.inv_mass;
        }
    }
}

impl Default for RigidBodySystem {
    fn default() -> Self {
        Self::new()
    }
}

fn effective_mass(a: &RigidBody, b: &RigidBody, ra: Vec2, rb: Vec2, dir: Vec2) -> f32 {
    let rna = ra.cross(dir);
    let rnb = rb.cross(dir);
    a.inv_mass + b.inv_mass + rna * rna * a.inv_inertia + rnb * rnb * b.inv_inertia
}

/// Borrow two distinct bodies mutably (`i < j`).
fn pair_mut(bodies: &mut [RigidBody], i: usize, j: usize) -> (&mut RigidBody, &mut RigidBody) {
    debug_assert!(i < j);
    let (head, tail) = bodies.split_at_mut(j);
    (&mut head[i], &mut tail[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weightless() -> EngineSettings {
        EngineSettings {
            gravity: Vec2::zero(),
            air_friction: 0.0,
            ..EngineSettings::default()
        }
    }

    #[test]
    fn ids_are_unique_and_survive_clear() {
        let mut world = RigidBodySystem::new();
        let a = world.add_body(RigidBody::new_circle(0.0, 0.0, 1.0));
        let b = world.add_body(RigidBody::new_circle(5.0, 0.0, 1.0));
        assert_ne!(a, b);
        world.clear();
        assert_eq!(world.body_count(), 0);
        let c = world.add_body(RigidBody::new_circle(0.0, 0.0, 1.0));
        assert!(c > b);
        assert!(world.body(a).is_none());
    }

    #[test]
    fn ball_comes_to_rest_on_floor() {
        let mut world = RigidBodySystem::new();
        world.add_body(RigidBody::new_static_rect(50.0, 150.0, 200.0, 100.0));
        let ball = world.add_body(RigidBody::new_circle(50.0, 50.0, 10.0));

        for _ in 0..600 {
            world.step(1000.0 / 60.0);
        }

        let b = world.body(ball).expect("ball exists");
        assert!((b.pos.y - 90.0).abs() < 2.0, "ball y = {}", b.pos.y);
        assert!(b.velocity.length() < 0.5);
    }

    #[test]
    fn elastic_head_on_collision_transfers_momentum() {
        let mut world = RigidBodySystem::with_settings(weightless());
        let mut a = RigidBody::new_circle(0.0, 0.0, 10.0);
        a.set_restitution(1.0);
        a.friction = 0.0;
        a.velocity = Vec2::new(5.0, 0.0);
        let mut b = RigidBody::new_circle(25.0, 0.0, 10.0);
        b.set_restitution(1.0);
        b.friction = 0.0;
        let a = world.add_body(a);
        let b = world.add_body(b);

        for _ in 0..3 {
            world.step(16.0);
        }

        let va = world.body(a).expect("a").velocity.x;
        let vb = world.body(b).expect("b").velocity.x;
        assert!(va.abs() < 0.5, "a keeps {}", va);
        assert!(vb > 4.0, "b gets {}", vb);
    }

    #[test]
    fn static_bodies_never_move() {
        let mut world = RigidBodySystem::new();
        let floor = world.add_body(RigidBody::new_static_rect(50.0, 150.0, 200.0, 100.0));
        for i in 0..20 {
            world.add_body(RigidBody::new_circle(10.0 + i as f32 * 8.0, 50.0, 10.0));
        }
        for _ in 0..200 {
            world.step(16.0);
        }
        assert_eq!(world.body(floor).expect("floor").pos, Vec2::new(50.0, 150.0));
    }

    #[test]
    fn dynamic_body_at_picks_closest_dynamic() {
        let mut world = RigidBodySystem::with_settings(weightless());
        world.add_body(RigidBody::new_static_rect(0.0, 0.0, 100.0, 100.0));
        let near = world.add_body(RigidBody::new_circle(2.0, 0.0, 10.0));
        world.add_body(RigidBody::new_circle(8.0, 0.0, 10.0));

        assert_eq!(world.dynamic_body_at(Vec2::new(0.0, 0.0)), Some(near));
        assert_eq!(world.dynamic_body_at(Vec2::new(40.0, 40.0)), None);
    }

    #[test]
    fn apply_force_reports_missing_body() {
        let mut world = RigidBodySystem::new();
        assert!(!world.apply_force(42, Vec2::new(1.0, 0.0)));
    }
}
