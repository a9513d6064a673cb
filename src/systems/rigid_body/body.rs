use super::vec2::Vec2;

/// Mass per unit area for dynamic bodies
pub const DEFAULT_DENSITY: f32 = 0.001;
/// Default Coulomb friction coefficient
pub const DEFAULT_FRICTION: f32 = 0.1;

/// Identifier handed out by the rigid body system (0 = unassigned)
pub type BodyId = u32;

/// Collision geometry in local coordinates (centered at 0,0)
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Circle { radius: f32 },
    /// Axis-aligned box; only used for static bodies
    Rect { half_width: f32, half_height: f32 },
}

/// Rigid Body - moves as a single unit
#[derive(Clone, Debug)]
pub struct RigidBody {
    // === Physics State ===
    /// World position (center of mass)
    pub pos: Vec2,
    /// Velocity vector (units per step)
    pub velocity: Vec2,
    /// Force accumulated for the current step, cleared after integration
    pub force: Vec2,
    /// Rotation angle (radians)
    pub angle: f32,
    /// Angular velocity (radians per step)
    pub angular_vel: f32,
    /// Total mass (0 for static bodies)
    pub mass: f32,
    pub inv_mass: f32,
    /// Moment of inertia for rotation
    pub moment_of_inertia: f32,
    pub inv_inertia: f32,
    /// Unique ID for this body
    pub id: BodyId,

    // === Shape Definition ===
    pub shape: Shape,
    /// Static bodies are never integrated and have infinite mass
    pub is_static: bool,

    // === Material properties ===
    /// Bounciness (0.0 = no bounce, 1.0 = full elastic)
    pub restitution: f32,
    pub friction: f32,
}

impl RigidBody {
    /// Create a dynamic circular body
    pub fn new_circle(x: f32, y: f32, radius: f32) -> Self {
        let radius = radius.max(0.5);
        let mass = DEFAULT_DENSITY * std::f32::consts::PI * radius * radius;
        // Solid disc: I = 1/2 m r²
        let moment_of_inertia = 0.5 * mass * radius * radius;

        Self {
            pos: Vec2::new(x, y),
            velocity: Vec2::zero(),
            force: Vec2::zero(),
            angle: 0.0,
            angular_vel: 0.0,
            mass,
            inv_mass: 1.0 / mass,
            moment_of_inertia,
            inv_inertia: 1.0 / moment_of_inertia,
            id: 0,
            shape: Shape::Circle { radius },
            is_static: false,
            restitution: 0.0,
            friction: DEFAULT_FRICTION,
        }
    }

    /// Create an immovable box centered at (x, y) with full size (w, h)
    pub fn new_static_rect(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            velocity: Vec2::zero(),
            force: Vec2::zero(),
            angle: 0.0,
            angular_vel: 0.0,
            mass: 0.0,
            inv_mass: 0.0,
            moment_of_inertia: 0.0,
            inv_inertia: 0.0,
            id: 0,
            shape: Shape::Rect {
                half_width: w * 0.5,
                half_height: h * 0.5,
            },
            is_static: true,
            restitution: 0.0,
            friction: DEFAULT_FRICTION,
        }
    }

    /// Radius of a circle body, `None` for boxes
    pub fn radius(&self) -> Option<f32> {
        match self.shape {
            Shape::Circle { radius } => Some(radius),
            Shape::Rect { .. } => None,
        }
    }

    /// Is the world point inside the body's collision shape?
    pub fn contains_point(&self, p: Vec2) -> bool {
        match self.shape {
            Shape::Circle { radius } => self.pos.distance(p) <= radius,
            Shape::Rect { half_width, half_height } => {
                (p.x - self.pos.x).abs() <= half_width && (p.y - self.pos.y).abs() <= half_height
            }
        }
    }

    /// Accumulate a force for the current step (ignored by static bodies)
    pub fn apply_force(&mut self, force: Vec2) {
        if self.is_static {
            return;
        }
        self.force += force;
    }

    /// Apply impulse at an offset from the center of mass
    pub fn apply_impulse(&mut self, impulse: Vec2, offset: Vec2) {
        if self.is_static {
            return;
        }
        self.velocity += impulse * self.inv_mass;
        self.angular_vel += offset.cross(impulse) * self.inv_inertia;
    }

    /// Velocity of the material point at `offset` from the center
    pub fn velocity_at(&self, offset: Vec2) -> Vec2 {
        self.velocity + offset.perp() * self.angular_vel
    }

    /// Set restitution (bounciness)
    pub fn set_restitution(&mut self, r: f32) {
        self.restitution = r.clamp(0.0, 1.0);
    }
}
