//! RigidBody - A solid body that moves as a unit
//!
//! Dynamic bodies are circles; static bodies (floor and walls) are
//! axis-aligned boxes. Positions are body centers in simulation space.

mod vec2;
mod body;

pub use vec2::Vec2;
pub use body::{BodyId, RigidBody, Shape, DEFAULT_DENSITY, DEFAULT_FRICTION};
