//! RigidBodySystem - Minimal impulse-based engine for the falling bodies
//!
//! Current behavior:
//! - Gravity plus a per-step force accumulator (cleared after integration).
//! - Circle/circle and circle/static-box contacts.
//! - Sequential impulses with restitution and Coulomb friction,
//!   followed by one positional correction pass.
//! - Static bodies are never integrated or displaced.

mod collision;
mod integrate;
mod system;

pub use system::{EngineSettings, RigidBodySystem};
