//! Systems: the rigid-body engine plus the per-step interaction hooks
//! (pointer repulsion and grab) that feed forces into it.

pub mod pointer_constraint;
pub mod repulsion;
pub mod rigid_body;
pub mod rigid_body_system;
