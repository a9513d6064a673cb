//! Falling Letters - icon-skinned bodies that fall, bounce and dodge the pointer
//!
//! Architecture:
//! - core/          - Logging macros, seeded RNG
//! - domain/        - Configuration, icon artwork
//! - input          - Page-to-simulation pointer mapping
//! - systems/       - Rigid-body engine, repulsion field, grab constraint
//! - simulation/    - Lifecycle, spawning, boundaries, stepping, compositing
//! - api/           - Browser host (canvas, listeners, animation frames)

// Logging macros (must be first for macro export!)
#[macro_use]
pub mod core;
pub mod domain;
pub mod input;
pub mod systems;
pub mod simulation;
pub mod api;

// Short paths for the engine pieces used across the crate
pub use systems::pointer_constraint;
pub use systems::repulsion;
pub use systems::rigid_body;
pub use systems::rigid_body_system;

use wasm_bindgen::prelude::*;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the module
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    log_info!("Falling Letters {} initialized", env!("CARGO_PKG_VERSION"));
}

/// Get module version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use api::wasm::FallingLetters;
pub use domain::config::SimulationConfig;
pub use simulation::{LifecycleState, Simulation, StepStats, Viewport};
