//! Simulation configuration
//!
//! Every tunable of the animation lives here. Hosts may pass a JSON object
//! with any subset of the fields (camelCase); missing fields keep their
//! defaults:
//!
//! ```json
//! { "bodyCount": 20, "staggerMs": 100, "repulsionRadius": 200 }
//! ```

use serde::{Deserialize, Serialize};

use crate::rigid_body::Vec2;
use crate::rigid_body_system::EngineSettings;

/// Upper bound on `bodyCount`; every body holds a spawn ticket and a world slot
pub const MAX_BODY_COUNT: u32 = 10_000;
/// Upper bound on `maxStepsPerTick`
pub const MAX_STEPS_PER_TICK: u32 = 240;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimulationConfig {
    // === Spawning ===
    /// Number of bodies dropped in
    pub body_count: u32,
    /// Delay between successive insertions (ms)
    pub stagger_ms: f64,
    /// Collision radius of every body
    pub body_radius: f32,
    /// Bounciness of every body
    pub restitution: f32,
    /// Bodies start between `-(band_top + band_height)` and `-band_top`
    pub spawn_band_top: f32,
    pub spawn_band_height: f32,
    /// Fixed RNG seed; `None` lets the host pick one
    pub seed: Option<u32>,

    // === Display ===
    /// Side of the square icon drawn over each body
    pub display_size: f32,

    // === Interaction ===
    pub repulsion_radius: f32,
    pub repulsion_strength: f32,
    pub grab_stiffness: f32,

    // === World ===
    pub wall_thickness: f32,
    pub gravity_x: f32,
    pub gravity_y: f32,
    pub gravity_scale: f32,
    pub air_friction: f32,
    pub max_speed: f32,

    // === Runner ===
    /// Fixed physics step (ms)
    pub step_ms: f64,
    /// Cap on catch-up steps per host tick
    pub max_steps_per_tick: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            body_count: 45,
            stagger_ms: 150.0,
            body_radius: 40.0,
            restitution: 0.9,
            spawn_band_top: 100.0,
            spawn_band_height: 200.0,
            seed: None,
            display_size: 100.0,
            repulsion_radius: 150.0,
            repulsion_strength: 0.01,
            grab_stiffness: 0.1,
            wall_thickness: 100.0,
            gravity_x: 0.0,
            gravity_y: 1.0,
            gravity_scale: 0.001,
            air_friction: 0.01,
            max_speed: 40.0,
            step_ms: 1000.0 / 60.0,
            max_steps_per_tick: 5,
        }
    }
}

impl SimulationConfig {
    /// Parse and validate a (partial) JSON config.
    pub fn from_json(json: &str) -> Result<Self, String> {
        let config: SimulationConfig = serde_json::from_str(json).map_err(|e| e.to_string())?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn validate(&self) -> Result<(), String> {
        check_positive("bodyRadius", self.body_radius as f64)?;
        check_positive("displaySize", self.display_size as f64)?;
        check_positive("repulsionRadius", self.repulsion_radius as f64)?;
        check_positive("wallThickness", self.wall_thickness as f64)?;
        check_positive("maxSpeed", self.max_speed as f64)?;
        check_positive("stepMs", self.step_ms)?;
        check_non_negative("staggerMs", self.stagger_ms)?;
        check_non_negative("repulsionStrength", self.repulsion_strength as f64)?;
        check_non_negative("spawnBandTop", self.spawn_band_top as f64)?;
        check_non_negative("spawnBandHeight", self.spawn_band_height as f64)?;
        check_non_negative("gravityScale", self.gravity_scale as f64)?;
        check_finite("gravityX", self.gravity_x as f64)?;
        check_finite("gravityY", self.gravity_y as f64)?;

        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(format!("restitution must be within [0, 1], got {}", self.restitution));
        }
        if !(0.0..1.0).contains(&self.air_friction) {
            return Err(format!("airFriction must be within [0, 1), got {}", self.air_friction));
        }
        if !(self.grab_stiffness > 0.0 && self.grab_stiffness <= 1.0) {
            return Err(format!("grabStiffness must be within (0, 1], got {}", self.grab_stiffness));
        }
        if self.body_count > MAX_BODY_COUNT {
            return Err(format!(
                "bodyCount must be at most {MAX_BODY_COUNT}, got {}",
                self.body_count
            ));
        }
        if !(1..=MAX_STEPS_PER_TICK).contains(&self.max_steps_per_tick) {
            return Err(format!(
                "maxStepsPerTick must be within [1, {MAX_STEPS_PER_TICK}], got {}",
                self.max_steps_per_tick
            ));
        }
        Ok(())
    }

    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            gravity: Vec2::new(self.gravity_x, self.gravity_y),
            gravity_scale: self.gravity_scale,
            air_friction: self.air_friction,
            max_speed: self.max_speed,
        }
    }
}

fn check_finite(name: &str, value: f64) -> Result<(), String> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(format!("{name} must be finite, got {value}"))
    }
}

fn check_positive(name: &str, value: f64) -> Result<(), String> {
    check_finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(format!("{name} must be positive, got {value}"))
    }
}

fn check_non_negative(name: &str, value: f64) -> Result<(), String> {
    check_finite(name, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(format!("{name} must not be negative, got {value}"))
    }
}
