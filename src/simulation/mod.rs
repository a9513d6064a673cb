//! Simulation - lifecycle of one mounted animation
//!
//! States: `Uninitialized -> Running -> TornDown` (terminal).
//!
//! `start` builds the boundaries, schedules the staggered spawns and starts
//! the fixed-step runner. Each `tick(now)` redeems due spawn tickets, then
//! runs the owed physics steps; every step first injects the pointer hooks
//! (repulsion field, grab constraint) and then advances the engine.
//! `render` composites the icons over the current positions. `stop` cancels
//! pending spawns and clears the world; it is idempotent and nothing mutates
//! afterwards.

use std::rc::Rc;

use crate::core::random::Rng;
use crate::domain::config::SimulationConfig;
use crate::input::{PagePointer, PointerState, SurfaceMetrics};
use crate::pointer_constraint::GrabConstraint;
use crate::repulsion::RepulsionField;
use crate::rigid_body::{BodyId, Vec2};
use crate::rigid_body_system::RigidBodySystem;

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "spawn/spawner.rs"]
pub mod spawner;
#[path = "boundary/boundary.rs"]
pub mod boundary;
#[path = "step/runner.rs"]
pub mod runner;
#[path = "step/step.rs"]
mod step;
#[path = "commands/commands.rs"]
mod commands;
#[path = "render/compositor.rs"]
pub mod compositor;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;

pub use boundary::BoundarySet;
pub use compositor::{DisplayImage, Surface};
pub use perf_stats::StepStats;
pub use runner::Runner;
pub use spawner::{SpawnSchedule, SpawnTicket};

use perf_timer::PerfTimer;

/// Seed used when the config does not name one
pub const DEFAULT_SEED: u32 = 12345;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleState {
    Uninitialized,
    Running,
    TornDown,
}

/// Visible area in simulation units, fixed at construction
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }
}

/// A spawned body and the icon drawn over it
#[derive(Debug)]
pub struct LiveBody<I> {
    pub id: BodyId,
    pub image: Rc<I>,
    /// Ticket index (0-based spawn order)
    pub index: u32,
    pub spawn_pos: Vec2,
    pub due_ms: f64,
    pub spawned_at_ms: f64,
}

/// The simulation world plus everything that drives it
pub struct Simulation<I: DisplayImage> {
    config: SimulationConfig,
    viewport: Viewport,
    image: Rc<I>,
    state: LifecycleState,

    world: RigidBodySystem,
    boundaries: Option<BoundarySet>,
    live: Vec<LiveBody<I>>,

    spawner: SpawnSchedule,
    runner: Runner,
    rng: Rng,

    repulsion: RepulsionField,
    grab: GrabConstraint,
    pointer: PointerState,

    // Perf metrics
    perf_enabled: bool,
    stats: StepStats,
}

impl<I: DisplayImage> Simulation<I> {
    /// Validate the config and viewport. Nothing runs until [`Simulation::start`].
    pub fn new(viewport: Viewport, config: SimulationConfig, image: Rc<I>) -> Result<Self, String> {
        init::create_simulation(viewport, config, image)
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LifecycleState::Running
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn world(&self) -> &RigidBodySystem {
        &self.world
    }

    pub fn boundaries(&self) -> Option<BoundarySet> {
        self.boundaries
    }

    pub fn live_bodies(&self) -> &[LiveBody<I>] {
        &self.live
    }

    pub fn body_count(&self) -> usize {
        self.live.len()
    }

    pub fn pending_spawns(&self) -> usize {
        self.spawner.pending()
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    pub fn held_body(&self) -> Option<BodyId> {
        self.grab.held_body()
    }

    pub fn repulsion(&self) -> &RepulsionField {
        &self.repulsion
    }

    /// `Uninitialized -> Running`: boundaries, spawn schedule, runner.
    pub fn start(&mut self, now_ms: f64) -> Result<(), String> {
        init::start(self, now_ms)
    }

    /// Redeem due spawns and run the physics steps owed at `now_ms`.
    /// Returns the number of steps taken (always 0 unless running).
    pub fn tick(&mut self, now_ms: f64) -> u32 {
        step::tick(self, now_ms)
    }

    /// One fixed step: pointer hooks, then the engine.
    pub fn step(&mut self) {
        step::step(self);
    }

    /// Clear the surface and draw every ready icon. Returns icons drawn.
    pub fn render<S: Surface<I> + ?Sized>(&mut self, surface: &mut S) -> usize {
        step::render(self, surface)
    }

    /// Map a page-space move onto the pointer state (no-op on degenerate surfaces).
    pub fn pointer_moved(&mut self, event: PagePointer, surface: SurfaceMetrics) -> bool {
        commands::pointer_moved(self, event, surface)
    }

    /// Set an already mapped pointer position.
    pub fn set_pointer(&mut self, position: Vec2) -> bool {
        commands::set_pointer(self, position)
    }

    /// Press at the current pointer: grab the body under it, if any.
    pub fn pointer_pressed(&mut self) -> Option<BodyId> {
        commands::pointer_pressed(self)
    }

    pub fn pointer_released(&mut self) {
        commands::pointer_released(self)
    }

    /// `Running -> TornDown`. Safe to call in any state, any number of times.
    pub fn stop(&mut self) {
        init::teardown(self)
    }

    /// Enable or disable per-step timing (adds overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    pub fn stats(&self) -> StepStats {
        settings::get_stats(self)
    }
}

impl<I: DisplayImage> Drop for Simulation<I> {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
