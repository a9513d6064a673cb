use std::rc::Rc;

use crate::core::random::Rng;
use crate::domain::config::SimulationConfig;
use crate::input::PointerState;
use crate::pointer_constraint::GrabConstraint;
use crate::repulsion::RepulsionField;
use crate::rigid_body_system::RigidBodySystem;

use super::perf_stats::StepStats;
use super::{
    BoundarySet, DisplayImage, LifecycleState, Runner, Simulation, SpawnSchedule, Viewport,
    DEFAULT_SEED,
};

pub(super) fn create_simulation<I: DisplayImage>(
    viewport: Viewport,
    config: SimulationConfig,
    image: Rc<I>,
) -> Result<Simulation<I>, String> {
    config.validate()?;
    if !(viewport.width.is_finite() && viewport.width > 0.0)
        || !(viewport.height.is_finite() && viewport.height > 0.0)
    {
        return Err(format!(
            "viewport must be positive, got {}x{}",
            viewport.width, viewport.height
        ));
    }

    Ok(Simulation {
        world: RigidBodySystem::with_settings(config.engine_settings()),
        boundaries: None,
        live: Vec::new(),
        spawner: SpawnSchedule::new(),
        runner: Runner::new(config.step_ms, config.max_steps_per_tick),
        rng: Rng::new(config.seed.unwrap_or(DEFAULT_SEED)),
        repulsion: RepulsionField::new(config.repulsion_radius, config.repulsion_strength),
        grab: GrabConstraint::new(config.grab_stiffness),
        pointer: PointerState::new(),
        perf_enabled: false,
        stats: StepStats::default(),
        state: LifecycleState::Uninitialized,
        config,
        viewport,
        image,
    })
}

pub(super) fn start<I: DisplayImage>(sim: &mut Simulation<I>, now_ms: f64) -> Result<(), String> {
    match sim.state {
        LifecycleState::Uninitialized => {}
        LifecycleState::Running => return Err("simulation is already running".to_string()),
        LifecycleState::TornDown => {
            return Err("simulation was torn down; construct a new one".to_string())
        }
    }

    sim.boundaries = Some(BoundarySet::build(
        &mut sim.world,
        sim.viewport,
        sim.config.wall_thickness,
    ));
    sim.spawner
        .schedule(sim.config.body_count, sim.config.stagger_ms, now_ms);
    sim.runner.start(now_ms);
    sim.state = LifecycleState::Running;

    log_info!(
        "simulation started: {}x{} viewport, {} bodies every {} ms",
        sim.viewport.width,
        sim.viewport.height,
        sim.config.body_count,
        sim.config.stagger_ms
    );
    Ok(())
}

pub(super) fn teardown<I: DisplayImage>(sim: &mut Simulation<I>) {
    if sim.state == LifecycleState::TornDown {
        return;
    }
    let was_running = sim.state == LifecycleState::Running;
    sim.state = LifecycleState::TornDown;

    sim.runner.stop();
    let cancelled = sim.spawner.cancel();
    sim.grab.release();
    // Drops our image handles only; the shared icon lives on.
    sim.live.clear();
    sim.boundaries = None;
    sim.world.clear();
    sim.pointer = PointerState::new();
    sim.stats.reset();

    if was_running {
        log_info!("simulation torn down ({} pending spawns cancelled)", cancelled);
    }
}
