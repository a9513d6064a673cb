use super::perf_stats::StepStats;
use super::{DisplayImage, Simulation};

pub(super) fn enable_perf_metrics<I: DisplayImage>(sim: &mut Simulation<I>, enabled: bool) {
    sim.perf_enabled = enabled;
    if !enabled {
        sim.stats.last_step_ms = 0.0;
    }
}

pub(super) fn get_stats<I: DisplayImage>(sim: &Simulation<I>) -> StepStats {
    let mut stats = sim.stats.clone();
    stats.live_bodies = sim.live.len() as u32;
    stats.pending_spawns = sim.spawner.pending() as u32;
    stats
}
