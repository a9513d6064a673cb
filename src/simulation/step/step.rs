use super::compositor::{composite, Surface};
use super::spawner::{spawn_body, SpawnTicket};
use super::{DisplayImage, LiveBody, PerfTimer, Simulation};

pub(super) fn tick<I: DisplayImage>(sim: &mut Simulation<I>, now_ms: f64) -> u32 {
    if !sim.is_running() {
        return 0;
    }

    // Spawns first so a body due this tick takes part in its steps.
    while let Some(ticket) = sim.spawner.pop_due(now_ms) {
        insert_spawn(sim, ticket, now_ms);
        if sim.spawner.pending() == 0 {
            log_info!("all {} bodies spawned", sim.live.len());
        }
    }

    let steps = sim.runner.advance(now_ms);
    for _ in 0..steps {
        step(sim);
    }
    sim.stats.last_tick_steps = steps;
    steps
}

/// Redeem one ticket. Refuses to touch a world that is no longer running.
fn insert_spawn<I: DisplayImage>(sim: &mut Simulation<I>, ticket: SpawnTicket, now_ms: f64) -> bool {
    if !sim.is_running() {
        log_warn!("dropping spawn #{} for a stopped simulation", ticket.index);
        return false;
    }

    let body = spawn_body(&mut sim.rng, sim.viewport, &sim.config);
    let spawn_pos = body.pos;
    let id = sim.world.add_body(body);
    sim.live.push(LiveBody {
        id,
        image: sim.image.clone(),
        index: ticket.index,
        spawn_pos,
        due_ms: ticket.due_ms,
        spawned_at_ms: now_ms,
    });
    true
}

pub(super) fn step<I: DisplayImage>(sim: &mut Simulation<I>) {
    if !sim.is_running() {
        return;
    }
    let timer = if sim.perf_enabled { Some(PerfTimer::start()) } else { None };

    // === BEFORE STEP: pointer hooks ===
    let mut repelled = 0;
    if let Some(pointer) = sim.pointer.current() {
        repelled = sim
            .repulsion
            .apply(&mut sim.world, sim.live.iter().map(|l| l.id), pointer);
        sim.grab.apply(&mut sim.world, pointer);
    }

    // === ENGINE STEP ===
    sim.world.step(sim.runner.step_ms() as f32);

    sim.stats.steps_total += 1;
    sim.stats.last_repelled = repelled as u32;
    if let Some(timer) = timer {
        sim.stats.last_step_ms = timer.elapsed_ms();
    }
}

pub(super) fn render<I, S>(sim: &mut Simulation<I>, surface: &mut S) -> usize
where
    I: DisplayImage,
    S: Surface<I> + ?Sized,
{
    if !sim.is_running() {
        return 0;
    }
    surface.clear(sim.viewport.width, sim.viewport.height);
    let drawn = composite(&sim.live, &sim.world, sim.config.display_size, surface);
    sim.stats.icons_drawn = drawn as u32;
    drawn
}
