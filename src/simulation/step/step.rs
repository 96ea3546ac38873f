use tracing::{debug, info};

use crate::core::error::Result;

use super::{commands, PerfTimer, Sandbox};

pub(super) fn step(world: &mut Sandbox) -> Result<()> {
    let step_start = if world.perf_enabled { Some(PerfTimer::start()) } else { None };

    world.engine.step(&mut world.bodies, world.bounds)?;
    world.frame += 1;

    if let Some(timer) = step_start {
        let stats = world.engine.last_stats();
        let perf = &mut world.perf_stats;
        perf.reset();
        perf.step_ms = timer.elapsed_ms();
        perf.body_count = world.bodies.len() as u32;
        perf.spring_count = world.engine.spring_count() as u32;
        perf.pairs_checked = stats.pairs_checked;
        perf.contacts = stats.contacts;
        perf.degenerate_pairs = stats.degenerate_pairs;
        perf.springs_applied = stats.springs_applied;
        perf.boundary_hits = stats.boundary_hits;
    }
    Ok(())
}

pub(super) fn tick(world: &mut Sandbox) -> Result<bool> {
    if !world.running {
        return Ok(false);
    }
    step(world)?;
    Ok(true)
}

/// Restarting never inherits momentum from before the stop.
pub(super) fn start(world: &mut Sandbox) {
    commands::clear_forces(world);
    world.running = true;
    debug!(frame = world.frame, "frame loop started");
}

pub(super) fn stop(world: &mut Sandbox) {
    world.running = false;
    debug!(frame = world.frame, "frame loop stopped");
}

pub(super) fn reset(world: &mut Sandbox) {
    stop(world);
    commands::clear(world);
    // Wind is a force too; the UI slider is expected to follow.
    world.engine.clear_wind();
    let seed = world.engine.config().seed;
    world.engine.reseed(seed);
    start(world);
    info!("simulation reset");
}
