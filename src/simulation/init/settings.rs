use tracing::debug;

use crate::core::error::Result;
use crate::physics::Bounds;

use super::perf_stats::PerfStats;
use super::Sandbox;

pub(super) fn enable_perf_metrics(world: &mut Sandbox, enabled: bool) {
    world.perf_enabled = enabled;
    if !enabled {
        world.perf_stats.reset();
    }
}

pub(super) fn get_perf_stats(world: &Sandbox) -> PerfStats {
    world.perf_stats.clone()
}

pub(super) fn set_wind(world: &mut Sandbox, wind: f32) -> Result<()> {
    world.engine.set_wind(wind)
}

pub(super) fn toggle_magnetism(world: &mut Sandbox, enabled: bool) {
    world.engine.toggle_magnetism(enabled);
}

/// Canvas resized. Bodies left outside are pulled back in by the next step.
/// A degenerate size is refused and the old bounds stay.
pub(super) fn resize(world: &mut Sandbox, width: f32, height: f32) -> Result<()> {
    let bounds = Bounds::new(width, height);
    bounds.validate()?;
    debug!(width, height, "canvas resized");
    world.bounds = bounds;
    Ok(())
}
