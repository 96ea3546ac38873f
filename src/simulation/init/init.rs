use crate::core::error::Result;
use crate::physics::{Bounds, Engine};

use super::perf_stats::PerfStats;
use super::{RenderBuffers, Sandbox};

/// Bodies the buffers are sized for up front; they grow past it on demand.
const INITIAL_BODY_CAPACITY: usize = 64;

pub(super) fn create_sandbox(width: f32, height: f32, engine: Engine) -> Result<Sandbox> {
    let bounds = Bounds::new(width, height);
    bounds.validate()?;

    Ok(Sandbox {
        engine,
        bodies: Vec::with_capacity(INITIAL_BODY_CAPACITY),
        bounds,
        next_id: 1,
        running: true,
        frame: 0,
        perf_enabled: false,
        perf_stats: PerfStats::default(),
        render: RenderBuffers {
            shapes: Vec::with_capacity(INITIAL_BODY_CAPACITY * super::RENDER_STRIDE),
            colors: Vec::with_capacity(INITIAL_BODY_CAPACITY),
            springs: Vec::new(),
        },
    })
}
