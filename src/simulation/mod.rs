//! Sandbox - the live shape list plus the engine that moves it
//!
//! Replaces the canvas app's global shape array: the body list is owned here
//! and lent to `Engine::step` once per frame. Structural edits (spawn, copy,
//! delete, reset) only happen between steps because every entry point takes
//! `&mut self`.
//!
//! Orchestration only; the work lives in the submodules:
//! - commands: body factory, copy/delete, springs, external forces
//! - anchor: anchor/unanchor/toggle, hit-test toggling
//! - step: frame loop (tick/start/stop/reset) and perf capture
//! - render_extract: flat buffers for the JS canvas renderer

use crate::core::error::Result;
use crate::domain::{EngineConfig, ShapeKind};
use crate::physics::{Bounds, Engine, Spring, SpringId, StepStats};
use crate::rigid_body::{Body, BodyId};

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "step/step.rs"]
mod step;
#[path = "commands/commands.rs"]
mod commands;
#[path = "anchor/anchor.rs"]
mod anchor;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
#[path = "render/render_extract.rs"]
mod render_extract;
mod facade;
mod shared;

pub use facade::World;
pub use perf_stats::PerfStats;
pub use render_extract::{RENDER_STRIDE, SPRING_STRIDE};
pub use shared::SharedSandbox;

use perf_timer::PerfTimer;

/// Factory defaults
pub const DEFAULT_SIZE: f32 = 50.0;
pub const DEFAULT_MASS: f32 = 1.0;
/// Offset of a copied shape from its source
pub const COPY_OFFSET: f32 = 20.0;

pub(crate) struct RenderBuffers {
    /// RENDER_STRIDE floats per body: cx, cy, size, angle, kind
    shapes: Vec<f32>,
    /// One 0xAARRGGBB per body, same order as `shapes`
    colors: Vec<u32>,
    /// SPRING_STRIDE floats per spring: ax, ay, bx, by
    springs: Vec<f32>,
}

pub struct Sandbox {
    engine: Engine,
    bodies: Vec<Body>,
    bounds: Bounds,

    // State
    next_id: BodyId,
    running: bool,
    frame: u64,

    // Perf metrics
    perf_enabled: bool,
    perf_stats: PerfStats,

    render: RenderBuffers,
}

impl Sandbox {
    /// Empty, running sandbox with default tunables; the size must be finite and positive
    pub fn new(width: f32, height: f32) -> Result<Self> {
        init::create_sandbox(width, height, Engine::default())
    }

    pub fn with_config(width: f32, height: f32, config: EngineConfig) -> Result<Self> {
        init::create_sandbox(width, height, Engine::new(config)?)
    }

    pub fn with_config_json(width: f32, height: f32, json: &str) -> Result<Self> {
        Self::with_config(width, height, EngineConfig::from_json(json)?)
    }

    pub fn width(&self) -> f32 { self.bounds.width }

    pub fn height(&self) -> f32 { self.bounds.height }

    pub fn bounds(&self) -> Bounds { self.bounds }

    pub fn frame(&self) -> u64 { self.frame }

    pub fn engine(&self) -> &Engine { &self.engine }

    pub fn engine_mut(&mut self) -> &mut Engine { &mut self.engine }

    pub fn bodies(&self) -> &[Body] { &self.bodies }

    pub fn body_count(&self) -> usize { self.bodies.len() }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|b| b.id == id)
    }

    pub fn springs(&self) -> impl Iterator<Item = &Spring> {
        self.engine.springs()
    }

    pub fn spring_count(&self) -> usize { self.engine.spring_count() }

    pub fn resize(&mut self, width: f32, height: f32) -> Result<()> {
        settings::resize(self, width, height)
    }

    // === FACTORY / UI COMMANDS ===

    /// Spawn a default shape (size 50, white, mass 1)
    pub fn spawn(&mut self, kind: ShapeKind, x: f32, y: f32) -> Result<BodyId> {
        commands::spawn(self, kind, x, y, DEFAULT_SIZE, crate::domain::DEFAULT_COLOR, DEFAULT_MASS)
    }

    pub fn spawn_with(&mut self, kind: ShapeKind, x: f32, y: f32, size: f32, color: u32, mass: f32) -> Result<BodyId> {
        commands::spawn(self, kind, x, y, size, color, mass)
    }

    /// Delete a body and every spring attached to it
    pub fn remove_body(&mut self, id: BodyId) -> bool {
        commands::remove_body(self, id)
    }

    /// Offset copy that keeps velocity and spin
    pub fn copy_body(&mut self, id: BodyId) -> Result<BodyId> {
        commands::copy_body(self, id)
    }

    pub fn copy_anchored(&mut self) -> Vec<BodyId> {
        commands::copy_anchored(self)
    }

    pub fn connect(&mut self, a: BodyId, b: BodyId, rest_length: f32, stiffness: f32) -> Result<SpringId> {
        commands::connect(self, a, b, rest_length, stiffness)
    }

    pub fn connect_default(&mut self, a: BodyId, b: BodyId) -> Result<SpringId> {
        commands::connect(self, a, b, crate::physics::DEFAULT_REST_LENGTH, crate::physics::DEFAULT_STIFFNESS)
    }

    pub fn remove_spring(&mut self, id: SpringId) -> bool {
        self.engine.remove_spring(id)
    }

    pub fn apply_force(&mut self, id: BodyId, fx: f32, fy: f32) -> Result<()> {
        commands::apply_force(self, id, fx, fy)
    }

    /// Pull every free body toward (cx, cy); rejected as a whole if any velocity would overflow
    pub fn apply_force_field(&mut self, cx: f32, cy: f32, strength: f32) -> Result<()> {
        commands::apply_force_field(self, cx, cy, strength)
    }

    /// Zero every linear and angular velocity
    pub fn clear_forces(&mut self) {
        commands::clear_forces(self)
    }

    // === ANCHORS ===

    pub fn anchor(&mut self, id: BodyId) -> Result<()> {
        anchor::anchor(self, id)
    }

    pub fn unanchor(&mut self, id: BodyId) -> Result<()> {
        anchor::unanchor(self, id)
    }

    /// Returns the new anchored state
    pub fn toggle_anchor(&mut self, id: BodyId) -> Result<bool> {
        anchor::toggle_anchor(self, id)
    }

    /// Toggle every body under the point; returns how many were toggled
    pub fn anchor_at(&mut self, x: f32, y: f32) -> usize {
        anchor::anchor_at(self, x, y)
    }

    // === ENGINE SETTINGS ===

    pub fn set_wind(&mut self, wind: f32) -> Result<()> {
        settings::set_wind(self, wind)
    }

    pub fn toggle_magnetism(&mut self, enabled: bool) {
        settings::toggle_magnetism(self, enabled)
    }

    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    /// Last step perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        settings::get_perf_stats(self)
    }

    pub fn last_step_stats(&self) -> StepStats {
        self.engine.last_stats()
    }

    // === FRAME LOOP ===

    /// Advance one frame regardless of the run state
    pub fn step(&mut self) -> Result<()> {
        step::step(self)
    }

    /// Advance one frame if running. Returns whether a step happened.
    pub fn tick(&mut self) -> Result<bool> {
        step::tick(self)
    }

    /// Resume from a clean force state
    pub fn start(&mut self) {
        step::start(self)
    }

    pub fn stop(&mut self) {
        step::stop(self)
    }

    pub fn is_running(&self) -> bool { self.running }

    /// Drop all bodies and springs, zero wind, restart the loop
    pub fn reset(&mut self) {
        step::reset(self)
    }

    // === RENDERING ===

    /// Refill the render buffers; returns the body count written
    pub fn extract_render(&mut self) -> usize {
        render_extract::extract_render(self)
    }

    pub fn render_shapes(&self) -> &[f32] { &self.render.shapes }

    pub fn render_colors(&self) -> &[u32] { &self.render.colors }

    pub fn render_springs(&self) -> &[f32] { &self.render.springs }

    pub fn bodies_json(&self) -> Result<String> {
        render_extract::bodies_json(self)
    }

    fn next_body_id(&mut self) -> BodyId {
        let id = self.next_id;
        self.next_id = self.next_id.saturating_add(1);
        id
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
