use tracing::warn;
use wasm_bindgen::prelude::*;

use crate::core::error::{EngineError, Result};
use crate::domain::ShapeKind;
use crate::rigid_body::BodyId;

use super::perf_stats::PerfStats;
use super::Sandbox;

fn js_err(e: EngineError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// JS ids are plain numbers; 0 is never allocated, so it doubles as "not created".
fn id_or_zero(op: &'static str, result: Result<BodyId>) -> u32 {
    match result {
        Ok(id) => id,
        Err(e) => {
            warn!(op, error = %e, "body not created");
            0
        }
    }
}

#[wasm_bindgen]
pub struct World {
    core: Sandbox,
}

#[wasm_bindgen]
impl World {
    /// Empty running world sized to the canvas
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32) -> std::result::Result<World, JsValue> {
        let core = Sandbox::new(width, height).map_err(js_err)?;
        Ok(Self { core })
    }

    /// Build a world from a JSON tunables object; missing keys take defaults
    #[wasm_bindgen(js_name = withConfigJson)]
    pub fn with_config_json(width: f32, height: f32, json: String) -> std::result::Result<World, JsValue> {
        let core = Sandbox::with_config_json(width, height, &json).map_err(js_err)?;
        Ok(Self { core })
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> f32 { self.core.width() }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> f32 { self.core.height() }

    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u64 { self.core.frame() }

    #[wasm_bindgen(getter)]
    pub fn body_count(&self) -> usize { self.core.body_count() }

    #[wasm_bindgen(getter)]
    pub fn spring_count(&self) -> usize { self.core.spring_count() }

    pub fn resize(&mut self, width: f32, height: f32) -> std::result::Result<(), JsValue> {
        self.core.resize(width, height).map_err(js_err)
    }

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.core.enable_perf_metrics(enabled);
    }

    /// Get last step perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        self.core.get_perf_stats()
    }

    // === TUNABLES ===

    pub fn set_wind(&mut self, wind: f32) -> std::result::Result<(), JsValue> {
        self.core.set_wind(wind).map_err(js_err)
    }

    pub fn get_wind(&self) -> f32 { self.core.engine().wind() }

    pub fn toggle_magnetism(&mut self, enabled: bool) {
        self.core.toggle_magnetism(enabled);
    }

    pub fn get_magnetism(&self) -> bool { self.core.engine().magnetism() }

    pub fn set_gravity(&mut self, gravity: f32) -> std::result::Result<(), JsValue> {
        self.core.engine_mut().set_gravity(gravity).map_err(js_err)
    }

    pub fn get_gravity(&self) -> f32 { self.core.engine().gravity() }

    pub fn set_bounce(&mut self, bounce: f32) -> std::result::Result<(), JsValue> {
        self.core.engine_mut().set_bounce(bounce).map_err(js_err)
    }

    pub fn get_bounce(&self) -> f32 { self.core.engine().bounce() }

    pub fn set_friction(&mut self, friction: f32) -> std::result::Result<(), JsValue> {
        self.core.engine_mut().set_friction(friction).map_err(js_err)
    }

    pub fn get_friction(&self) -> f32 { self.core.engine().friction() }

    pub fn set_air_drag(&mut self, air_drag: f32) -> std::result::Result<(), JsValue> {
        self.core.engine_mut().set_air_drag(air_drag).map_err(js_err)
    }

    pub fn get_air_drag(&self) -> f32 { self.core.engine().air_drag() }

    pub fn reseed(&mut self, seed: u64) {
        self.core.engine_mut().reseed(seed);
    }

    // === SHAPES ===

    /// Spawn a default shape (size 50, white). Returns the id, or 0 for a bad kind/position.
    pub fn spawn(&mut self, kind: u8, x: f32, y: f32) -> u32 {
        let result = ShapeKind::try_from(kind).and_then(|kind| self.core.spawn(kind, x, y));
        id_or_zero("spawn", result)
    }

    /// Spawn with explicit size, 0xAARRGGBB colour and mass. Returns 0 on rejection.
    pub fn spawn_with(&mut self, kind: u8, x: f32, y: f32, size: f32, color: u32, mass: f32) -> u32 {
        let result = ShapeKind::try_from(kind)
            .and_then(|kind| self.core.spawn_with(kind, x, y, size, color, mass));
        id_or_zero("spawn_with", result)
    }

    /// Delete a body and its springs
    pub fn remove_body(&mut self, id: u32) -> bool {
        self.core.remove_body(id)
    }

    /// Returns the copy's id, or 0 when `id` is not live
    pub fn copy_body(&mut self, id: u32) -> u32 {
        id_or_zero("copy_body", self.core.copy_body(id))
    }

    /// Copy every anchored body; returns the new ids
    pub fn copy_anchored(&mut self) -> Vec<u32> {
        self.core.copy_anchored()
    }

    pub fn apply_force(&mut self, id: u32, fx: f32, fy: f32) -> std::result::Result<(), JsValue> {
        self.core.apply_force(id, fx, fy).map_err(js_err)
    }

    pub fn apply_force_field(&mut self, cx: f32, cy: f32, strength: f32) -> std::result::Result<(), JsValue> {
        self.core.apply_force_field(cx, cy, strength).map_err(js_err)
    }

    pub fn clear_forces(&mut self) {
        self.core.clear_forces();
    }

    // === ANCHORS ===

    pub fn anchor(&mut self, id: u32) -> std::result::Result<(), JsValue> {
        self.core.anchor(id).map_err(js_err)
    }

    pub fn unanchor(&mut self, id: u32) -> std::result::Result<(), JsValue> {
        self.core.unanchor(id).map_err(js_err)
    }

    pub fn toggle_anchor(&mut self, id: u32) -> std::result::Result<bool, JsValue> {
        self.core.toggle_anchor(id).map_err(js_err)
    }

    /// Click handler: toggle every shape under the cursor
    pub fn anchor_at(&mut self, x: f32, y: f32) -> usize {
        self.core.anchor_at(x, y)
    }

    // === SPRINGS ===

    pub fn connect(&mut self, a: u32, b: u32, rest_length: f32, stiffness: f32) -> std::result::Result<u32, JsValue> {
        self.core.connect(a, b, rest_length, stiffness).map_err(js_err)
    }

    /// Rest length 100, k = 0.05
    pub fn connect_default(&mut self, a: u32, b: u32) -> std::result::Result<u32, JsValue> {
        self.core.connect_default(a, b).map_err(js_err)
    }

    pub fn remove_spring(&mut self, id: u32) -> bool {
        self.core.remove_spring(id)
    }

    // === FRAME LOOP ===

    /// Step once regardless of the run state
    pub fn step(&mut self) -> std::result::Result<(), JsValue> {
        self.core.step().map_err(js_err)
    }

    /// Called from requestAnimationFrame; steps only while running
    pub fn tick(&mut self) -> std::result::Result<bool, JsValue> {
        self.core.tick().map_err(js_err)
    }

    pub fn start(&mut self) {
        self.core.start();
    }

    pub fn stop(&mut self) {
        self.core.stop();
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool { self.core.is_running() }

    pub fn reset(&mut self) {
        self.core.reset();
    }

    // === RENDERING API ===

    /// Refill render buffers; returns the body count.
    /// Pointers below stay valid until the next call that mutates the world.
    pub fn extract_render(&mut self) -> usize {
        self.core.extract_render()
    }

    /// Get pointer to shape buffer (RENDER_STRIDE floats per body)
    pub fn shapes_ptr(&self) -> *const f32 {
        self.core.render_shapes().as_ptr()
    }

    pub fn shapes_len(&self) -> usize {
        self.core.render_shapes().len()
    }

    /// Get pointer to colour buffer (one u32 per body)
    pub fn colors_ptr(&self) -> *const u32 {
        self.core.render_colors().as_ptr()
    }

    pub fn colors_len(&self) -> usize {
        self.core.render_colors().len()
    }

    /// Get pointer to spring segments (SPRING_STRIDE floats per spring)
    pub fn springs_ptr(&self) -> *const f32 {
        self.core.render_springs().as_ptr()
    }

    pub fn springs_len(&self) -> usize {
        self.core.render_springs().len()
    }

    pub fn render_stride(&self) -> usize { super::RENDER_STRIDE }

    pub fn spring_stride(&self) -> usize { super::SPRING_STRIDE }

    /// Full body list for debugging and save files
    pub fn bodies_json(&self) -> std::result::Result<String, JsValue> {
        self.core.bodies_json().map_err(js_err)
    }
}

impl World {
    /// Native access to the wrapped sandbox
    pub fn sandbox(&self) -> &Sandbox {
        &self.core
    }
}
