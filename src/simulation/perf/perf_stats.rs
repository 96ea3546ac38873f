use wasm_bindgen::prelude::*;

/// Snapshot of the last stepped frame. All zeros while metrics are off.
#[wasm_bindgen]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PerfStats {
    pub(super) step_ms: f64,
    pub(super) body_count: u32,
    pub(super) spring_count: u32,
    pub(super) pairs_checked: u32,
    pub(super) contacts: u32,
    pub(super) degenerate_pairs: u32,
    pub(super) springs_applied: u32,
    pub(super) boundary_hits: u32,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        *self = PerfStats::default();
    }
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn step_ms(&self) -> f64 { self.step_ms }
    #[wasm_bindgen(getter)]
    pub fn body_count(&self) -> u32 { self.body_count }
    #[wasm_bindgen(getter)]
    pub fn spring_count(&self) -> u32 { self.spring_count }
    #[wasm_bindgen(getter)]
    pub fn pairs_checked(&self) -> u32 { self.pairs_checked }
    #[wasm_bindgen(getter)]
    pub fn contacts(&self) -> u32 { self.contacts }
    #[wasm_bindgen(getter)]
    pub fn degenerate_pairs(&self) -> u32 { self.degenerate_pairs }
    #[wasm_bindgen(getter)]
    pub fn springs_applied(&self) -> u32 { self.springs_applied }
    #[wasm_bindgen(getter)]
    pub fn boundary_hits(&self) -> u32 { self.boundary_hits }
}
