use wasm_bindgen::prelude::*;

/// Counters for the stepping loop, exposed to JS for debug overlays
#[wasm_bindgen]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepStats {
    pub(super) steps_total: u64,
    pub(super) last_tick_steps: u32,
    /// Only sampled while perf metrics are enabled
    pub(super) last_step_ms: f64,
    pub(super) last_repelled: u32,
    pub(super) live_bodies: u32,
    pub(super) pending_spawns: u32,
    pub(super) icons_drawn: u32,
}

#[wasm_bindgen]
impl StepStats {
    #[wasm_bindgen(getter)]
    pub fn steps_total(&self) -> u64 { self.steps_total }
    #[wasm_bindgen(getter)]
    pub fn last_tick_steps(&self) -> u32 { self.last_tick_steps }
    #[wasm_bindgen(getter)]
    pub fn last_step_ms(&self) -> f64 { self.last_step_ms }
    #[wasm_bindgen(getter)]
    pub fn last_repelled(&self) -> u32 { self.last_repelled }
    #[wasm_bindgen(getter)]
    pub fn live_bodies(&self) -> u32 { self.live_bodies }
    #[wasm_bindgen(getter)]
    pub fn pending_spawns(&self) -> u32 { self.pending_spawns }
    #[wasm_bindgen(getter)]
    pub fn icons_drawn(&self) -> u32 { self.icons_drawn }
}

impl StepStats {
    pub(crate) fn reset(&mut self) {
        *self = StepStats::default();
    }
}
