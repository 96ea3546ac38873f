//! Toybox Engine - 2D toy physics sandbox in WASM
//!
//! Square shapes that collide as circles, bounce off the canvas edges, spin on
//! impact, optionally attract each other and can be joined by springs.
//!
//! Architecture:
//! - core/          - Error type and crate Result
//! - domain/        - Tunables and shape appearance
//! - systems/       - Body model and the physics step engine
//! - simulation/    - Sandbox orchestration, frame loop, wasm facade

pub mod core;
pub mod domain;
pub mod systems;
pub mod simulation;

pub use systems::physics;
pub use systems::rigid_body;

use wasm_bindgen::prelude::*;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    web_sys::console::log_1(&"Toybox WASM engine initialized".into());
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use crate::core::error::{EngineError, Result};
pub use domain::{Appearance, EngineConfig, ShapeKind};
pub use physics::{Bounds, Engine, Spring, SpringId, StepStats};
pub use rigid_body::{Body, BodyId, Vec2};
pub use simulation::{PerfStats, Sandbox, SharedSandbox, World, RENDER_STRIDE, SPRING_STRIDE};

// Shape kind constants for JS
#[wasm_bindgen]
pub fn shape_circle() -> u8 { ShapeKind::Circle.as_u8() }
#[wasm_bindgen]
pub fn shape_square() -> u8 { ShapeKind::Square.as_u8() }
#[wasm_bindgen]
pub fn shape_triangle() -> u8 { ShapeKind::Triangle.as_u8() }
#[wasm_bindgen]
pub fn shape_polygon() -> u8 { ShapeKind::Polygon.as_u8() }
#[wasm_bindgen]
pub fn shape_line() -> u8 { ShapeKind::Line.as_u8() }
