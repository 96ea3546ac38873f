//! Physics System - per-frame shape dynamics
//!
//! Each step, in this order:
//! - forces: gravity, wind, drag and friction integrated into every free body
//! - boundary: canvas walls clamp and reflect
//! - collision: exhaustive pairwise circle contacts, velocity swap, magnetism
//! - springs: one Hookean impulse per registered spring
//!
//! Bodies come in as a caller-owned slice; the engine keeps only its tunables,
//! springs and RNG.

mod boundary;
mod collision;
mod engine;
mod forces;
mod springs;
mod types;

pub use boundary::resolve_boundary;
pub use collision::{resolve_pairs, PairContact};
pub use engine::{Engine, SpinRng};
pub use forces::{apply_force_field, integrate};
pub use springs::{Spring, SpringId, SpringRegistry, DEFAULT_REST_LENGTH, DEFAULT_STIFFNESS};
pub use types::{Bounds, StepStats};
