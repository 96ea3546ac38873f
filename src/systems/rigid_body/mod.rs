//! Body - the unit the sandbox simulates
//!
//! A shape spawned on the canvas: an axis-aligned box with a spin angle,
//! treated as a circle for every physical interaction.

mod vec2;
mod body;

pub use vec2::Vec2;
pub use body::{Body, BodyId};
