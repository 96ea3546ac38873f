pub mod config;
pub mod shape;

pub use config::EngineConfig;
pub use shape::{Appearance, ShapeKind, DEFAULT_COLOR};
