//! Rendering-only shape payload.
//!
//! The physics never looks at this: every body collides as a circle of
//! diameter `size`. The kind and colour only tell the JS canvas renderer
//! what to draw at the body's transform.

use serde::{Deserialize, Serialize};

use crate::core::error::{EngineError, Result};

/// Opaque white, 0xAARRGGBB
pub const DEFAULT_COLOR: u32 = 0xFFFF_FFFF;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum ShapeKind {
    #[default]
    Circle = 0,
    Square = 1,
    Triangle = 2,
    /// Regular pentagon
    Polygon = 3,
    Line = 4,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 5] = [
        ShapeKind::Circle,
        ShapeKind::Square,
        ShapeKind::Triangle,
        ShapeKind::Polygon,
        ShapeKind::Line,
    ];

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Circle => "circle",
            ShapeKind::Square => "square",
            ShapeKind::Triangle => "triangle",
            ShapeKind::Polygon => "polygon",
            ShapeKind::Line => "line",
        }
    }
}

impl TryFrom<u8> for ShapeKind {
    type Error = EngineError;

    fn try_from(value: u8) -> Result<Self> {
        ShapeKind::ALL
            .get(value as usize)
            .copied()
            .ok_or_else(|| EngineError::InvalidConfig(format!("unknown shape kind {}", value)))
    }
}

impl std::str::FromStr for ShapeKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        ShapeKind::ALL
            .iter()
            .copied()
            .find(|k| k.name() == s)
            .ok_or_else(|| EngineError::InvalidConfig(format!("unknown shape kind '{}'", s)))
    }
}

/// What the renderer needs besides the physical transform.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Appearance {
    pub kind: ShapeKind,
    pub color: u32,
}

impl Appearance {
    pub fn new(kind: ShapeKind, color: u32) -> Self {
        Self { kind, color }
    }
}

impl Default for Appearance {
    fn default() -> Self {
        Self { kind: ShapeKind::Circle, color: DEFAULT_COLOR }
    }
}
