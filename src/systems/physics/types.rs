use serde::{Deserialize, Serialize};

use crate::core::error::{EngineError, Result};

/// Canvas rectangle a step is clamped to. Supplied per call, never stored.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn validate(&self) -> Result<()> {
        if self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0 {
            Ok(())
        } else {
            Err(EngineError::InvalidConfig(format!(
                "bounds must be finite and positive, got {}x{}",
                self.width, self.height
            )))
        }
    }
}

/// Counters for the last `step` call
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StepStats {
    /// Unordered pairs visited by the O(n²) pass
    pub pairs_checked: u32,
    /// Pairs that overlapped and were resolved
    pub contacts: u32,
    /// Pairs or springs skipped because two centres coincided
    pub degenerate_pairs: u32,
    pub springs_applied: u32,
    /// Bodies clamped by at least one wall this step
    pub boundary_hits: u32,
}
