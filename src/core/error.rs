use thiserror::Error;

use crate::rigid_body::BodyId;
use crate::physics::SpringId;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Everything the engine or the sandbox can refuse to do.
///
/// Zero-distance geometry is not here: it is skipped locally for the pair or
/// spring involved and only shows up in the step counters.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A spring endpoint is not in the body list handed to `step`.
    #[error("spring {spring} references body {body}, which is not in the live body set")]
    DanglingReference { spring: SpringId, body: BodyId },

    /// Body state that would poison the simulation.
    #[error("invalid body {id}: {reason}")]
    InvalidBody { id: BodyId, reason: &'static str },

    /// Bad tunable, bounds or spring parameters.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Sandbox operation on an id that is not live.
    #[error("unknown body {0}")]
    UnknownBody(BodyId),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// A thread panicked while holding the shared sandbox.
    #[error("shared sandbox lock poisoned")]
    LockPoisoned,
}
