use thiserror::Error;

use crate::core::ConfigError;
use crate::engine::Phase;

/// Failures of the engine lifecycle.
///
/// Game over and quit are not errors; they are [`crate::types::Outcome`]s.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("terminal setup failed: {0:#}")]
    Terminal(anyhow::Error),
    #[error("failed to spawn the input thread: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("game initialization failed: {0:#}")]
    Initialize(anyhow::Error),
    #[error("`{op}` called in phase {phase:?}")]
    InvalidPhase { op: &'static str, phase: Phase },
}
