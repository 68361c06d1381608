//! # Simulation Errors
//!
//! This module defines the common error type used throughout the crate.
//! By centralizing error definitions, we ensure consistent error handling
//! across the harness, the strategies, and the metrics sinks.

/// Errors that can occur while configuring or persisting a simulation.
///
/// Note what is *not* here: a deadlocked philosopher is a liveness failure,
/// not an error value. The harness surfaces it through
/// [`RunReport::stalled`](crate::table::RunReport::stalled) instead of
/// aborting the run.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("unknown strategy {0:?} (expected \"naive\" or \"corrected\")")]
    UnknownStrategy(String),
    #[error("metrics I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("report serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}
