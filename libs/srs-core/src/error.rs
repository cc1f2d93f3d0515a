//! Error types for srs-core.

use thiserror::Error;

use crate::types::Algorithm;

/// Result type alias using ScheduleError.
pub type Result<T> = std::result::Result<T, ScheduleError>;

/// Errors that can occur during a scheduling transition.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("quality grade must be 0-5, got {0}")]
    InvalidQuality(u8),

    #[error("card is scheduled with {found}, expected {expected}")]
    AlgorithmMismatch {
        expected: Algorithm,
        found: Algorithm,
    },
}
