use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrackerError {
    /// Diffs are computed relative to the entry point, so it must be a usable divisor.
    #[error("invalid entry point {0}: must be finite and greater than zero")]
    InvalidEntryPoint(f64),

    #[error("invalid poll interval {0:?}: must be non-zero")]
    InvalidInterval(Duration),
}
