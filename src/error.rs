//! Error types for the multiply entry points.

use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MatmulError>;

/// Everything that can go wrong at runtime.
///
/// Dimension errors on the raw slice API are programming errors and panic
/// instead; only the [`Matrix`](crate::Matrix) helpers report them here.
#[derive(Debug, Error)]
pub enum MatmulError {
    /// The OS refused to start a worker thread.
    #[error("failed to spawn worker {worker}: {source}")]
    WorkerSpawn {
        worker: usize,
        #[source]
        source: io::Error,
    },

    /// A worker panicked before finishing its rows.
    #[error("worker {worker} panicked before finishing its rows")]
    WorkerPanicked { worker: usize },

    #[error("dimension mismatch: {what} expected {expected} elements, got {actual}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Optimized and reference outputs disagree by more than the tolerance.
    #[error(
        "mismatch at ({row}, {col}): expected {expected}, got {actual} (tolerance {tolerance:e})"
    )]
    Mismatch {
        row: usize,
        col: usize,
        expected: f64,
        actual: f64,
        tolerance: f64,
    },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
