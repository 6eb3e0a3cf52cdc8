//! Error types for the benchmark.
//!
//! There is no recoverable-error path in this crate: configuration errors
//! abort the run before any worker exists, and anything that fails after
//! configuration (spawning or joining a worker) is fatal to the whole run.

use thiserror::Error;

/// Crate-wide result alias.
pub type BenchResult<T> = Result<T, BenchError>;

/// Everything that can go wrong in a benchmark run.
#[derive(Debug, Error)]
pub enum BenchError {
    /// The concurrency-method token is not one of the six known strategies.
    #[error(
        "invalid or unknown concurrency method `{0}` \
         (valid methods: none, mutex, spinlock, readwritelock, signalwait, semaphore)"
    )]
    UnknownStrategy(String),

    /// A numeric argument was zero; both counts must be at least one.
    #[error("{name} must be a positive integer")]
    InvalidCount {
        /// Which argument was rejected.
        name: &'static str,
    },

    /// The OS refused to create a worker thread.
    #[error("failed to spawn worker {index}: {source}")]
    Spawn {
        /// Index of the worker that could not be created.
        index: u32,
        /// Underlying error from the thread builder.
        #[source]
        source: std::io::Error,
    },

    /// A worker panicked before completing its increments.
    #[error("failed to join worker {index}: worker panicked")]
    Join {
        /// Index of the worker that could not be joined.
        index: u32,
    },
}
