//! Error types for wirepool

use std::time::Duration;

use thiserror::Error;

/// Errors returned by pool operations
///
/// Connector failures during an on-demand dial pass through `acquire`
/// unchanged, so callers can tell a dead backend apart from an exhausted
/// pool.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid capacity: initial size {init} exceeds maximum {max}")]
    InvalidCapacity { init: usize, max: usize },

    #[error("pool has been shut down")]
    Closed,

    #[error("release called without a connection")]
    NoConnection,

    #[error("timed out after {0:?} waiting for a connection at maximum capacity")]
    AcquireTimeout(Duration),

    #[error("connector failed to fill the pool: {source}")]
    Initialize {
        #[source]
        source: Box<Error>,
    },

    #[error("connection error: {0}")]
    Connection(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for pool operations
pub type Result<T> = std::result::Result<T, Error>;
