//! Error types for the streaming executor.

use subpix_io::IoError;
use subpix_ops::OpsError;
use thiserror::Error;

/// Result type for streaming operations.
pub type StreamResult<T> = Result<T, StreamError>;

/// Errors surfaced by the shift streamer.
///
/// Mid-stream failures are logged where they happen and reported once, after
/// teardown, as the first error observed by any pipeline participant.
#[derive(Debug, Error)]
pub enum StreamError {
    /// Raster read or write failure.
    #[error(transparent)]
    Io(#[from] IoError),

    /// Translation failure.
    #[error(transparent)]
    Ops(#[from] OpsError),

    /// A worker task died without producing an error value.
    #[error("worker task panicked: {0}")]
    WorkerPanic(String),
}
