//! # subpix-stream
//!
//! Streaming executor for raster translation.
//!
//! [`ShiftStreamer`] drives a source raster through a translator and into a
//! destination raster, either in a plain read-compute-write loop or as a
//! three-stage pipeline (one reader, N workers, one writer) connected by two
//! bounded [`ConcurrentQueue`]s. Cancellation is cooperative: a failing
//! participant deactivates the queues it feeds and its partners drain out on
//! their next cycle.

pub mod error;
pub mod queue;
pub mod streamer;

pub use error::{StreamError, StreamResult};
pub use queue::{ConcurrentQueue, QueueError};
pub use streamer::ShiftStreamer;
