//! Top-level error type for the simulation environment.
//!
//! This module defines the error returned by environment construction and the run
//! loop. It provides:
//! 1. **I/O Wrapping:** Trace file creation and image reading failures.
//! 2. **Binding Errors:** Port-to-signal wiring violations from the model layer.
//! 3. **Image Errors:** Malformed stimulus memory images from the loader.
//! 4. **Configuration Errors:** Rejected JSON configuration input.

use thiserror::Error;

use crate::model::BindError;
use crate::sim::loader::ImageError;

/// Error produced while building or running the simulation environment.
///
/// Construction wires the model, opens the optional trace file, and loads the
/// optional stimulus image; each step surfaces its failure through one of the
/// variants below.
#[derive(Debug, Error)]
pub enum BenchError {
    /// An underlying I/O operation failed (trace file, image file, config file).
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A model port could not be wired to a harness signal.
    #[error("port binding failed: {0}")]
    Bind(#[from] BindError),

    /// The stimulus memory image was rejected by the loader.
    #[error("memory image rejected: {0}")]
    Image(#[from] ImageError),

    /// The JSON configuration could not be deserialized.
    #[error("configuration rejected: {0}")]
    Config(#[from] serde_json::Error),
}
