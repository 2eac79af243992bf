//! Common utilities and types used throughout the simulation environment.
//!
//! This module provides fundamental building blocks that are shared across all
//! components of the environment. It includes:
//! 1. **Error Handling:** The top-level error type covering I/O, port binding,
//!    stimulus image, and configuration failures.

/// Error types for environment construction and the run loop.
pub mod error;

pub use error::BenchError;
