//! GMII Ethernet bridge simulation library.
//!
//! This crate implements a cycle-accurate testbench for a 4-port GMII
//! Ethernet bridge with the following:
//! 1. **Harness:** Signal table and clock timing shared by the model and its
//!    observers.
//! 2. **Model:** Port declaration, validated binding, and the edge-evaluation
//!    contract.
//! 3. **Bridge:** Behavioral model of the switch (capture, learning,
//!    forwarding, transmission).
//! 4. **Simulation:** The clocked run loop, frame stimulus, and memory image
//!    loading.
//! 5. **Trace:** Change-only VCD waveform recording.

/// Behavioral bridge model (frame capture, MAC learning, switching).
pub mod bridge;
/// Common error types.
pub mod common;
/// Testbench configuration (defaults, hierarchical config structures).
pub mod config;
/// Signal table and clock timing.
pub mod harness;
/// Model port contract and binding.
pub mod model;
/// Simulation engine (run loop, stimulus, image loading).
pub mod sim;
/// Statistics collection and reporting.
pub mod stats;
/// VCD waveform recording.
pub mod trace;

/// Unified error type for harness construction and runs.
pub use crate::common::error::BenchError;
/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Top-level harness; construct with `Simulator::new` and drive with
/// `run_to_completion`.
pub use crate::sim::simulator::{Simulator, StopReason};
