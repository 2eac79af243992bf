//! # Unit Components
//!
//! This module serves as the central hub for the unit tests of the simulation
//! environment. It organizes the fundamental building blocks under test: the
//! harness signal layer, the model binding layer, the bridge itself, and the
//! run loop that ties them together.


/// Unit tests for configuration deserialization and defaults.
pub mod config;




/// Unit tests for simulation statistics aggregation.
///
/// This module contains tests that ensure the [`SimStats`](bridgesim_core::stats::SimStats)
/// structure correctly tracks counters fed by the run loop and the bridge.
pub mod stats;
