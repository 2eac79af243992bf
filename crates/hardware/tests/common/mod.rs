//! # Shared Test Infrastructure
//!
//! This module gathers the helpers the unit tests lean on: a wired-up
//! simulator context, an edge-level bridge bench, frame builders, and mock
//! models.


/// Checks on the shared infrastructure itself.
mod infrastructure_tests;


pub use harness::{BridgeBench, TestContext, frame, mac, test_config};
