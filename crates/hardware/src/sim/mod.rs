//! Simulation engine: stimulus, run loop, and image loading.
//!
//! Provides the clocked run loop that drives the model, the driver and
//! monitor that move frames across the GMII pins, and the memory image
//! loader that turns `-i` files into stimulus.

pub mod loader;
pub mod simulator;
pub mod stimulus;

pub use loader::Injection;
pub use simulator::{Simulator, StopReason};
