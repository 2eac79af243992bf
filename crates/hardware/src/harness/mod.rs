//! Harness-side wiring: the signal table and the clock specification.
//!
//! This module owns everything the testbench itself provides to the model. It
//! includes:
//! 1. **Signals:** A flat table of named 1-bit and 32-bit signals with typed
//!    handles, created once at startup and read/written throughout the run.
//! 2. **Clock:** The period/duty specification and the rising/falling edge
//!    schedule the run loop follows.

/// Clock specification and edge schedule.
pub mod clock;

/// Named signal table with typed handles.
pub mod signal;

pub use clock::{ClockSpec, EdgeKind};
pub use signal::{BitId, SignalDb, WordId};
