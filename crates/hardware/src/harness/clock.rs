//! Clock specification and edge schedule.
//!
//! This module defines the single clock the environment drives. It provides:
//! 1. **Specification:** Period in nanoseconds and a duty cycle, with degenerate
//!    values clamped so both half-periods stay non-zero.
//! 2. **Edge Schedule:** The absolute times of the rising and falling edges of
//!    each cycle; the first rising edge is at t=0.

/// Which clock edge the run loop is evaluating.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeKind {
    /// The low-to-high transition at the start of a cycle.
    Rising,
    /// The high-to-low transition partway through a cycle.
    Falling,
}

/// Fixed-period clock specification.
///
/// The clock is high for `high_ns` nanoseconds from the start of each cycle and
/// low for the remainder. Cycle `n` rises at `n * period_ns`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClockSpec {
    period_ns: u64,
    high_ns: u64,
}

impl ClockSpec {
    /// Creates a clock from a period and a duty cycle.
    ///
    /// The period is clamped to at least 2 ns and the high time to
    /// `[1, period - 1]` so both phases exist regardless of the duty value.
    ///
    /// # Arguments
    ///
    /// * `period_ns` - Full cycle length in nanoseconds.
    /// * `duty` - Fraction of the cycle spent high (0.5 for a symmetric clock).
    pub fn new(period_ns: u64, duty: f64) -> Self {
        let period_ns = period_ns.max(2);
        let high = (period_ns as f64 * duty).round() as u64;
        let high_ns = high.clamp(1, period_ns - 1);
        Self { period_ns, high_ns }
    }

    /// Returns the full cycle length in nanoseconds.
    pub fn period_ns(&self) -> u64 {
        self.period_ns
    }

    /// Returns the high phase length in nanoseconds.
    pub fn high_ns(&self) -> u64 {
        self.high_ns
    }

    /// Returns the low phase length in nanoseconds.
    pub fn low_ns(&self) -> u64 {
        self.period_ns - self.high_ns
    }

    /// Returns the absolute time of the rising edge of the given cycle.
    pub fn rising_edge_ns(&self, cycle: u64) -> u64 {
        cycle * self.period_ns
    }

    /// Returns the absolute time of the falling edge of the given cycle.
    pub fn falling_edge_ns(&self, cycle: u64) -> u64 {
        cycle * self.period_ns + self.high_ns
    }
}

impl Default for ClockSpec {
    /// Returns the environment's stock clock: 8 ns period, 0.5 duty.
    fn default() -> Self {
        Self::new(8, 0.5)
    }
}
