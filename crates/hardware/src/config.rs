//! Configuration system for the bridge testbench.
//!
//! This module defines all configuration structures used to parameterize the
//! harness. It provides:
//! 1. **Defaults:** Baseline constants (clock timing, port count, MAC table,
//!    run control).
//! 2. **Structures:** Hierarchical config for the clock generator, the bridge
//!    model, and the run loop.
//!
//! Configuration is supplied as JSON via `--config`, or use `Config::default()`
//! when no file is given. Every field is optional in the JSON; missing fields
//! take their defaults.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::error::BenchError;

/// Default configuration constants for the testbench.
///
/// These values define the baseline setup when not explicitly overridden in a
/// JSON configuration file.
mod defaults {
    /// Clock period in nanoseconds (125 MHz).
    ///
    /// GMII moves one octet per clock at this rate, which is the timing the
    /// generated bridge core was built against.
    pub const CLOCK_PERIOD_NS: u64 = 8;

    /// Fraction of the period the clock spends high.
    pub const CLOCK_DUTY: f64 = 0.5;

    /// Number of GMII ports on the bridge.
    pub const BRIDGE_PORTS: usize = 4;

    /// MAC address table capacity.
    ///
    /// When the table is full, the oldest entry is evicted to make room.
    pub const MAC_TABLE_CAPACITY: usize = 1024;

    /// Size of the address space a memory image may populate (64 KiB).
    pub const IMAGE_MEMORY_BYTES: usize = 64 * 1024;

    /// Hard ceiling on simulated cycles.
    ///
    /// A run that never quiesces stops here instead of spinning forever.
    pub const MAX_CYCLES: u64 = 1_000_000;

    /// Cycles to hold `reset` asserted at the start of a run.
    pub const RESET_CYCLES: u64 = 2;

    /// Consecutive idle cycles required to call the design quiescent.
    ///
    /// Must cover the longest stretch the bridge can sit between finishing
    /// one frame and starting the next queued one.
    pub const SETTLE_CYCLES: u64 = 64;
}

/// Root configuration structure containing all testbench settings.
///
/// Every section is optional in the JSON; a file may override only the fields
/// it cares about.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use bridgesim_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.clock.period_ns, 8);
/// assert_eq!(config.bridge.ports, 4);
/// ```
///
/// Deserializing a partial JSON override:
///
/// ```
/// use bridgesim_core::config::Config;
///
/// let json = r#"{
///     "clock": { "period_ns": 10 },
///     "run": { "max_cycles": 50000 }
/// }"#;
///
/// let config: Config = serde_json::from_str(json).unwrap();
/// assert_eq!(config.clock.period_ns, 10);
/// assert_eq!(config.run.max_cycles, 50000);
/// assert_eq!(config.bridge.ports, 4);
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Clock generator parameters
    #[serde(default)]
    pub clock: ClockConfig,

    /// Bridge model parameters
    #[serde(default)]
    pub bridge: BridgeConfig,

    /// Run loop control parameters
    #[serde(default)]
    pub run: RunConfig,
}

impl Config {
    /// Reads and deserializes a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns a [`BenchError`] if the file cannot be read or the JSON is
    /// malformed.
    pub fn from_json_file(path: &Path) -> Result<Self, BenchError> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            clock: ClockConfig::default(),
            bridge: BridgeConfig::default(),
            run: RunConfig::default(),
        }
    }
}

/// Clock generator configuration.
///
/// The single system clock drives the model's `clk` port and every
/// `gmii_rx_clk_*` port together.
#[derive(Debug, Clone, Deserialize)]
pub struct ClockConfig {
    /// Clock period in nanoseconds
    #[serde(default = "ClockConfig::default_period_ns")]
    pub period_ns: u64,

    /// Fraction of the period spent high
    #[serde(default = "ClockConfig::default_duty")]
    pub duty: f64,
}

impl ClockConfig {
    /// Returns the default clock period in nanoseconds.
    fn default_period_ns() -> u64 {
        defaults::CLOCK_PERIOD_NS
    }

    /// Returns the default clock duty cycle.
    fn default_duty() -> f64 {
        defaults::CLOCK_DUTY
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            period_ns: defaults::CLOCK_PERIOD_NS,
            duty: defaults::CLOCK_DUTY,
        }
    }
}

/// Bridge model configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BridgeConfig {
    /// Number of GMII ports
    #[serde(default = "BridgeConfig::default_ports")]
    pub ports: usize,

    /// MAC address table capacity
    #[serde(default = "BridgeConfig::default_mac_table_capacity")]
    pub mac_table_capacity: usize,
}

impl BridgeConfig {
    /// Returns the default number of GMII ports.
    fn default_ports() -> usize {
        defaults::BRIDGE_PORTS
    }

    /// Returns the default MAC address table capacity.
    fn default_mac_table_capacity() -> usize {
        defaults::MAC_TABLE_CAPACITY
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            ports: defaults::BRIDGE_PORTS,
            mac_table_capacity: defaults::MAC_TABLE_CAPACITY,
        }
    }
}

/// Run loop control configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RunConfig {
    /// Hard ceiling on simulated cycles
    #[serde(default = "RunConfig::default_max_cycles")]
    pub max_cycles: u64,

    /// Cycles to hold reset asserted at the start of a run. Zero skips the
    /// reset sequence entirely.
    #[serde(default = "RunConfig::default_reset_cycles")]
    pub reset_cycles: u64,

    /// Consecutive idle cycles required to declare quiescence
    #[serde(default = "RunConfig::default_settle_cycles")]
    pub settle_cycles: u64,

    /// Size of the address space a memory image may populate
    #[serde(default = "RunConfig::default_image_memory_bytes")]
    pub image_memory_bytes: usize,
}

impl RunConfig {
    /// Returns the default cycle ceiling.
    fn default_max_cycles() -> u64 {
        defaults::MAX_CYCLES
    }

    /// Returns the default reset hold in cycles.
    fn default_reset_cycles() -> u64 {
        defaults::RESET_CYCLES
    }

    /// Returns the default quiescence settle window in cycles.
    fn default_settle_cycles() -> u64 {
        defaults::SETTLE_CYCLES
    }

    /// Returns the default memory image address space size.
    fn default_image_memory_bytes() -> usize {
        defaults::IMAGE_MEMORY_BYTES
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            max_cycles: defaults::MAX_CYCLES,
            reset_cycles: defaults::RESET_CYCLES,
            settle_cycles: defaults::SETTLE_CYCLES,
            image_memory_bytes: defaults::IMAGE_MEMORY_BYTES,
        }
    }
}
