//! Simulator: owns the signal table, the model, and the clocking loop.
//!
//! There is no event queue. The design is fully synchronous to one clock, so
//! each simulated cycle is a fixed sequence: drive stimulus, raise the clock,
//! evaluate the model, capture outputs, lower the clock, evaluate again. The
//! tracer samples after each half-cycle, which is exactly when signal values
//! are settled.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use tracing::{info, warn};

use crate::bridge::Bridge;
use crate::common::error::BenchError;
use crate::config::{Config, RunConfig};
use crate::harness::clock::{ClockSpec, EdgeKind};
use crate::harness::signal::{BitId, SignalDb};
use crate::model::{Model, wire};
use crate::sim::loader::{self, Injection};
use crate::sim::stimulus::{Driver, Monitor};
use crate::stats::SimStats;
use crate::trace::Tracer;

/// Why `run_to_completion` stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// All stimulus was played and the model went idle for the settle window.
    Quiescent,
    /// The configured cycle ceiling was reached first.
    CycleLimit,
}

/// Top-level simulation harness: signal table, clock, model, and observers.
pub struct Simulator {
    signals: SignalDb,
    clock: ClockSpec,
    model: Box<dyn Model>,
    clock_bits: Vec<BitId>,
    reset_bit: Option<BitId>,
    driver: Option<Driver>,
    monitor: Option<Monitor>,
    tracer: Option<Tracer<BufWriter<File>>>,
    run: RunConfig,
    ports: usize,
    cycle: u64,
    idle_cycles: u64,
    stats: SimStats,
}

impl Simulator {
    /// Constructs the harness around a bridge model built from `config`.
    ///
    /// # Errors
    ///
    /// Returns a [`BenchError`] if port binding fails.
    pub fn new(config: &Config) -> Result<Self, BenchError> {
        Self::with_model(config, Box::new(Bridge::new(&config.bridge)))
    }

    /// Constructs the harness around an arbitrary model.
    ///
    /// Every declared port gets its own signal. All ports named `clk` or
    /// `gmii_rx_clk_*` are driven together as the single system clock, and
    /// `reset` is driven by the reset sequencer; a model without those names
    /// simply never sees them toggle.
    ///
    /// # Errors
    ///
    /// Returns a [`BenchError`] if port binding fails.
    pub fn with_model(config: &Config, mut model: Box<dyn Model>) -> Result<Self, BenchError> {
        let mut signals = SignalDb::new();
        wire(model.as_mut(), &mut signals)?;

        let clock = ClockSpec::new(config.clock.period_ns, config.clock.duty);
        let ports = config.bridge.ports;
        let clock_bits: Vec<BitId> = signals
            .bits()
            .filter(|(_, name, _)| *name == "clk" || name.starts_with("gmii_rx_clk_"))
            .map(|(id, _, _)| id)
            .collect();
        let reset_bit = signals.find_bit("reset");
        let driver = Driver::attach(&signals, ports);
        let monitor = Monitor::attach(&signals, ports);

        info!(
            model = model.name(),
            bits = signals.bit_count(),
            words = signals.word_count(),
            period_ns = clock.period_ns(),
            "harness constructed"
        );

        Ok(Self {
            signals,
            clock,
            model,
            clock_bits,
            reset_bit,
            driver,
            monitor,
            tracer: None,
            run: config.run.clone(),
            ports,
            cycle: 0,
            idle_cycles: 0,
            stats: SimStats::default(),
        })
    }

    /// Opens a VCD dump at `path` covering every harness signal.
    ///
    /// # Errors
    ///
    /// Returns a [`BenchError`] if the dump file cannot be created.
    pub fn attach_tracer(&mut self, path: &Path) -> Result<(), BenchError> {
        self.tracer = Some(Tracer::create(path, &self.signals, "top")?);
        info!(path = %path.display(), "waveform dump enabled");
        Ok(())
    }

    /// Loads a memory image and queues its frames for injection.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the `$readmemh`-style image file.
    ///
    /// # Returns
    ///
    /// The number of frames decoded from the image.
    ///
    /// # Errors
    ///
    /// Returns a [`BenchError`] if the file cannot be read or the image is
    /// malformed.
    pub fn load_image(&mut self, path: &Path) -> Result<usize, BenchError> {
        let injections = loader::load_stimulus(path, self.ports, self.run.image_memory_bytes)?;
        let count = injections.len();
        info!(path = %path.display(), frames = count, "memory image loaded");
        self.inject_frames(injections);
        Ok(count)
    }

    /// Queues frames for injection directly, bypassing the image file format.
    pub fn inject_frames(&mut self, injections: Vec<Injection>) {
        if let Some(driver) = self.driver.as_mut() {
            self.stats.frames_injected += injections.len() as u64;
            driver.queue(injections);
        } else {
            warn!(
                frames = injections.len(),
                "model exposes no receive pins; stimulus discarded"
            );
        }
    }

    /// Advances the simulation by one full clock cycle.
    ///
    /// # Errors
    ///
    /// Returns a [`BenchError`] if the tracer sink rejects a write.
    pub fn step_cycle(&mut self) -> Result<(), BenchError> {
        let rising_ns = self.clock.rising_edge_ns(self.cycle);
        let falling_ns = self.clock.falling_edge_ns(self.cycle);

        let in_reset = self.cycle < self.run.reset_cycles;
        if let Some(reset) = self.reset_bit {
            self.signals.write_bit(reset, in_reset);
        }
        if !in_reset {
            if let Some(driver) = self.driver.as_mut() {
                driver.posedge(&mut self.signals);
            }
        }

        for clk in &self.clock_bits {
            self.signals.write_bit(*clk, true);
        }
        self.model.eval(EdgeKind::Rising, &mut self.signals);
        if let Some(monitor) = self.monitor.as_mut() {
            monitor.posedge(&self.signals);
        }
        if let Some(tracer) = self.tracer.as_mut() {
            tracer.sample(rising_ns, &self.signals)?;
        }

        for clk in &self.clock_bits {
            self.signals.write_bit(*clk, false);
        }
        self.model.eval(EdgeKind::Falling, &mut self.signals);
        if let Some(tracer) = self.tracer.as_mut() {
            tracer.sample(falling_ns, &self.signals)?;
        }

        self.cycle += 1;
        self.stats.cycles = self.cycle;
        self.stats.rising_edges += 1;
        Ok(())
    }

    /// Runs exactly `cycles` clock cycles.
    ///
    /// # Errors
    ///
    /// Returns a [`BenchError`] if a cycle fails.
    pub fn run(&mut self, cycles: u64) -> Result<(), BenchError> {
        for _ in 0..cycles {
            self.step_cycle()?;
        }
        Ok(())
    }

    /// Runs until the design quiesces or the cycle ceiling is hit.
    ///
    /// Quiescence means the driver has played every queued frame and no port
    /// transmitted for `settle_cycles` consecutive cycles after reset.
    ///
    /// # Errors
    ///
    /// Returns a [`BenchError`] if a cycle fails.
    pub fn run_to_completion(&mut self) -> Result<StopReason, BenchError> {
        loop {
            if self.cycle >= self.run.max_cycles {
                return Ok(StopReason::CycleLimit);
            }
            self.step_cycle()?;

            let driver_done = self.driver.as_ref().is_none_or(Driver::is_done);
            let transmitting = self.monitor.as_ref().is_some_and(Monitor::saw_activity);
            if driver_done && !transmitting && self.cycle > self.run.reset_cycles {
                self.idle_cycles += 1;
                if self.idle_cycles >= self.run.settle_cycles {
                    return Ok(StopReason::Quiescent);
                }
            } else {
                self.idle_cycles = 0;
            }
        }
    }

    /// Closes the waveform dump, stamping the final simulation time.
    ///
    /// # Errors
    ///
    /// Returns a [`BenchError`] if the final write or flush fails.
    pub fn finish(&mut self) -> Result<(), BenchError> {
        if let Some(tracer) = self.tracer.take() {
            self.stats.trace_changes = tracer.value_changes();
            let _ = tracer.finish(self.clock.rising_edge_ns(self.cycle))?;
            info!(changes = self.stats.trace_changes, "waveform dump closed");
        }
        Ok(())
    }

    /// Returns a statistics snapshot merged from the harness and model.
    pub fn stats(&self) -> SimStats {
        let mut stats = self.stats.clone();
        stats.sim_time_ns = self.clock.rising_edge_ns(self.cycle);
        if let Some(bridge) = self.model.as_bridge() {
            let counters = bridge.counters();
            stats.frames_received = counters.frames_in;
            stats.frames_forwarded = counters.frames_forwarded;
            stats.frames_flooded = counters.frames_flooded;
            stats.frames_filtered = counters.frames_filtered;
            stats.runts_dropped = counters.runts_dropped;
            stats.macs_learned = counters.macs_learned;
            stats.macs_evicted = counters.macs_evicted;
            stats.octets_received = counters.octets_in;
        }
        if let Some(monitor) = self.monitor.as_ref() {
            stats.frames_delivered = monitor.total_captured();
            stats.octets_delivered = monitor.octets_seen();
        }
        stats
    }

    /// Returns the number of completed cycles.
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Returns the harness signal table.
    pub fn signals(&self) -> &SignalDb {
        &self.signals
    }

    /// Returns the harness signal table mutably.
    pub fn signals_mut(&mut self) -> &mut SignalDb {
        &mut self.signals
    }

    /// Returns the bridge model, if that is what the harness is driving.
    pub fn bridge(&self) -> Option<&Bridge> {
        self.model.as_bridge()
    }

    /// Returns the transmit-side monitor, if the model exposes GMII pins.
    pub fn monitor(&self) -> Option<&Monitor> {
        self.monitor.as_ref()
    }
}
