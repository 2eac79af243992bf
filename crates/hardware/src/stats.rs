//! Simulation statistics collection and reporting.
//!
//! This module tracks run metrics for the bridge testbench. It provides:
//! 1. **Run summary:** Cycles, simulated time, wall-clock time, and derived
//!    simulation frequency.
//! 2. **Traffic:** Frames and octets injected, received, and delivered.
//! 3. **Switching:** Forward/flood/filter decisions, runt drops, and MAC
//!    table activity.

use std::time::Instant;

/// Statistics structure tracking all run metrics.
///
/// The harness owns one of these and fills the run summary itself; traffic
/// and switching counters are merged in from the bridge model and the
/// transmit monitor when a snapshot is taken.
#[derive(Clone)]
pub struct SimStats {
    start_time: Instant,
    /// Total simulated cycles elapsed.
    pub cycles: u64,
    /// Rising clock edges evaluated.
    pub rising_edges: u64,
    /// Simulated time elapsed in nanoseconds.
    pub sim_time_ns: u64,

    /// Frames queued for injection from stimulus.
    pub frames_injected: u64,
    /// Frames fully received by the bridge.
    pub frames_received: u64,
    /// Frames sent to a single learned egress port.
    pub frames_forwarded: u64,
    /// Frames replicated to all ports except the ingress.
    pub frames_flooded: u64,
    /// Frames dropped because their egress equalled their ingress.
    pub frames_filtered: u64,
    /// Frames dropped for being shorter than a full header.
    pub runts_dropped: u64,

    /// Source addresses inserted into the MAC table.
    pub macs_learned: u64,
    /// Addresses evicted from a full MAC table.
    pub macs_evicted: u64,

    /// Octets captured on the bridge's receive pins.
    pub octets_received: u64,
    /// Complete frames observed on the transmit pins.
    pub frames_delivered: u64,
    /// Octets observed on the transmit pins.
    pub octets_delivered: u64,

    /// Value changes recorded in the waveform dump.
    pub trace_changes: u64,
}

impl Default for SimStats {
    /// Returns the default value.
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            rising_edges: 0,
            sim_time_ns: 0,
            frames_injected: 0,
            frames_received: 0,
            frames_forwarded: 0,
            frames_flooded: 0,
            frames_filtered: 0,
            runts_dropped: 0,
            macs_learned: 0,
            macs_evicted: 0,
            octets_received: 0,
            frames_delivered: 0,
            octets_delivered: 0,
            trace_changes: 0,
        }
    }
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"traffic"`, `"switching"`.
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "traffic", "switching"];

impl SimStats {
    /// Prints only the requested statistics sections to stdout.
    ///
    /// Each element of `sections` should be one of `"summary"`, `"traffic"`,
    /// or `"switching"`. Pass an empty slice to print all sections (same as
    /// `print()`).
    ///
    /// # Arguments
    ///
    /// * `sections` - Slice of section names to print, or empty for all.
    ///
    /// # Panics
    ///
    /// This function will not panic. The percentage divisions use a frame
    /// count clamped to at least 1, and the frequency division is floating
    /// point throughout.
    pub fn print_sections(&self, sections: &[String]) {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let duration = self.start_time.elapsed();
        let seconds = duration.as_secs_f64();
        let frames = if self.frames_received == 0 {
            1
        } else {
            self.frames_received
        };

        if want("summary") {
            let khz = (self.cycles as f64 / seconds) / 1000.0;
            println!("\n==========================================================");
            println!("GMII BRIDGE SIMULATION STATISTICS");
            println!("==========================================================");
            println!("host_seconds             {:.4} s", seconds);
            println!("sim_cycles               {}", self.cycles);
            println!("sim_time                 {} ns", self.sim_time_ns);
            println!("sim_freq                 {:.2} kHz", khz);
            println!("trace_changes            {}", self.trace_changes);
            println!("----------------------------------------------------------");
        }
        if want("traffic") {
            println!("TRAFFIC");
            println!("  frames.injected        {}", self.frames_injected);
            println!("  frames.received        {}", self.frames_received);
            println!("  frames.delivered       {}", self.frames_delivered);
            println!("  octets.received        {}", self.octets_received);
            println!("  octets.delivered       {}", self.octets_delivered);
            println!("  runts.dropped          {}", self.runts_dropped);
            println!("----------------------------------------------------------");
        }
        if want("switching") {
            println!("SWITCHING");
            println!(
                "  switch.forwarded       {} ({:.2}%)",
                self.frames_forwarded,
                (self.frames_forwarded as f64 / frames as f64) * 100.0
            );
            println!(
                "  switch.flooded         {} ({:.2}%)",
                self.frames_flooded,
                (self.frames_flooded as f64 / frames as f64) * 100.0
            );
            println!(
                "  switch.filtered        {} ({:.2}%)",
                self.frames_filtered,
                (self.frames_filtered as f64 / frames as f64) * 100.0
            );
            println!("  macs.learned           {}", self.macs_learned);
            println!("  macs.evicted           {}", self.macs_evicted);
        }
        println!("==========================================================");
    }

    /// Prints all statistics sections to stdout.
    ///
    /// Equivalent to `print_sections(&[])`.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}
