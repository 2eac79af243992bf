//! Value-change dump recording.
//!
//! This module writes the simulation's signal activity as a VCD waveform. It
//! provides:
//! 1. **Header Emission:** Every harness signal is declared as a wire under a
//!    single scope, 1-bit signals at width 1 and word signals at width 32,
//!    with a 1 ns timescale.
//! 2. **Change-Only Sampling:** `sample` emits a timestamp and only the
//!    signals whose value differs from the previous sample, which keeps dumps
//!    compact over long idle stretches.
//! 3. **Lifecycle:** `finish` stamps the final simulation time and flushes the
//!    sink, so a dump is well terminated even when the run stops early.
//!
//! The VCD encoding itself is delegated to the `vcd` crate; this module owns
//! which signals appear and when values are recorded.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use vcd::{IdCode, SimulationCommand, TimescaleUnit, Value};

use crate::harness::signal::SignalDb;

/// Records harness signal changes to a VCD sink.
#[derive(Debug)]
pub struct Tracer<W: Write> {
    sink: W,
    bit_codes: Vec<IdCode>,
    word_codes: Vec<IdCode>,
    last_bits: Vec<bool>,
    last_words: Vec<u32>,
    value_changes: u64,
}

impl Tracer<BufWriter<File>> {
    /// Creates the dump file at `path` and writes the VCD header for every
    /// signal currently in `signals`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or the header cannot be
    /// written.
    pub fn create(path: &Path, signals: &SignalDb, scope: &str) -> io::Result<Self> {
        let file = File::create(path)?;
        Self::new(BufWriter::new(file), signals, scope)
    }
}

impl<W: Write> Tracer<W> {
    /// Writes the VCD header into `sink` and records the initial value of
    /// every signal at time zero.
    ///
    /// # Errors
    ///
    /// Returns an error if the header cannot be written.
    pub fn new(mut sink: W, signals: &SignalDb, scope: &str) -> io::Result<Self> {
        let mut bit_codes = Vec::with_capacity(signals.bit_count());
        let mut word_codes = Vec::with_capacity(signals.word_count());
        let mut last_bits = Vec::with_capacity(signals.bit_count());
        let mut last_words = Vec::with_capacity(signals.word_count());

        {
            let mut writer = vcd::Writer::new(&mut sink);
            writer.timescale(1, TimescaleUnit::NS)?;
            writer.add_module(scope)?;
            for (_, name, value) in signals.bits() {
                bit_codes.push(writer.add_wire(1, name)?);
                last_bits.push(value);
            }
            for (_, name, value) in signals.words() {
                word_codes.push(writer.add_wire(32, name)?);
                last_words.push(value);
            }
            writer.upscope()?;
            writer.enddefinitions()?;

            writer.begin(SimulationCommand::Dumpvars)?;
            for (code, value) in bit_codes.iter().zip(&last_bits) {
                writer.change_scalar(*code, *value)?;
            }
            for (code, value) in word_codes.iter().zip(&last_words) {
                writer.change_vector(*code, &word_values(*value))?;
            }
            writer.end()?;
        }

        Ok(Self {
            sink,
            bit_codes,
            word_codes,
            last_bits,
            last_words,
            value_changes: 0,
        })
    }

    /// Records the signals that changed since the previous sample.
    ///
    /// A timestamp is always emitted so the dump carries the full time axis
    /// even across idle samples.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink rejects a write.
    pub fn sample(&mut self, time_ns: u64, signals: &SignalDb) -> io::Result<()> {
        let mut writer = vcd::Writer::new(&mut self.sink);
        writer.timestamp(time_ns)?;
        for (id, _, value) in signals.bits() {
            let index = id.index();
            if self.last_bits[index] != value {
                self.last_bits[index] = value;
                self.value_changes += 1;
                writer.change_scalar(self.bit_codes[index], value)?;
            }
        }
        for (id, _, value) in signals.words() {
            let index = id.index();
            if self.last_words[index] != value {
                self.last_words[index] = value;
                self.value_changes += 1;
                writer.change_vector(self.word_codes[index], &word_values(value))?;
            }
        }
        Ok(())
    }

    /// Stamps the final time, flushes, and returns the sink.
    ///
    /// # Errors
    ///
    /// Returns an error if the final write or flush fails.
    pub fn finish(mut self, time_ns: u64) -> io::Result<W> {
        {
            let mut writer = vcd::Writer::new(&mut self.sink);
            writer.timestamp(time_ns)?;
        }
        self.sink.flush()?;
        Ok(self.sink)
    }

    /// Returns the number of value changes recorded after the header.
    pub fn value_changes(&self) -> u64 {
        self.value_changes
    }
}

/// Expands a word into VCD bit values, most significant bit first.
fn word_values(word: u32) -> [Value; 32] {
    let mut values = [Value::V0; 32];
    for (i, slot) in values.iter_mut().enumerate() {
        *slot = Value::from(word & (1 << (31 - i)) != 0);
    }
    values
}
