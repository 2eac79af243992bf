//! Harness-owned signal table.
//!
//! This module defines the table of signals the testbench constructs at startup
//! and wires to the model's ports. It provides:
//! 1. **Typed Handles:** `BitId` and `WordId` distinguish 1-bit from 32-bit
//!    signals at compile time so a port can never be driven at the wrong width.
//! 2. **Access:** Read and write by handle during the run loop.
//! 3. **Enumeration:** Iteration over (handle, name, value) for trace
//!    registration and name-based lookup.

/// Handle for a 1-bit signal in a [`SignalDb`].
///
/// Handles are issued by [`SignalDb::add_bit`] and index the table they came
/// from. They are cheap to copy and carry no lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct BitId(pub usize);

/// Handle for a 32-bit signal in a [`SignalDb`].
///
/// Handles are issued by [`SignalDb::add_word`] and index the table they came
/// from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct WordId(pub usize);

impl BitId {
    /// Returns the raw table index.
    #[inline(always)]
    pub fn index(&self) -> usize {
        self.0
    }
}

impl WordId {
    /// Returns the raw table index.
    #[inline(always)]
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Debug)]
struct BitSignal {
    name: String,
    value: bool,
}

#[derive(Debug)]
struct WordSignal {
    name: String,
    value: u32,
}

/// Flat table of named harness signals.
///
/// The table is created once at environment startup, populated while the model
/// is wired, and lives until process exit. Signals carry their power-on value
/// (`false` / `0`) until the run loop first drives them.
#[derive(Debug, Default)]
pub struct SignalDb {
    bits: Vec<BitSignal>,
    words: Vec<WordSignal>,
}

impl SignalDb {
    /// Creates an empty signal table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a 1-bit signal with the given name, initialized low.
    ///
    /// # Arguments
    ///
    /// * `name` - Signal name as it appears in traces and lookups.
    ///
    /// # Returns
    ///
    /// The handle for the new signal.
    pub fn add_bit(&mut self, name: &str) -> BitId {
        let id = BitId(self.bits.len());
        self.bits.push(BitSignal {
            name: name.to_string(),
            value: false,
        });
        id
    }

    /// Adds a 32-bit signal with the given name, initialized to zero.
    ///
    /// # Arguments
    ///
    /// * `name` - Signal name as it appears in traces and lookups.
    ///
    /// # Returns
    ///
    /// The handle for the new signal.
    pub fn add_word(&mut self, name: &str) -> WordId {
        let id = WordId(self.words.len());
        self.words.push(WordSignal {
            name: name.to_string(),
            value: 0,
        });
        id
    }

    /// Reads the current value of a 1-bit signal.
    #[inline(always)]
    pub fn read_bit(&self, id: BitId) -> bool {
        self.bits[id.0].value
    }

    /// Drives a 1-bit signal to the given value.
    #[inline(always)]
    pub fn write_bit(&mut self, id: BitId, value: bool) {
        self.bits[id.0].value = value;
    }

    /// Reads the current value of a 32-bit signal.
    #[inline(always)]
    pub fn read_word(&self, id: WordId) -> u32 {
        self.words[id.0].value
    }

    /// Drives a 32-bit signal to the given value.
    #[inline(always)]
    pub fn write_word(&mut self, id: WordId, value: u32) {
        self.words[id.0].value = value;
    }

    /// Returns the name of a 1-bit signal.
    pub fn bit_name(&self, id: BitId) -> &str {
        &self.bits[id.0].name
    }

    /// Returns the name of a 32-bit signal.
    pub fn word_name(&self, id: WordId) -> &str {
        &self.words[id.0].name
    }

    /// Looks up a 1-bit signal by name.
    pub fn find_bit(&self, name: &str) -> Option<BitId> {
        self.bits.iter().position(|s| s.name == name).map(BitId)
    }

    /// Looks up a 32-bit signal by name.
    pub fn find_word(&self, name: &str) -> Option<WordId> {
        self.words.iter().position(|s| s.name == name).map(WordId)
    }

    /// Returns the number of 1-bit signals in the table.
    pub fn bit_count(&self) -> usize {
        self.bits.len()
    }

    /// Returns the number of 32-bit signals in the table.
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Iterates over all 1-bit signals as (handle, name, value).
    pub fn bits(&self) -> impl Iterator<Item = (BitId, &str, bool)> + '_ {
        self.bits
            .iter()
            .enumerate()
            .map(|(i, s)| (BitId(i), s.name.as_str(), s.value))
    }

    /// Iterates over all 32-bit signals as (handle, name, value).
    pub fn words(&self) -> impl Iterator<Item = (WordId, &str, u32)> + '_ {
        self.words
            .iter()
            .enumerate()
            .map(|(i, s)| (WordId(i), s.name.as_str(), s.value))
    }
}
