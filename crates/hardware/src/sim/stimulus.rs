//! Frame injection and capture at the GMII pins.
//!
//! The [`Driver`] plays queued injections into the receive pins, one octet per
//! rising edge with `gmii_rx_dv_*` held high, and leaves one idle edge between
//! consecutive frames so the bridge sees distinct frames. The [`Monitor`]
//! watches the transmit pins and reassembles the octet streams the bridge
//! drives back out, which is how tests and statistics observe delivery.

use std::collections::VecDeque;
use std::mem;

use crate::harness::signal::{BitId, SignalDb, WordId};
use crate::sim::loader::Injection;

/// Frame currently being played into a port.
#[derive(Debug)]
struct Playback {
    port: usize,
    octets: VecDeque<u8>,
}

/// Drives queued frames into the bridge's receive pins.
#[derive(Debug)]
pub struct Driver {
    dv: Vec<BitId>,
    rxd: Vec<WordId>,
    pending: VecDeque<Injection>,
    active: Option<Playback>,
}

impl Driver {
    /// Resolves the receive pins for every port, or `None` if the model does
    /// not expose the expected GMII names.
    pub fn attach(signals: &SignalDb, ports: usize) -> Option<Self> {
        let mut dv = Vec::with_capacity(ports);
        let mut rxd = Vec::with_capacity(ports);
        for p in 0..ports {
            dv.push(signals.find_bit(&format!("gmii_rx_dv_{p}"))?);
            rxd.push(signals.find_word(&format!("gmii_rxd_{p}"))?);
        }
        Some(Self {
            dv,
            rxd,
            pending: VecDeque::new(),
            active: None,
        })
    }

    /// Appends injections to the playback queue.
    pub fn queue(&mut self, injections: Vec<Injection>) {
        self.pending.extend(injections);
    }

    /// Returns `true` once every queued frame has finished playing.
    pub fn is_done(&self) -> bool {
        self.pending.is_empty() && self.active.is_none()
    }

    /// Drives the receive pins for the upcoming rising edge.
    ///
    /// Call before the edge is evaluated so the model samples settled values.
    pub fn posedge(&mut self, signals: &mut SignalDb) {
        if self.active.is_none() {
            if let Some(next) = self.pending.pop_front() {
                self.active = Some(Playback {
                    port: next.port,
                    octets: VecDeque::from(next.octets),
                });
            }
        }
        let Some(playback) = self.active.as_mut() else {
            return;
        };
        match playback.octets.pop_front() {
            Some(octet) => {
                signals.write_bit(self.dv[playback.port], true);
                signals.write_word(self.rxd[playback.port], u32::from(octet));
            }
            None => {
                // The dv-low edge that completes the frame doubles as the
                // inter-frame gap; the next frame starts on the edge after.
                signals.write_bit(self.dv[playback.port], false);
                signals.write_word(self.rxd[playback.port], 0);
                self.active = None;
            }
        }
    }
}

/// Captures the frames the bridge transmits.
#[derive(Debug)]
pub struct Monitor {
    tx_en: Vec<BitId>,
    txd: Vec<WordId>,
    assembling: Vec<Vec<u8>>,
    captured: Vec<Vec<Vec<u8>>>,
    active_now: bool,
    octets_seen: u64,
}

impl Monitor {
    /// Resolves the transmit pins for every port, or `None` if the model does
    /// not expose the expected GMII names.
    pub fn attach(signals: &SignalDb, ports: usize) -> Option<Self> {
        let mut tx_en = Vec::with_capacity(ports);
        let mut txd = Vec::with_capacity(ports);
        for p in 0..ports {
            tx_en.push(signals.find_bit(&format!("gmii_tx_en_{p}"))?);
            txd.push(signals.find_word(&format!("gmii_txd_{p}"))?);
        }
        Some(Self {
            tx_en,
            txd,
            assembling: vec![Vec::new(); ports],
            captured: vec![Vec::new(); ports],
            active_now: false,
            octets_seen: 0,
        })
    }

    /// Samples the transmit pins after a rising edge has been evaluated.
    pub fn posedge(&mut self, signals: &SignalDb) {
        self.active_now = false;
        for (port, en) in self.tx_en.iter().enumerate() {
            if signals.read_bit(*en) {
                self.active_now = true;
                let octet = (signals.read_word(self.txd[port]) & 0xFF) as u8;
                self.assembling[port].push(octet);
                self.octets_seen += 1;
            } else if !self.assembling[port].is_empty() {
                let frame = mem::take(&mut self.assembling[port]);
                self.captured[port].push(frame);
            }
        }
    }

    /// Returns `true` if any port was transmitting on the last sampled edge.
    pub fn saw_activity(&self) -> bool {
        self.active_now
    }

    /// Returns the frames captured on one port, oldest first.
    pub fn captured(&self, port: usize) -> &[Vec<u8>] {
        &self.captured[port]
    }

    /// Returns the number of complete frames captured across all ports.
    pub fn total_captured(&self) -> u64 {
        self.captured.iter().map(|frames| frames.len() as u64).sum()
    }

    /// Returns the number of transmit octets observed.
    pub fn octets_seen(&self) -> u64 {
        self.octets_seen
    }
}
