//! Behavioral model of the 4-port GMII Ethernet bridge.
//!
//! This module stands in for the synthesizable bridge core at the level the
//! harness observes: GMII octet streams in, GMII octet streams out. It
//! provides:
//! 1. **Frame Capture:** One octet is taken from `gmii_rxd_*` on every rising
//!    edge while `gmii_rx_dv_*` is high; the frame completes when valid drops.
//! 2. **Switching:** Learned unicast destinations go to a single egress port,
//!    group and unknown destinations flood to every port except the ingress,
//!    and frames whose egress equals their ingress are filtered.
//! 3. **Address Learning:** Source MACs are learned into a bounded table with
//!    oldest-first eviction.
//! 4. **Transmission:** Each port drains one queued octet per rising edge on
//!    `gmii_txd_*` with `gmii_tx_en_*` asserted, leaving one idle edge between
//!    back-to-back frames.
//!
//! Asserting `reset` flushes all capture, queue, and table state; counters are
//! preserved so a run's totals survive a mid-run reset.

pub mod frame;

use std::collections::{HashMap, VecDeque};
use std::mem;

use tracing::debug;

use crate::config::BridgeConfig;
use crate::harness::clock::EdgeKind;
use crate::harness::signal::{BitId, SignalDb, WordId};
use crate::model::{BindError, Model, PortMap, PortSpec};

use self::frame::Frame;

/// Event counters maintained by the bridge.
///
/// Counters accumulate across resets.
#[derive(Clone, Debug, Default)]
pub struct BridgeCounters {
    /// Frames fully received on any ingress port.
    pub frames_in: u64,
    /// Frames sent to a single learned egress port.
    pub frames_forwarded: u64,
    /// Frames replicated to all ports except the ingress.
    pub frames_flooded: u64,
    /// Frames whose learned egress equalled their ingress.
    pub frames_filtered: u64,
    /// Frames dropped for being shorter than a full header.
    pub runts_dropped: u64,
    /// New source addresses inserted into the MAC table.
    pub macs_learned: u64,
    /// Addresses evicted to make room in a full MAC table.
    pub macs_evicted: u64,
    /// Octets captured on ingress ports.
    pub octets_in: u64,
    /// Octets enqueued for transmission.
    pub octets_out: u64,
}

/// Receive capture state for one port.
#[derive(Debug, Default)]
struct RxState {
    receiving: bool,
    octets: Vec<u8>,
}

/// Transmit state for one port.
#[derive(Debug, Default)]
struct TxState {
    queue: VecDeque<Frame>,
    current: VecDeque<u8>,
    gap: bool,
}

/// The behavioral bridge model.
#[derive(Debug)]
pub struct Bridge {
    port_count: usize,
    mac_capacity: usize,
    reset: Option<BitId>,
    rx_dv: Vec<BitId>,
    rxd: Vec<WordId>,
    tx_en: Vec<BitId>,
    txd: Vec<WordId>,
    rx: Vec<RxState>,
    tx: Vec<TxState>,
    macs: HashMap<[u8; 6], usize>,
    mac_order: VecDeque<[u8; 6]>,
    counters: BridgeCounters,
}

impl Bridge {
    /// Creates a bridge with the given port count and MAC table capacity.
    pub fn new(config: &BridgeConfig) -> Self {
        let ports = config.ports;
        Self {
            port_count: ports,
            mac_capacity: config.mac_table_capacity,
            reset: None,
            rx_dv: Vec::new(),
            rxd: Vec::new(),
            tx_en: Vec::new(),
            txd: Vec::new(),
            rx: (0..ports).map(|_| RxState::default()).collect(),
            tx: (0..ports).map(|_| TxState::default()).collect(),
            macs: HashMap::new(),
            mac_order: VecDeque::new(),
            counters: BridgeCounters::default(),
        }
    }

    /// Returns the number of GMII ports.
    pub fn port_count(&self) -> usize {
        self.port_count
    }

    /// Returns the accumulated event counters.
    pub fn counters(&self) -> &BridgeCounters {
        &self.counters
    }

    /// Returns the port a MAC address was learned on, if any.
    pub fn learned_port(&self, mac: &[u8; 6]) -> Option<usize> {
        self.macs.get(mac).copied()
    }

    fn apply_reset(&mut self, signals: &mut SignalDb) {
        for rx in &mut self.rx {
            rx.receiving = false;
            rx.octets.clear();
        }
        for tx in &mut self.tx {
            tx.queue.clear();
            tx.current.clear();
            tx.gap = false;
        }
        self.macs.clear();
        self.mac_order.clear();
        for port in 0..self.port_count {
            signals.write_bit(self.tx_en[port], false);
            signals.write_word(self.txd[port], 0);
        }
    }

    fn eval_rising(&mut self, signals: &mut SignalDb) {
        if self.reset.is_some_and(|id| signals.read_bit(id)) {
            self.apply_reset(signals);
            return;
        }

        // Transmit drives from pre-edge state so a frame completed on this
        // edge first appears on the wire one edge later.
        for port in 0..self.port_count {
            match self.next_tx_octet(port) {
                Some(octet) => {
                    signals.write_bit(self.tx_en[port], true);
                    signals.write_word(self.txd[port], u32::from(octet));
                }
                None => {
                    signals.write_bit(self.tx_en[port], false);
                    signals.write_word(self.txd[port], 0);
                }
            }
        }

        let mut completed: Vec<(usize, Frame)> = Vec::new();
        for port in 0..self.port_count {
            let valid = signals.read_bit(self.rx_dv[port]);
            let rx = &mut self.rx[port];
            if valid {
                rx.receiving = true;
                let octet = (signals.read_word(self.rxd[port]) & 0xFF) as u8;
                rx.octets.push(octet);
                self.counters.octets_in += 1;
            } else if rx.receiving {
                rx.receiving = false;
                let octets = mem::take(&mut rx.octets);
                completed.push((port, Frame::new(octets)));
            }
        }

        for (port, frame) in completed {
            self.switch_frame(port, frame);
        }
    }

    /// Pops the next octet to drive on a port, honoring the inter-frame gap.
    fn next_tx_octet(&mut self, port: usize) -> Option<u8> {
        let tx = &mut self.tx[port];
        if let Some(octet) = tx.current.pop_front() {
            if tx.current.is_empty() {
                tx.gap = true;
            }
            return Some(octet);
        }
        if tx.gap {
            tx.gap = false;
            return None;
        }
        let frame = tx.queue.pop_front()?;
        tx.current = VecDeque::from(frame.into_octets());
        let octet = tx.current.pop_front()?;
        if tx.current.is_empty() {
            tx.gap = true;
        }
        Some(octet)
    }

    fn switch_frame(&mut self, ingress: usize, frame: Frame) {
        self.counters.frames_in += 1;
        if frame.is_runt() {
            self.counters.runts_dropped += 1;
            debug!(ingress, len = frame.len(), "dropping runt frame");
            return;
        }
        let (Some(dst), Some(src)) = (frame.dst(), frame.src()) else {
            return;
        };

        self.learn(src, ingress);

        if frame::is_group(&dst) {
            self.flood(ingress, &frame);
            return;
        }
        match self.macs.get(&dst).copied() {
            Some(egress) if egress == ingress => {
                self.counters.frames_filtered += 1;
                debug!(
                    ingress,
                    dst = %frame::format_mac(&dst),
                    "filtering frame addressed to its own segment"
                );
            }
            Some(egress) => {
                self.counters.frames_forwarded += 1;
                self.enqueue(egress, frame);
            }
            None => self.flood(ingress, &frame),
        }
    }

    fn flood(&mut self, ingress: usize, frame: &Frame) {
        self.counters.frames_flooded += 1;
        for port in 0..self.port_count {
            if port != ingress {
                self.enqueue(port, frame.clone());
            }
        }
    }

    fn enqueue(&mut self, port: usize, frame: Frame) {
        self.counters.octets_out += frame.len() as u64;
        self.tx[port].queue.push_back(frame);
    }

    fn learn(&mut self, src: [u8; 6], port: usize) {
        if frame::is_group(&src) {
            return;
        }
        if let Some(known) = self.macs.get_mut(&src) {
            if *known != port {
                debug!(
                    mac = %frame::format_mac(&src),
                    from = *known,
                    to = port,
                    "station moved"
                );
                *known = port;
            }
            return;
        }
        if self.macs.len() >= self.mac_capacity {
            if let Some(oldest) = self.mac_order.pop_front() {
                let _ = self.macs.remove(&oldest);
                self.counters.macs_evicted += 1;
            }
        }
        let _ = self.macs.insert(src, port);
        self.mac_order.push_back(src);
        self.counters.macs_learned += 1;
        debug!(mac = %frame::format_mac(&src), port, "learned source address");
    }
}

impl Model for Bridge {
    fn name(&self) -> &str {
        "bridge"
    }

    fn ports(&self) -> Vec<PortSpec> {
        let mut specs = vec![PortSpec::input_bit("clk"), PortSpec::input_bit("reset")];
        for p in 0..self.port_count {
            specs.push(PortSpec::input_bit(format!("gmii_rx_clk_{p}")));
            specs.push(PortSpec::input_bit(format!("gmii_rx_dv_{p}")));
            specs.push(PortSpec::input_word(format!("gmii_rxd_{p}")));
            specs.push(PortSpec::output_bit(format!("gmii_tx_en_{p}")));
            specs.push(PortSpec::output_word(format!("gmii_txd_{p}")));
        }
        specs
    }

    fn bind(&mut self, map: &PortMap) -> Result<(), BindError> {
        self.reset = Some(map.bit("reset")?);
        self.rx_dv.clear();
        self.rxd.clear();
        self.tx_en.clear();
        self.txd.clear();
        for p in 0..self.port_count {
            self.rx_dv.push(map.bit(&format!("gmii_rx_dv_{p}"))?);
            self.rxd.push(map.word(&format!("gmii_rxd_{p}"))?);
            self.tx_en.push(map.bit(&format!("gmii_tx_en_{p}"))?);
            self.txd.push(map.word(&format!("gmii_txd_{p}"))?);
        }
        Ok(())
    }

    fn eval(&mut self, edge: EdgeKind, signals: &mut SignalDb) {
        match edge {
            EdgeKind::Rising => self.eval_rising(signals),
            EdgeKind::Falling => {}
        }
    }

    fn as_bridge(&self) -> Option<&Bridge> {
        Some(self)
    }
}
