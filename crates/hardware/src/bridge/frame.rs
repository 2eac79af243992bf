//! Ethernet frame capture and header access.

use std::fmt::Write as _;

/// The all-ones broadcast destination address.
pub const BROADCAST: [u8; 6] = [0xFF; 6];

/// Shortest frame the switch will forward.
///
/// Destination, source, and EtherType must all be present; anything shorter is
/// counted as a runt and dropped.
pub const MIN_FRAME_OCTETS: usize = 14;

/// One captured Ethernet frame, octets in wire order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    octets: Vec<u8>,
}

impl Frame {
    /// Wraps a captured octet sequence.
    pub fn new(octets: Vec<u8>) -> Self {
        Self { octets }
    }

    /// Returns the frame payload in wire order.
    pub fn octets(&self) -> &[u8] {
        &self.octets
    }

    /// Consumes the frame, returning its octets.
    pub fn into_octets(self) -> Vec<u8> {
        self.octets
    }

    /// Returns the frame length in octets.
    pub fn len(&self) -> usize {
        self.octets.len()
    }

    /// Returns `true` if the frame holds no octets.
    pub fn is_empty(&self) -> bool {
        self.octets.is_empty()
    }

    /// Returns `true` if the frame is too short to carry a full header.
    pub fn is_runt(&self) -> bool {
        self.octets.len() < MIN_FRAME_OCTETS
    }

    /// Returns the destination MAC address, if the frame is long enough.
    pub fn dst(&self) -> Option<[u8; 6]> {
        self.octets.get(0..6).and_then(|s| s.try_into().ok())
    }

    /// Returns the source MAC address, if the frame is long enough.
    pub fn src(&self) -> Option<[u8; 6]> {
        self.octets.get(6..12).and_then(|s| s.try_into().ok())
    }
}

/// Returns `true` for group (multicast or broadcast) addresses.
///
/// The I/G bit is the least significant bit of the first octet.
pub fn is_group(addr: &[u8; 6]) -> bool {
    addr[0] & 1 != 0
}

/// Formats a MAC address in the conventional colon-separated form.
pub fn format_mac(addr: &[u8; 6]) -> String {
    let mut out = String::with_capacity(17);
    for (i, octet) in addr.iter().enumerate() {
        if i > 0 {
            out.push(':');
        }
        let _ = write!(out, "{octet:02x}");
    }
    out
}
