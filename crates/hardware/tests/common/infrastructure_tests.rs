//! Tests for the shared test infrastructure itself.
//!
//! The unit tests lean on the frame builders and the bridge bench; these
//! checks pin down their behavior so a helper bug does not masquerade as a
//! model bug.

use super::harness::{BridgeBench, frame, mac};
use bridgesim_core::bridge::frame::is_group;

#[test]
fn frame_builder_lays_out_the_header() {
    let dst = mac(0xAA);
    let src = mac(0xBB);
    let octets = frame(&dst, &src, 3);

    assert_eq!(octets.len(), 17);
    assert_eq!(&octets[0..6], &dst);
    assert_eq!(&octets[6..12], &src);
    assert_eq!(&octets[12..14], &[0x08, 0x00]);
    assert_eq!(&octets[14..], &[0, 1, 2]);
}

#[test]
fn mac_builder_yields_unicast_addresses() {
    for last in [0x00, 0x01, 0x7F, 0xFF] {
        assert!(!is_group(&mac(last)));
    }
}

#[test]
fn bench_captures_nothing_on_an_idle_bridge() {
    let mut bench = BridgeBench::new();
    for _ in 0..32 {
        bench.clock();
    }
    assert_eq!(bench.total_captured(), 0);
    for port in 0..4 {
        assert!(!bench.tx_en(port));
    }
}

#[test]
fn bench_drain_returns_on_a_quiet_bridge() {
    let mut bench = BridgeBench::new();
    bench.drain();
    assert_eq!(bench.total_captured(), 0);
}
