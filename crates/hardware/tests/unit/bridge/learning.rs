//! Address learning tests.
//!
//! Verifies that source addresses land in the table on their ingress port,
//! that stations can move between ports, and that a full table evicts its
//! oldest entry.

use bridgesim_core::bridge::frame::BROADCAST;

use crate::common::{BridgeBench, frame, mac};

#[test]
fn source_addresses_are_learned_on_ingress_port() {
    let mut bench = BridgeBench::new();
    bench.send_frame(2, &frame(&mac(9), &mac(1), 0));
    bench.drain();

    assert_eq!(bench.bridge.learned_port(&mac(1)), Some(2));
    assert_eq!(bench.bridge.learned_port(&mac(9)), None);
    assert_eq!(bench.bridge.counters().macs_learned, 1);
}

#[test]
fn group_source_is_never_learned() {
    let mut bench = BridgeBench::new();
    let multicast_src = [0x01, 0x00, 0x5E, 0x00, 0x00, 0x07];
    bench.send_frame(0, &frame(&mac(9), &multicast_src, 0));
    bench.send_frame(0, &frame(&mac(9), &BROADCAST, 0));
    bench.drain();

    assert_eq!(bench.bridge.learned_port(&multicast_src), None);
    assert_eq!(bench.bridge.learned_port(&BROADCAST), None);
    assert_eq!(bench.bridge.counters().macs_learned, 0);
}

#[test]
fn station_move_updates_port() {
    let mut bench = BridgeBench::new();
    bench.send_frame(0, &frame(&mac(9), &mac(1), 0));
    bench.drain();
    assert_eq!(bench.bridge.learned_port(&mac(1)), Some(0));

    bench.send_frame(3, &frame(&mac(9), &mac(1), 0));
    bench.drain();
    assert_eq!(bench.bridge.learned_port(&mac(1)), Some(3));

    // A move rewrites the existing entry rather than learning a new one.
    assert_eq!(bench.bridge.counters().macs_learned, 1);
    assert_eq!(bench.bridge.counters().macs_evicted, 0);
}

#[test]
fn full_table_evicts_oldest_entry() {
    let mut bench = BridgeBench::with_mac_capacity(2);
    bench.send_frame(0, &frame(&mac(9), &mac(1), 0));
    bench.send_frame(1, &frame(&mac(9), &mac(2), 0));
    bench.send_frame(2, &frame(&mac(9), &mac(3), 0));
    bench.drain();

    assert_eq!(bench.bridge.learned_port(&mac(1)), None);
    assert_eq!(bench.bridge.learned_port(&mac(2)), Some(1));
    assert_eq!(bench.bridge.learned_port(&mac(3)), Some(2));
    assert_eq!(bench.bridge.counters().macs_learned, 3);
    assert_eq!(bench.bridge.counters().macs_evicted, 1);
}

#[test]
fn eviction_order_ignores_later_traffic() {
    let mut bench = BridgeBench::with_mac_capacity(2);
    bench.send_frame(0, &frame(&mac(9), &mac(1), 0));
    bench.send_frame(1, &frame(&mac(9), &mac(2), 0));
    // Station 1 talks again; the table order is first-insertion, so it is
    // still the oldest entry.
    bench.send_frame(0, &frame(&mac(9), &mac(1), 0));
    bench.send_frame(2, &frame(&mac(9), &mac(3), 0));
    bench.drain();

    assert_eq!(bench.bridge.learned_port(&mac(1)), None);
    assert_eq!(bench.bridge.learned_port(&mac(2)), Some(1));
    assert_eq!(bench.bridge.learned_port(&mac(3)), Some(2));
}

#[test]
fn evicted_station_can_be_relearned() {
    let mut bench = BridgeBench::with_mac_capacity(1);
    bench.send_frame(0, &frame(&mac(9), &mac(1), 0));
    bench.send_frame(1, &frame(&mac(9), &mac(2), 0));
    bench.send_frame(3, &frame(&mac(9), &mac(1), 0));
    bench.drain();

    assert_eq!(bench.bridge.learned_port(&mac(1)), Some(3));
    assert_eq!(bench.bridge.learned_port(&mac(2)), None);
    assert_eq!(bench.bridge.counters().macs_learned, 3);
    assert_eq!(bench.bridge.counters().macs_evicted, 2);
}
