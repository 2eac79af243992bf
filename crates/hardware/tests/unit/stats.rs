//! SimStats unit tests.
//!
//! Verifies default initialization, field mutation, and that the report
//! printers tolerate empty and populated counter sets.

use bridgesim_core::stats::{STATS_SECTIONS, SimStats};

#[test]
fn default_stats_all_zero() {
    let stats = SimStats::default();
    assert_eq!(stats.cycles, 0);
    assert_eq!(stats.rising_edges, 0);
    assert_eq!(stats.sim_time_ns, 0);
    assert_eq!(stats.frames_injected, 0);
    assert_eq!(stats.frames_received, 0);
    assert_eq!(stats.frames_forwarded, 0);
    assert_eq!(stats.frames_flooded, 0);
    assert_eq!(stats.frames_filtered, 0);
    assert_eq!(stats.runts_dropped, 0);
    assert_eq!(stats.macs_learned, 0);
    assert_eq!(stats.macs_evicted, 0);
    assert_eq!(stats.octets_received, 0);
    assert_eq!(stats.frames_delivered, 0);
    assert_eq!(stats.octets_delivered, 0);
    assert_eq!(stats.trace_changes, 0);
}

#[test]
fn stats_field_mutation() {
    let mut stats = SimStats::default();
    stats.cycles = 1000;
    stats.rising_edges = 1000;
    stats.sim_time_ns = 8000;
    stats.frames_received = 12;
    stats.frames_forwarded = 7;
    stats.frames_flooded = 4;
    stats.frames_filtered = 1;

    assert_eq!(stats.cycles, 1000);
    assert_eq!(stats.rising_edges, 1000);
    assert_eq!(stats.sim_time_ns, 8000);
    assert_eq!(
        stats.frames_forwarded + stats.frames_flooded + stats.frames_filtered,
        stats.frames_received
    );
}

#[test]
fn sections_list_is_stable() {
    assert_eq!(STATS_SECTIONS, &["summary", "traffic", "switching"][..]);
}

// Note: the printers write to stdout, so these are smoke tests. Division
// guards are what they actually exercise; an all-zero counter set must not
// panic.

#[test]
fn print_handles_zero_counters() {
    let stats = SimStats::default();
    stats.print();
}

#[test]
fn print_sections_handles_populated_counters() {
    let mut stats = SimStats::default();
    stats.cycles = 500;
    stats.sim_time_ns = 4000;
    stats.frames_received = 3;
    stats.frames_flooded = 3;
    stats.octets_received = 102;
    stats.frames_delivered = 9;
    stats.octets_delivered = 306;

    let sections: Vec<String> = STATS_SECTIONS.iter().map(ToString::to_string).collect();
    stats.print_sections(&sections);
}

#[test]
fn print_sections_ignores_unknown_names() {
    let stats = SimStats::default();
    stats.print_sections(&["not_a_section".to_string()]);
}
