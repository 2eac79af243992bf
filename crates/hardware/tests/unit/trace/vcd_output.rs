//! Waveform dump tests.
//!
//! Drives a tracer over an in-memory sink and checks the declared header,
//! the change-only sampling behavior, and the final timestamp.

use bridgesim_core::harness::signal::SignalDb;
use bridgesim_core::trace::Tracer;

/// Helper: a two-signal table and a tracer over a byte buffer.
fn tracer_setup() -> (SignalDb, Tracer<Vec<u8>>) {
    let mut signals = SignalDb::new();
    let _clk = signals.add_bit("clk");
    let _data = signals.add_word("data");
    let tracer = Tracer::new(Vec::new(), &signals, "top").unwrap();
    (signals, tracer)
}

/// Helper: consume the tracer and return the dump as text.
fn into_text(tracer: Tracer<Vec<u8>>, final_ns: u64) -> String {
    let sink = tracer.finish(final_ns).unwrap();
    String::from_utf8(sink).unwrap()
}

#[test]
fn header_declares_every_signal() {
    let (_signals, tracer) = tracer_setup();
    let text = into_text(tracer, 0);

    assert!(text.starts_with("$timescale"));
    assert!(text.contains("1 ns"));
    assert!(text.contains("$scope module top"));
    assert!(text.contains("$var wire 1"));
    assert!(text.contains("$var wire 32"));
    assert!(text.contains("clk"));
    assert!(text.contains("data"));
    assert!(text.contains("$enddefinitions"));
    assert!(text.contains("$dumpvars"));
}

#[test]
fn initial_values_are_dumped_at_header_time() {
    let mut signals = SignalDb::new();
    let valid = signals.add_bit("valid");
    signals.write_bit(valid, true);

    let tracer = Tracer::new(Vec::new(), &signals, "top").unwrap();
    assert_eq!(tracer.value_changes(), 0);
    let text = into_text(tracer, 0);

    // The dumpvars block carries the value the signal already had.
    assert!(text.contains("$dumpvars"));
    assert!(text.contains("1!"));
}

#[test]
fn sample_records_changes_only() {
    let (mut signals, mut tracer) = tracer_setup();
    let clk = signals.find_bit("clk").unwrap();
    let data = signals.find_word("data").unwrap();

    signals.write_bit(clk, true);
    tracer.sample(4, &signals).unwrap();
    assert_eq!(tracer.value_changes(), 1);

    // Nothing changed; only the timestamp is emitted.
    tracer.sample(8, &signals).unwrap();
    assert_eq!(tracer.value_changes(), 1);

    signals.write_word(data, 0xDEAD_BEEF);
    tracer.sample(12, &signals).unwrap();
    assert_eq!(tracer.value_changes(), 2);

    let text = into_text(tracer, 16);
    assert!(text.contains("#4"));
    assert!(text.contains("#8"));
    assert!(text.contains("#12"));
    assert!(text.contains("#16"));
    // 0xDEADBEEF, most significant bit first.
    assert!(text.contains("b11011110101011011011111011101111"));
}

#[test]
fn unchanged_word_is_not_re_emitted() {
    let (mut signals, mut tracer) = tracer_setup();
    let data = signals.find_word("data").unwrap();

    signals.write_word(data, 0x0000_0001);
    tracer.sample(4, &signals).unwrap();
    signals.write_word(data, 0x0000_0001);
    tracer.sample(8, &signals).unwrap();

    assert_eq!(tracer.value_changes(), 1);
}

#[test]
fn finish_stamps_the_final_time() {
    let (_signals, tracer) = tracer_setup();
    let text = into_text(tracer, 8000);
    assert!(text.trim_end().ends_with("#8000"));
}

#[test]
fn tracer_handles_an_empty_signal_table() {
    let signals = SignalDb::new();
    let tracer = Tracer::new(Vec::new(), &signals, "top").unwrap();
    let text = into_text(tracer, 0);
    assert!(text.contains("$enddefinitions"));
}
