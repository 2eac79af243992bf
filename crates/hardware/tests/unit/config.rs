//! # Configuration Tests
//!
//! Comprehensive tests for configuration structures, deserialization,
//! defaults, and partial override handling.

use bridgesim_core::common::BenchError;
use bridgesim_core::config::*;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Helper function to write configuration text to a temporary file.
fn write_config(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_config_default() {
    let config = Config::default();
    assert_eq!(config.clock.period_ns, 8);
    assert_eq!(config.bridge.ports, 4);
    assert_eq!(config.run.max_cycles, 1_000_000);
}

#[test]
fn test_clock_config_defaults() {
    let clock = ClockConfig::default();
    assert_eq!(clock.period_ns, 8);
    assert!((clock.duty - 0.5).abs() < 1e-9);
}

#[test]
fn test_bridge_config_defaults() {
    let bridge = BridgeConfig::default();
    assert_eq!(bridge.ports, 4);
    assert_eq!(bridge.mac_table_capacity, 1024);
}

#[test]
fn test_run_config_defaults() {
    let run = RunConfig::default();
    assert_eq!(run.max_cycles, 1_000_000);
    assert_eq!(run.reset_cycles, 2);
    assert_eq!(run.settle_cycles, 64);
    assert_eq!(run.image_memory_bytes, 64 * 1024);
}

#[test]
fn empty_object_parses_to_defaults() {
    let config: Config = serde_json::from_str("{}").unwrap();
    assert_eq!(config.clock.period_ns, 8);
    assert_eq!(config.bridge.ports, 4);
    assert_eq!(config.bridge.mac_table_capacity, 1024);
    assert_eq!(config.run.max_cycles, 1_000_000);
}

#[test]
fn partial_override_keeps_other_sections() {
    let text = r#"{"clock": {"period_ns": 10}, "run": {"max_cycles": 50000}}"#;
    let config: Config = serde_json::from_str(text).unwrap();
    assert_eq!(config.clock.period_ns, 10);
    assert!((config.clock.duty - 0.5).abs() < 1e-9);
    assert_eq!(config.bridge.ports, 4);
    assert_eq!(config.run.max_cycles, 50_000);
    assert_eq!(config.run.reset_cycles, 2);
}

#[test]
fn from_json_file_reads_overrides() {
    let file = write_config(r#"{"bridge": {"ports": 2, "mac_table_capacity": 16}}"#);
    let config = Config::from_json_file(file.path()).unwrap();
    assert_eq!(config.bridge.ports, 2);
    assert_eq!(config.bridge.mac_table_capacity, 16);
    assert_eq!(config.clock.period_ns, 8);
}

#[test]
fn from_json_file_rejects_bad_json() {
    let file = write_config("this is not json");
    let err = Config::from_json_file(file.path()).unwrap_err();
    assert!(matches!(err, BenchError::Config(_)));
}

#[test]
fn from_json_file_missing_file_is_io_error() {
    let err = Config::from_json_file(Path::new("/nonexistent/bench.json")).unwrap_err();
    assert!(matches!(err, BenchError::Io(_)));
}

#[test]
fn unknown_fields_are_ignored() {
    let text = r#"{"clock": {"period_ns": 4, "comment": "fast"}}"#;
    let config: Config = serde_json::from_str(text).unwrap();
    assert_eq!(config.clock.period_ns, 4);
}
