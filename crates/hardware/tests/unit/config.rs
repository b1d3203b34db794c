//! # Configuration Tests
//!
//! Tests for configuration defaults, the plain-text and JSON formats, and
//! geometry validation.

use std::io::Write;

use cachesim_core::common::{ConfigError, Level};
use cachesim_core::config::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn level(line: usize, ways: usize, size: usize) -> CacheConfig {
    CacheConfig::new(line, ways, size)
}

#[test]
fn test_cache_config_defaults() {
    let cache = CacheConfig::default();
    assert_eq!(cache.line_bytes, 64);
    assert_eq!(cache.ways, 1);
    assert_eq!(cache.size_bytes, 4096);
}

#[test]
fn test_default_hierarchy_is_valid() {
    let geometry = HierarchyConfig::default().validate().unwrap();
    assert_eq!(geometry.l1.ways, 1);
    assert_eq!(geometry.l1.decoder.num_sets(), 64);
    assert_eq!(geometry.l1.capacity_blocks(), 64);
}

#[test]
fn test_parse_text_one_value_per_line() {
    let text = "L1:\n8\n2\n64\nL2:\n8\n4\n512\n";
    let config = HierarchyConfig::parse_text(text).unwrap();
    assert_eq!(
        config,
        HierarchyConfig::new(level(8, 2, 64), level(8, 4, 512))
    );
}

#[test]
fn test_parse_text_ignores_label_contents_and_trailing_tokens() {
    let config: HierarchyConfig = "first 4 1 16 second 4 2 32 extra".parse().unwrap();
    assert_eq!(config.l1, level(4, 1, 16));
    assert_eq!(config.l2, level(4, 2, 32));
}

#[rstest]
#[case("", "the L1 label")]
#[case("L1: 8 2", "L1 cache size")]
#[case("L1: 8 2 64 L2:", "L2 block size")]
#[case("L1: 8 2 64 L2: 8 4", "L2 cache size")]
fn test_parse_text_missing(#[case] text: &str, #[case] expected: &str) {
    match HierarchyConfig::parse_text(text) {
        Err(ConfigError::Missing { field }) => assert_eq!(field, expected),
        other => panic!("expected Missing, got {other:?}"),
    }
}

#[rstest]
#[case("L1: eight 2 64 L2: 8 4 512", "L1 block size", "eight")]
#[case("L1: 8 -2 64 L2: 8 4 512", "L1 associativity", "-2")]
#[case("L1: 8 2 64 L2: 8 4 0x200", "L2 cache size", "0x200")]
fn test_parse_text_bad_token(#[case] text: &str, #[case] expected: &str, #[case] token: &str) {
    match HierarchyConfig::parse_text(text) {
        Err(ConfigError::Parse { field, found }) => {
            assert_eq!(field, expected);
            assert_eq!(found, token);
        }
        other => panic!("expected Parse, got {other:?}"),
    }
}

#[test]
fn test_json_partial_uses_defaults() {
    let json = r#"{ "l1": { "ways": 2 }, "l2": { "size_bytes": 8192 } }"#;
    let config: HierarchyConfig = serde_json::from_str(json).unwrap();
    assert_eq!(config.l1, level(64, 2, 4096));
    assert_eq!(config.l2, level(64, 1, 8192));
}

#[test]
fn test_from_path_selects_format_by_extension() {
    let dir = tempfile::tempdir().unwrap();

    let text_path = dir.path().join("cacheconfig.txt");
    std::fs::write(&text_path, "L1: 16 1 64\nL2: 16 2 256\n").unwrap();
    let text = HierarchyConfig::from_path(&text_path).unwrap();

    let json_path = dir.path().join("cacheconfig.JSON");
    let mut f = std::fs::File::create(&json_path).unwrap();
    write!(
        f,
        r#"{{"l1": {{"line_bytes": 16, "ways": 1, "size_bytes": 64}},
            "l2": {{"line_bytes": 16, "ways": 2, "size_bytes": 256}}}}"#
    )
    .unwrap();
    drop(f);
    let json = HierarchyConfig::from_path(&json_path).unwrap();

    assert_eq!(text, json);
}

#[test]
fn test_from_path_reports_io_and_json_errors() {
    let dir = tempfile::tempdir().unwrap();
    let missing = HierarchyConfig::from_path(&dir.path().join("nope.txt"));
    assert!(matches!(missing, Err(ConfigError::Io(_))));

    let bad = dir.path().join("bad.json");
    std::fs::write(&bad, "{ not json").unwrap();
    assert!(matches!(
        HierarchyConfig::from_path(&bad),
        Err(ConfigError::Json(_))
    ));
}

#[test]
fn test_zero_ways_is_fully_associative() {
    let geometry = level(8, 0, 64).geometry(Level::L1).unwrap();
    assert_eq!(geometry.ways, 8);
    assert_eq!(geometry.decoder.num_sets(), 1);
    assert_eq!(geometry.decoder.index_bits(), 0);
}

#[test]
fn test_set_count_derivation() {
    // 1 KiB, 16-byte blocks, 4 ways -> 16 sets.
    let geometry = level(16, 4, 1024).geometry(Level::L2).unwrap();
    assert_eq!(geometry.decoder.num_sets(), 16);
    assert_eq!(geometry.decoder.offset_bits(), 4);
    assert_eq!(geometry.decoder.index_bits(), 4);
    assert_eq!(geometry.capacity_blocks(), 64);
}

#[rstest]
#[case::zero_block(level(0, 1, 64))]
#[case::odd_block(level(12, 1, 96))]
fn test_block_size_rejected(#[case] cache: CacheConfig) {
    assert!(matches!(
        cache.geometry(Level::L1),
        Err(ConfigError::BlockSize {
            level: Level::L1,
            ..
        })
    ));
}

#[rstest]
#[case::zero_size(level(8, 1, 0))]
#[case::smaller_than_block(level(8, 1, 4))]
#[case::fully_assoc_smaller_than_block(level(8, 0, 4))]
fn test_capacity_rejected(#[case] cache: CacheConfig) {
    assert!(matches!(
        cache.geometry(Level::L2),
        Err(ConfigError::Capacity { .. })
    ));
}

#[test]
fn test_indivisible_size_rejected() {
    // 40 bytes is not a whole number of 8-byte x 2-way sets.
    let err = level(8, 2, 40).geometry(Level::L1).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Indivisible {
            size: 40,
            line: 8,
            ways: 2,
            ..
        }
    ));
}

#[test]
fn test_ways_larger_than_capacity_rejected() {
    assert!(matches!(
        level(8, 16, 64).geometry(Level::L1),
        Err(ConfigError::Indivisible { .. })
    ));
}

#[test]
fn test_non_power_of_two_sets_rejected() {
    // 96 / (8 * 2) = 6 sets.
    let err = level(8, 2, 96).geometry(Level::L2).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::SetCount {
            level: Level::L2,
            sets: 6
        }
    ));
}

#[test]
fn test_layout_wider_than_address_rejected() {
    // 1 MiB blocks x 8192 sets needs 33 offset+index bits.
    let err = level(1 << 20, 1, 1 << 33).geometry(Level::L1).unwrap_err();
    assert!(matches!(err, ConfigError::Geometry { level: Level::L1, .. }));
}

#[test]
fn test_mismatched_block_sizes_rejected() {
    let config = HierarchyConfig::new(level(8, 1, 64), level(16, 1, 256));
    assert!(matches!(
        config.validate(),
        Err(ConfigError::BlockSizeMismatch { l1: 8, l2: 16 })
    ));
}

#[test]
fn test_validate_reports_l1_before_l2() {
    let config = HierarchyConfig::new(level(8, 2, 96), level(8, 2, 96));
    assert!(matches!(
        config.validate(),
        Err(ConfigError::SetCount {
            level: Level::L1,
            ..
        })
    ));
}
