//! HierarchyStats unit tests.
//!
//! Verifies default initialization, per-access counting, and derived miss
//! rates, both directly through `record` and through a live hierarchy.

use cachesim_core::hierarchy::{AccessResult, AccessState, MemoryState};
use cachesim_core::stats::HierarchyStats;

use crate::common::TestContext;

#[test]
fn default_stats_all_zero() {
    let stats = HierarchyStats::default();
    assert_eq!(stats.reads, 0);
    assert_eq!(stats.writes, 0);
    assert_eq!(stats.l1_hits, 0);
    assert_eq!(stats.l1_misses, 0);
    assert_eq!(stats.l2_hits, 0);
    assert_eq!(stats.l2_misses, 0);
    assert_eq!(stats.l1_evictions, 0);
    assert_eq!(stats.l2_evictions, 0);
    assert_eq!(stats.memory_writes, 0);
    assert_eq!(stats.accesses(), 0);
}

#[test]
fn miss_rates_zero_without_accesses() {
    let stats = HierarchyStats::default();
    assert!(stats.l1_miss_rate().abs() < f64::EPSILON);
    assert!(stats.l2_miss_rate().abs() < f64::EPSILON);
}

#[test]
fn record_l1_hit_leaves_l2_untouched() {
    let mut stats = HierarchyStats::default();
    stats.record(&AccessResult::new(
        AccessState::WriteHit,
        AccessState::NoAction,
        MemoryState::NoWrite,
    ));

    assert_eq!(stats.writes, 1);
    assert_eq!(stats.l1_hits, 1);
    assert_eq!(stats.l2_hits + stats.l2_misses, 0);
}

#[test]
fn record_counts_writeback() {
    let mut stats = HierarchyStats::default();
    stats.record(&AccessResult::new(
        AccessState::ReadMiss,
        AccessState::ReadMiss,
        MemoryState::Write,
    ));

    assert_eq!(stats.reads, 1);
    assert_eq!(stats.l1_misses, 1);
    assert_eq!(stats.l2_misses, 1);
    assert_eq!(stats.memory_writes, 1);
}

/// R0 R4 R0 R0: 3 L1 misses out of 4, 1 L2 hit out of 3 lookups.
#[test]
fn hierarchy_counts_and_rates() {
    let mut ctx = TestContext::single_block();
    let _ = ctx.read(0x0);
    let _ = ctx.read(0x4);
    let _ = ctx.read(0x0);
    let _ = ctx.read(0x0);

    let stats = ctx.caches.stats();
    assert_eq!(stats.accesses(), 4);
    assert_eq!(stats.l1_hits, 1);
    assert_eq!(stats.l1_misses, 3);
    assert_eq!(stats.l2_hits, 1);
    assert_eq!(stats.l2_misses, 2);
    assert!((stats.l1_miss_rate() - 0.75).abs() < 1e-9);
    assert!((stats.l2_miss_rate() - 2.0 / 3.0).abs() < 1e-9);
}

/// W0 W4 W8: two L1 evictions, one L2 eviction, one write-back.
#[test]
fn hierarchy_counts_evictions() {
    let mut ctx = TestContext::single_block();
    let _ = ctx.write(0x0);
    let _ = ctx.write(0x4);
    let _ = ctx.write(0x8);

    let stats = ctx.caches.stats();
    assert_eq!(stats.writes, 3);
    assert_eq!(stats.l1_evictions, 2);
    assert_eq!(stats.l2_evictions, 1);
    assert_eq!(stats.memory_writes, 1);
}
