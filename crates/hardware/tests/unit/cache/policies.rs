//! Cache Replacement Policy Tests.
//!
//! Verifies the LRU victim selection logic in isolation. The policy exposes
//! `update(set, way)` and `get_victim(set) -> usize`; its recency order is
//! inspected with `order(set)`.

use cachesim_core::cache::policies::{LruPolicy, ReplacementPolicy};

// ══════════════════════════════════════════════════════════
// 1. Initial state
// ══════════════════════════════════════════════════════════

/// LruPolicy::new orders each set as [0, 1, .., ways-1] with index 0 = MRU,
/// so an untouched set offers its last way.
#[test]
fn lru_initial_victim_is_last_way() {
    let policy = LruPolicy::new(1, 4);
    assert_eq!(policy.order(0), &[0, 1, 2, 3]);
    assert_eq!(policy.get_victim(0), 3);
}

// ══════════════════════════════════════════════════════════
// 2. Reordering
// ══════════════════════════════════════════════════════════

/// Accessing ways in order 0,1,2,3 makes 0 the LRU.
#[test]
fn lru_sequential_access_reorders() {
    let mut policy = LruPolicy::new(1, 4);

    for way in 0..4 {
        policy.update(0, way);
    }
    assert_eq!(policy.order(0), &[3, 2, 1, 0]);
    assert_eq!(policy.get_victim(0), 0);
}

/// Classic LRU scenario: access 0,1,2,3 then re-access 0 → LRU becomes 1.
#[test]
fn lru_evicts_true_lru_after_reaccess() {
    let mut policy = LruPolicy::new(1, 4);
    for way in 0..4 {
        policy.update(0, way);
    }

    policy.update(0, 0);
    assert_eq!(policy.order(0), &[0, 3, 2, 1]);
    assert_eq!(policy.get_victim(0), 1);

    policy.update(0, 1);
    assert_eq!(policy.get_victim(0), 2);
}

/// Re-accessing the MRU way changes nothing.
#[test]
fn lru_repeated_access_same_way() {
    let mut policy = LruPolicy::new(1, 4);
    for way in 0..4 {
        policy.update(0, way);
    }

    policy.update(0, 3);
    policy.update(0, 3);
    assert_eq!(policy.order(0), &[3, 2, 1, 0]);
}

// ══════════════════════════════════════════════════════════
// 3. Set isolation and degenerate shapes
// ══════════════════════════════════════════════════════════

/// Updates in one set never reorder another.
#[test]
fn lru_sets_are_independent() {
    let mut policy = LruPolicy::new(2, 2);
    policy.update(0, 1);
    assert_eq!(policy.get_victim(0), 0);
    assert_eq!(policy.get_victim(1), 1);
}

/// A direct-mapped set always evicts way 0.
#[test]
fn lru_single_way() {
    let mut policy = LruPolicy::new(4, 1);
    policy.update(2, 0);
    assert_eq!(policy.get_victim(2), 0);
    assert_eq!(policy.order(2), &[0]);
}

/// Every way appears exactly once after any sequence of updates.
#[test]
fn lru_order_is_a_permutation() {
    let mut policy = LruPolicy::new(1, 8);
    for way in [5, 1, 5, 7, 0, 3, 3, 6, 2, 4, 1] {
        policy.update(0, way);
    }
    let mut seen = policy.order(0).to_vec();
    seen.sort_unstable();
    assert_eq!(seen, (0..8).collect::<Vec<_>>());
    assert_eq!(policy.order(0)[0], 1);
}
