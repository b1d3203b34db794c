//! Least Recently Used (LRU) Replacement Policy.
//!
//! This policy evicts the way that has gone longest without a hit or fill.
//! It maintains a usage stack for each set. When a way is accessed, it is moved
//! to the top (Most Recently Used position). The bottom of the stack is the
//! Least Recently Used way.
//!
//! Every stack always holds each way index exactly once, so the order is total
//! and victim selection never ties.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `update()`: O(W) where W is the number of ways (associativity)
//!   - `get_victim()`: O(1)
//! - **Space Complexity:** O(S × W) where S is the number of sets

use super::ReplacementPolicy;

/// LRU Policy state.
#[derive(Debug, Clone)]
pub struct LruPolicy {
    /// A vector of usage stacks (one per set).
    /// Index 0 is MRU, last index is LRU.
    usage: Vec<Vec<usize>>,
}

impl LruPolicy {
    /// Creates a new LRU policy instance.
    ///
    /// The initial order of every set is `[0, 1, .., ways - 1]`, so an
    /// untouched set offers its last way as the victim.
    ///
    /// # Arguments
    ///
    /// * `sets` - The number of sets in the cache.
    /// * `ways` - The associativity (number of ways) of the cache.
    pub fn new(sets: usize, ways: usize) -> Self {
        Self {
            usage: (0..sets).map(|_| (0..ways).collect()).collect(),
        }
    }

    /// Returns the recency order of `set`, most recently used first.
    pub fn order(&self, set: usize) -> &[usize] {
        &self.usage[set]
    }
}

impl ReplacementPolicy for LruPolicy {
    /// Moves the accessed `way` to the front of the usage stack (MRU position),
    /// shifting the ways ahead of it down by one.
    fn update(&mut self, set: usize, way: usize) {
        let stack = &mut self.usage[set];
        if let Some(pos) = stack.iter().position(|&x| x == way) {
            stack[..=pos].rotate_right(1);
        }
    }

    /// Returns the way at the bottom of the usage stack (LRU position).
    fn get_victim(&self, set: usize) -> usize {
        self.usage[set].last().copied().unwrap_or(0)
    }
}
