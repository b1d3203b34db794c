//! Cache Replacement Policies.
//!
//! Replacement state is kept apart from block contents: a policy only sees
//! `(set, way)` pairs and answers which way of a full set to evict.
//!
//! # Policies
//!
//! - `Lru`: Least Recently Used, tracked as an explicit per-set recency order.

/// Least Recently Used replacement policy.
pub mod lru;

use std::fmt;

pub use lru::LruPolicy;

/// Trait for cache replacement policies.
///
/// Defines the interface for updating usage state and selecting victim lines.
pub trait ReplacementPolicy: fmt::Debug + Send + Sync {
    /// Updates the policy state when a way is hit or filled.
    ///
    /// # Arguments
    ///
    /// * `set` - The cache set index.
    /// * `way` - The way index within the set that was accessed.
    fn update(&mut self, set: usize, way: usize);

    /// Selects the way to evict from a full set.
    ///
    /// # Arguments
    ///
    /// * `set` - The cache set index.
    ///
    /// # Returns
    ///
    /// The index of the way to evict.
    fn get_victim(&self, set: usize) -> usize;
}
