//! Two-level exclusive cache hierarchy simulator library.
//!
//! This crate reproduces the hit/miss/write-back decisions of an L1 + L2
//! cache hierarchy for a memory trace:
//! 1. **Common:** Addresses and their tag/set/offset decomposition, errors.
//! 2. **Cache:** A set-associative level with LRU replacement.
//! 3. **Hierarchy:** The exclusive read and write protocols and the
//!    L1 → L2 → memory eviction cascade.
//! 4. **Simulation:** Configuration loading, trace parsing, result logging,
//!    and statistics.
//!
//! ```
//! use cachesim_core::config::{CacheConfig, HierarchyConfig};
//! use cachesim_core::{Addr, CacheHierarchy};
//!
//! let config = HierarchyConfig::new(CacheConfig::new(4, 1, 4), CacheConfig::new(4, 1, 4));
//! let mut caches = CacheHierarchy::from_config(&config).unwrap();
//! assert_eq!(caches.read(Addr(0x0)).to_string(), "2 2 5");
//! assert_eq!(caches.read(Addr(0x0)).to_string(), "1 0 5");
//! ```

/// Set-associative cache level and replacement policies.
pub mod cache;
/// Common types and constants (addresses, operations, levels, errors).
pub mod common;
/// Cache configuration, file formats, and validation.
pub mod config;
/// Exclusive L1/L2 hierarchy and access outcome codes.
pub mod hierarchy;
/// Trace reading, result logging, and the simulation driver.
pub mod sim;
/// Hierarchy statistics collection and reporting.
pub mod stats;

/// Strong 32-bit trace address.
pub use crate::common::Addr;
/// Root configuration type; parse from text or deserialize from JSON.
pub use crate::config::HierarchyConfig;
/// The exclusive two-level hierarchy.
pub use crate::hierarchy::CacheHierarchy;
/// Trace driver; construct with `Simulator::new`.
pub use crate::sim::Simulator;
