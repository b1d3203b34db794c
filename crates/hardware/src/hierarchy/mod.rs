//! Exclusive two-level cache hierarchy.
//!
//! L1 is looked up first; L2 only on an L1 miss. A block lives in at most one
//! level at a time:
//! 1. **Promotion:** An L2 hit removes the block from L2 and installs it in L1,
//!    carrying its dirty bit (set unconditionally for writes).
//! 2. **Allocation:** An L2 miss fetches the block from memory into L1, clean
//!    for reads and dirty for writes (write-allocate).
//! 3. **Cascade:** A valid L1 victim always moves into L2. If that in turn
//!    pushes out a valid L2 victim, a dirty one is written back to memory and a
//!    clean one is dropped.
//!
//! The reported L2 state reflects only the lookup made for the access itself,
//! never the insertion of an L1 victim.

/// Access outcome codes.
pub mod state;

use tracing::{debug, trace};

pub use self::state::{AccessResult, AccessState, MemoryState};
use crate::cache::{Block, CacheLevel, Lookup};
use crate::common::{Addr, ConfigError, Decoded, Level, Operation};
use crate::config::{HierarchyConfig, HierarchyGeometry};
use crate::stats::HierarchyStats;

/// Where the block containing an address currently lives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Residency {
    /// Not cached.
    Absent,
    /// Resident in L1.
    L1,
    /// Resident in L2.
    L2,
}

/// L1 and L2 operated as one exclusive hierarchy.
#[derive(Debug)]
pub struct CacheHierarchy {
    l1: CacheLevel,
    l2: CacheLevel,
    stats: HierarchyStats,
}

impl CacheHierarchy {
    /// Creates an empty hierarchy from validated geometries.
    pub fn new(geometry: &HierarchyGeometry) -> Self {
        Self {
            l1: CacheLevel::new(Level::L1, &geometry.l1),
            l2: CacheLevel::new(Level::L2, &geometry.l2),
            stats: HierarchyStats::default(),
        }
    }

    /// Validates `config` and creates an empty hierarchy.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found by [`HierarchyConfig::validate`].
    pub fn from_config(config: &HierarchyConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(&config.validate()?))
    }

    /// The first-level cache.
    pub const fn l1(&self) -> &CacheLevel {
        &self.l1
    }

    /// The second-level cache.
    pub const fn l2(&self) -> &CacheLevel {
        &self.l2
    }

    /// Counters accumulated since construction.
    pub const fn stats(&self) -> &HierarchyStats {
        &self.stats
    }

    /// Performs one trace access.
    pub fn access(&mut self, op: Operation, addr: Addr) -> AccessResult {
        match op {
            Operation::Read => self.read(addr),
            Operation::Write => self.write(addr),
        }
    }

    /// Reads `addr`.
    pub fn read(&mut self, addr: Addr) -> AccessResult {
        self.service(addr, false)
    }

    /// Writes `addr`.
    pub fn write(&mut self, addr: Addr) -> AccessResult {
        self.service(addr, true)
    }

    /// Reports which level holds the block containing `addr`.
    pub fn residency(&self, addr: Addr) -> Residency {
        if self.l1.contains(addr) {
            Residency::L1
        } else if self.l2.contains(addr) {
            Residency::L2
        } else {
            Residency::Absent
        }
    }

    fn service(&mut self, addr: Addr, write: bool) -> AccessResult {
        let d1 = self.l1.decode(addr);

        let result = if let Lookup::Hit(way) = self.l1.lookup(d1.tag, d1.set) {
            if write {
                self.l1.set_dirty(d1.set, way);
            }
            self.l1.mark_accessed(d1.set, way);
            AccessResult::new(
                AccessState::hit(write),
                AccessState::NoAction,
                MemoryState::NoWrite,
            )
        } else {
            let (l2, promoted) = match self.take_from_l2(addr, write) {
                Some(block) => (AccessState::hit(write), block.dirty),
                None => (AccessState::miss(write), false),
            };
            let mem = self.fill_l1(d1, write || promoted);
            AccessResult::new(AccessState::miss(write), l2, mem)
        };

        trace!(%addr, write, %result, "access");
        self.stats.record(&result);
        result
    }

    /// Looks `addr` up in L2 and, on a hit, removes the block so it can move
    /// to L1. A write hit marks the block dirty before it leaves.
    fn take_from_l2(&mut self, addr: Addr, write: bool) -> Option<Block> {
        let d2 = self.l2.decode(addr);
        match self.l2.lookup(d2.tag, d2.set) {
            Lookup::Hit(way) => {
                if write {
                    self.l2.set_dirty(d2.set, way);
                }
                self.l2.mark_accessed(d2.set, way);
                Some(self.l2.invalidate(d2.set, way))
            }
            Lookup::Miss => None,
        }
    }

    /// Installs the block `d1` in L1 and runs the eviction cascade.
    fn fill_l1(&mut self, d1: Decoded, dirty: bool) -> MemoryState {
        let Some(victim) = self.l1.insert(d1.tag, d1.set, dirty) else {
            return MemoryState::NoWrite;
        };
        self.stats.l1_evictions += 1;

        let victim_addr = self.l1.decoder().block_address(victim.tag, d1.set);
        debug!(addr = %victim_addr, dirty = victim.dirty, "L1 victim moved to L2");

        let d2 = self.l2.decode(victim_addr);
        let Some(dropped) = self.l2.insert(d2.tag, d2.set, victim.dirty) else {
            return MemoryState::NoWrite;
        };
        self.stats.l2_evictions += 1;

        let dropped_addr = self.l2.decoder().block_address(dropped.tag, d2.set);
        if dropped.dirty {
            debug!(addr = %dropped_addr, "dirty L2 victim written back to memory");
            MemoryState::Write
        } else {
            debug!(addr = %dropped_addr, "clean L2 victim dropped");
            MemoryState::NoWrite
        }
    }
}
