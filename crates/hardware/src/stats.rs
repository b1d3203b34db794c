//! Simulation statistics collection and reporting.
//!
//! This module tracks what the hierarchy did over a trace. It provides:
//! 1. **Access mix:** Read and write counts.
//! 2. **Per-level outcomes:** Hit/miss counts for L1 and for L2 lookups.
//! 3. **Traffic:** Evictions out of each level and write-backs to memory.

use std::time::Instant;

use crate::hierarchy::{AccessResult, MemoryState};

/// Hierarchy statistics tracking all counted events.
#[derive(Clone, Debug)]
pub struct HierarchyStats {
    start_time: Instant,
    /// Number of read records processed.
    pub reads: u64,
    /// Number of write records processed.
    pub writes: u64,

    /// L1 hit count.
    pub l1_hits: u64,
    /// L1 miss count.
    pub l1_misses: u64,
    /// L2 hit count (lookups after an L1 miss).
    pub l2_hits: u64,
    /// L2 miss count (lookups after an L1 miss).
    pub l2_misses: u64,

    /// Valid blocks moved from L1 into L2 to make room.
    pub l1_evictions: u64,
    /// Valid blocks pushed out of L2, clean or dirty.
    pub l2_evictions: u64,
    /// Dirty blocks written back to memory.
    pub memory_writes: u64,
}

impl Default for HierarchyStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            reads: 0,
            writes: 0,
            l1_hits: 0,
            l1_misses: 0,
            l2_hits: 0,
            l2_misses: 0,
            l1_evictions: 0,
            l2_evictions: 0,
            memory_writes: 0,
        }
    }
}

impl HierarchyStats {
    /// Counts the outcome of one access.
    pub fn record(&mut self, result: &AccessResult) {
        if result.l1.is_read() {
            self.reads += 1;
        } else {
            self.writes += 1;
        }

        if result.l1.is_hit() {
            self.l1_hits += 1;
        } else {
            self.l1_misses += 1;
        }

        if result.l2.is_hit() {
            self.l2_hits += 1;
        } else if result.l2.is_miss() {
            self.l2_misses += 1;
        }

        if result.mem == MemoryState::Write {
            self.memory_writes += 1;
        }
    }

    /// Total number of accesses recorded.
    pub const fn accesses(&self) -> u64 {
        self.reads + self.writes
    }

    /// Fraction of accesses that missed in L1, or `0.0` before any access.
    pub fn l1_miss_rate(&self) -> f64 {
        ratio(self.l1_misses, self.l1_hits + self.l1_misses)
    }

    /// Fraction of L2 lookups that missed, or `0.0` before any lookup.
    pub fn l2_miss_rate(&self) -> f64 {
        ratio(self.l2_misses, self.l2_hits + self.l2_misses)
    }

    /// Prints all statistics to stdout.
    pub fn print(&self) {
        let seconds = self.start_time.elapsed().as_secs_f64();
        let print_cache = |name: &str, hits: u64, misses: u64, rate: f64| {
            println!(
                "  {:<6} accesses: {:<10} | hits: {:<10} | miss_rate: {:.2}%",
                name,
                hits + misses,
                hits,
                rate * 100.0
            );
        };

        println!("\n==========================================================");
        println!("CACHE HIERARCHY STATISTICS");
        println!("==========================================================");
        println!("host_seconds             {seconds:.4} s");
        println!("sim_accesses             {}", self.accesses());
        println!("  reads                  {}", self.reads);
        println!("  writes                 {}", self.writes);
        println!("----------------------------------------------------------");
        println!("MEMORY HIERARCHY");
        print_cache("L1", self.l1_hits, self.l1_misses, self.l1_miss_rate());
        print_cache("L2", self.l2_hits, self.l2_misses, self.l2_miss_rate());
        println!("----------------------------------------------------------");
        println!("TRAFFIC");
        println!("  l1.evictions           {}", self.l1_evictions);
        println!("  l2.evictions           {}", self.l2_evictions);
        println!("  mem.writebacks         {}", self.memory_writes);
        println!("==========================================================");
    }
}

fn ratio(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64
    }
}
