//! Per-access outcome codes.
//!
//! The numeric values are the result-log encoding and must not change:
//!
//! | State         | Code |
//! |---------------|------|
//! | `NoAction`    | 0    |
//! | `ReadHit`     | 1    |
//! | `ReadMiss`    | 2    |
//! | `WriteHit`    | 3    |
//! | `WriteMiss`   | 4    |
//! | `NoWrite`     | 5    |
//! | `Write`       | 6    |

use std::fmt;

/// What a single cache level did for one access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum AccessState {
    /// The level was not consulted.
    NoAction = 0,
    /// A read found the block.
    ReadHit = 1,
    /// A read did not find the block.
    ReadMiss = 2,
    /// A write found the block.
    WriteHit = 3,
    /// A write did not find the block.
    WriteMiss = 4,
}

impl AccessState {
    /// Result-log code.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Whether the level found the block.
    pub const fn is_hit(self) -> bool {
        matches!(self, Self::ReadHit | Self::WriteHit)
    }

    /// Whether this state belongs to a read.
    pub const fn is_read(self) -> bool {
        matches!(self, Self::ReadHit | Self::ReadMiss)
    }

    /// Whether the level was consulted and missed.
    pub const fn is_miss(self) -> bool {
        matches!(self, Self::ReadMiss | Self::WriteMiss)
    }

    pub(crate) const fn hit(write: bool) -> Self {
        if write { Self::WriteHit } else { Self::ReadHit }
    }

    pub(crate) const fn miss(write: bool) -> Self {
        if write { Self::WriteMiss } else { Self::ReadMiss }
    }
}

/// Whether an access forced a write-back to main memory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MemoryState {
    /// No dirty block left the hierarchy.
    NoWrite = 5,
    /// A dirty block was evicted from L2 and written to memory.
    Write = 6,
}

impl MemoryState {
    /// Result-log code.
    pub const fn code(self) -> u8 {
        self as u8
    }
}

/// The three outcomes of one trace record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AccessResult {
    /// What L1 did.
    pub l1: AccessState,
    /// What L2 did for the original lookup (not for an eviction into it).
    pub l2: AccessState,
    /// Whether memory was written.
    pub mem: MemoryState,
}

impl AccessResult {
    /// Bundles the three outcomes.
    pub const fn new(l1: AccessState, l2: AccessState, mem: MemoryState) -> Self {
        Self { l1, l2, mem }
    }

    /// The three result-log codes in output order.
    pub const fn codes(&self) -> [u8; 3] {
        [self.l1.code(), self.l2.code(), self.mem.code()]
    }
}

/// Formats as the result-log line without the newline: `<l1> <l2> <mem>`.
impl fmt::Display for AccessResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.l1.code(),
            self.l2.code(),
            self.mem.code()
        )
    }
}
