//! Memory Access Types.
//!
//! This module defines the small vocabulary shared by the trace parser, the
//! hierarchy, and error reporting:
//! 1. **Operations:** Whether a trace record reads or writes its address.
//! 2. **Levels:** Which cache level a configuration value or eviction refers to.

use std::fmt;

/// Type of memory access operation carried by a trace record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Data read access (`R` in the trace).
    Read,

    /// Data write access (`W` in the trace).
    ///
    /// Writes allocate on miss and mark the filled block dirty.
    Write,
}

impl Operation {
    /// Returns the trace token for this operation.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Read => "R",
            Self::Write => "W",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// A level of the two-level cache hierarchy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Level {
    /// First-level cache, looked up on every access.
    L1,
    /// Second-level cache, holding blocks evicted from L1.
    L2,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::L1 => f.write_str("L1"),
            Self::L2 => f.write_str("L2"),
        }
    }
}
