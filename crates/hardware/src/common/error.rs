//! Error definitions.
//!
//! This module defines the failure modes of the simulator. It provides:
//! 1. **Geometry Errors:** Address layouts that cannot be decoded.
//! 2. **Configuration Errors:** Unreadable, unparseable, or invalid cache parameters.
//!    These are fatal and reported before any trace processing.
//! 3. **Trace Errors:** A trace line that cannot be turned into an access. These
//!    halt processing at that line; results already produced stay valid.
//! 4. **Simulation Errors:** The top-level error returned by the trace driver.

use std::io;

use thiserror::Error;

use super::data::Level;

/// An address layout that cannot be represented.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// A block size or set count is zero or not a power of two.
    #[error("{what} must be a non-zero power of two, got {value}")]
    NotPowerOfTwo {
        /// Which parameter was rejected.
        what: &'static str,
        /// The rejected value.
        value: u64,
    },

    /// Offset and index fields together are wider than the address.
    #[error(
        "{offset_bits} offset bits and {index_bits} index bits do not fit in a 32-bit address"
    )]
    AddressTooNarrow {
        /// Width of the block-offset field.
        offset_bits: u32,
        /// Width of the set-index field.
        index_bits: u32,
    },
}

/// A cache configuration that cannot be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("cannot read configuration: {0}")]
    Io(#[from] io::Error),

    /// A JSON configuration did not deserialize.
    #[error("invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// The text configuration ended before `field` was read.
    #[error("configuration ended before {field}")]
    Missing {
        /// Description of the expected value.
        field: &'static str,
    },

    /// A text configuration token is not a non-negative integer.
    #[error("{field}: expected a non-negative integer, got {found:?}")]
    Parse {
        /// Description of the expected value.
        field: &'static str,
        /// The offending token.
        found: String,
    },

    /// The block size is zero or not a power of two.
    #[error("{level}: block size must be a non-zero power of two, got {value}")]
    BlockSize {
        /// Level the value belongs to.
        level: Level,
        /// The rejected block size.
        value: usize,
    },

    /// The cache holds no complete block.
    #[error("{level}: cache size {size} cannot hold a single {line}-byte block")]
    Capacity {
        /// Level the value belongs to.
        level: Level,
        /// Configured total size in bytes.
        size: usize,
        /// Configured block size in bytes.
        line: usize,
    },

    /// The total size is not a whole number of sets.
    #[error("{level}: cache size {size} is not a multiple of {line}-byte blocks x {ways} ways")]
    Indivisible {
        /// Level the value belongs to.
        level: Level,
        /// Configured total size in bytes.
        size: usize,
        /// Configured block size in bytes.
        line: usize,
        /// Resolved associativity.
        ways: usize,
    },

    /// The derived set count is not a power of two.
    #[error("{level}: set count {sets} is not a power of two")]
    SetCount {
        /// Level the value belongs to.
        level: Level,
        /// Derived number of sets.
        sets: usize,
    },

    /// The derived address layout cannot be decoded.
    #[error("{level}: {source}")]
    Geometry {
        /// Level the value belongs to.
        level: Level,
        /// Underlying layout problem.
        source: GeometryError,
    },

    /// L1 and L2 were configured with different block sizes.
    #[error("L1 and L2 block sizes must match (got {l1} and {l2})")]
    BlockSizeMismatch {
        /// L1 block size in bytes.
        l1: usize,
        /// L2 block size in bytes.
        l2: usize,
    },
}

/// Why a trace line could not be processed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TraceErrorKind {
    /// The operation or address field is missing.
    #[error("missing operation or address field")]
    Malformed,

    /// The address field is not a 32-bit hexadecimal value.
    #[error("invalid hexadecimal address {0:?}")]
    BadAddress(String),

    /// The operation token is neither `R` nor `W`.
    #[error("unknown operation {0:?}")]
    UnknownOperation(String),
}

/// A trace line that halted processing.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("trace line {line}: {kind}")]
pub struct TraceError {
    /// 1-based line number in the trace.
    pub line: usize,
    /// What was wrong with the line.
    pub kind: TraceErrorKind,
}

impl TraceError {
    /// Creates a trace error for `line`.
    pub const fn new(line: usize, kind: TraceErrorKind) -> Self {
        Self { line, kind }
    }
}

/// Top-level simulation error.
#[derive(Debug, Error)]
pub enum SimError {
    /// The hierarchy could not be configured.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A trace line could not be processed.
    #[error(transparent)]
    Trace(#[from] TraceError),

    /// Reading the trace or writing the result log failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
