//! Trace addresses and their decomposition.
//!
//! This module defines the strong address type used by the hierarchy and the
//! decoder that splits it for one cache geometry. It provides the following:
//! 1. **Type Safety:** `Addr` distinguishes byte addresses from tags and set indices.
//! 2. **Decomposition:** `AddressDecoder` splits an address MSB to LSB into
//!    `TAG || SET || OFFSET`.
//! 3. **Reconstruction:** Rebuilding a block address from a stored tag and set,
//!    used when an evicted L1 block is re-decoded against the L2 geometry.

use std::fmt;

use super::constants::ADDRESS_BITS;
use super::error::GeometryError;

/// A 32-bit byte address from a memory trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Addr(pub u32);

impl Addr {
    /// Creates a new address from a raw 32-bit value.
    #[inline(always)]
    pub const fn new(addr: u32) -> Self {
        Self(addr)
    }

    /// Returns the raw 32-bit address value.
    #[inline(always)]
    pub const fn val(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Addr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

/// The fields of an address as seen by one cache level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decoded {
    /// High-order bits identifying the block within its set.
    pub tag: u32,
    /// Index of the set the block maps to.
    pub set: usize,
    /// Byte offset within the block.
    pub offset: u32,
}

/// Splits addresses for a given block size and set count.
///
/// Both parameters must be powers of two and together must leave a
/// non-negative number of tag bits:
///
/// - `offset_bits = log2(line_bytes)`
/// - `index_bits  = log2(num_sets)`
/// - `tag_bits    = 32 - offset_bits - index_bits`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddressDecoder {
    line_bytes: u32,
    num_sets: u32,
    offset_bits: u32,
    index_bits: u32,
}

impl AddressDecoder {
    /// Creates a decoder for `line_bytes`-byte blocks spread over `num_sets` sets.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NotPowerOfTwo`] if either parameter is zero or
    /// not a power of two, and [`GeometryError::AddressTooNarrow`] if the
    /// offset and index fields do not fit in a 32-bit address.
    pub fn new(line_bytes: u32, num_sets: u32) -> Result<Self, GeometryError> {
        if !line_bytes.is_power_of_two() {
            return Err(GeometryError::NotPowerOfTwo {
                what: "block size",
                value: u64::from(line_bytes),
            });
        }
        if !num_sets.is_power_of_two() {
            return Err(GeometryError::NotPowerOfTwo {
                what: "set count",
                value: u64::from(num_sets),
            });
        }

        let offset_bits = line_bytes.trailing_zeros();
        let index_bits = num_sets.trailing_zeros();
        if offset_bits + index_bits > ADDRESS_BITS {
            return Err(GeometryError::AddressTooNarrow {
                offset_bits,
                index_bits,
            });
        }

        Ok(Self {
            line_bytes,
            num_sets,
            offset_bits,
            index_bits,
        })
    }

    /// Block size in bytes.
    pub const fn line_bytes(&self) -> u32 {
        self.line_bytes
    }

    /// Number of sets addressed by the index field.
    pub const fn num_sets(&self) -> u32 {
        self.num_sets
    }

    /// Width of the block-offset field.
    pub const fn offset_bits(&self) -> u32 {
        self.offset_bits
    }

    /// Width of the set-index field.
    pub const fn index_bits(&self) -> u32 {
        self.index_bits
    }

    /// Width of the tag field.
    pub const fn tag_bits(&self) -> u32 {
        ADDRESS_BITS - self.offset_bits - self.index_bits
    }

    /// Splits `addr` into tag, set index, and block offset.
    #[inline]
    pub fn decode(&self, addr: Addr) -> Decoded {
        let raw = addr.val();
        // offset_bits <= 31 since line_bytes is a u32 power of two.
        let set = (raw >> self.offset_bits) & (self.num_sets - 1);
        let tag = raw
            .checked_shr(self.offset_bits + self.index_bits)
            .unwrap_or(0);
        Decoded {
            tag,
            set: set as usize,
            offset: raw & (self.line_bytes - 1),
        }
    }

    /// Rebuilds the address of the first byte of the block `tag` in `set`.
    ///
    /// Inverse of [`decode`](Self::decode) with the offset cleared.
    #[inline]
    pub fn block_address(&self, tag: u32, set: usize) -> Addr {
        let high = tag
            .checked_shl(self.offset_bits + self.index_bits)
            .unwrap_or(0);
        let mid = ((set as u32) & (self.num_sets - 1)) << self.offset_bits;
        Addr(high | mid)
    }
}
