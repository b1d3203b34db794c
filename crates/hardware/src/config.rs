//! Configuration system for the cache simulator.
//!
//! This module defines the parameters of the two cache levels and turns them
//! into validated geometries. It provides:
//! 1. **Defaults:** Baseline block size, associativity, and capacity.
//! 2. **Structures:** `CacheConfig` per level and `HierarchyConfig` for both.
//! 3. **Formats:** The plain-text `L1: b a s L2: b a s` format and JSON.
//! 4. **Validation:** Power-of-two checks, fully-associative resolution, and
//!    the matching block size requirement.
//!
//! An associativity of `0` selects a fully associative level: one set holding
//! `size_bytes / line_bytes` ways.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::common::{AddressDecoder, ConfigError, GeometryError, Level};

/// Default configuration constants for a cache level.
mod defaults {
    /// Default cache size in bytes (4 KiB).
    pub const CACHE_SIZE: usize = 4096;

    /// Default cache line size in bytes (64 bytes).
    pub const CACHE_LINE: usize = 64;

    /// Default cache associativity (1 way = direct-mapped).
    pub const CACHE_WAYS: usize = 1;
}

/// Root configuration: the parameters of both levels.
///
/// # Examples
///
/// Parsing the plain-text format:
///
/// ```
/// use cachesim_core::config::HierarchyConfig;
///
/// let config: HierarchyConfig = "L1: 8 2 64\nL2: 8 4 256\n".parse().unwrap();
/// assert_eq!(config.l1.ways, 2);
/// assert_eq!(config.l2.size_bytes, 256);
/// ```
///
/// Deserializing from JSON:
///
/// ```
/// use cachesim_core::config::HierarchyConfig;
///
/// let json = r#"{
///     "l1": { "line_bytes": 16, "ways": 0, "size_bytes": 64 },
///     "l2": { "line_bytes": 16, "ways": 4, "size_bytes": 1024 }
/// }"#;
/// let config: HierarchyConfig = serde_json::from_str(json).unwrap();
/// let geometry = config.validate().unwrap();
/// assert_eq!(geometry.l1.ways, 4);
/// assert_eq!(geometry.l2.decoder.num_sets(), 16);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct HierarchyConfig {
    /// First-level cache.
    #[serde(default)]
    pub l1: CacheConfig,
    /// Second-level cache.
    #[serde(default)]
    pub l2: CacheConfig,
}

/// Individual cache level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CacheConfig {
    /// Cache line (block) size in bytes
    #[serde(default = "CacheConfig::default_line")]
    pub line_bytes: usize,

    /// Associativity (number of ways); `0` means fully associative
    #[serde(default = "CacheConfig::default_ways")]
    pub ways: usize,

    /// Total cache size in bytes
    #[serde(default = "CacheConfig::default_size")]
    pub size_bytes: usize,
}

impl CacheConfig {
    /// Creates a level configuration from block size, associativity, and total size.
    pub const fn new(line_bytes: usize, ways: usize, size_bytes: usize) -> Self {
        Self {
            line_bytes,
            ways,
            size_bytes,
        }
    }

    fn default_size() -> usize {
        defaults::CACHE_SIZE
    }

    fn default_line() -> usize {
        defaults::CACHE_LINE
    }

    fn default_ways() -> usize {
        defaults::CACHE_WAYS
    }

    /// Derives the decoded geometry of this level.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming `level` if the block size is not a
    /// power of two, the capacity is not a whole power-of-two number of sets,
    /// or the layout leaves a negative number of tag bits.
    pub fn geometry(&self, level: Level) -> Result<LevelGeometry, ConfigError> {
        let line = self.line_bytes;
        let size = self.size_bytes;

        if !line.is_power_of_two() {
            return Err(ConfigError::BlockSize { level, value: line });
        }

        let ways = if self.ways == 0 { size / line } else { self.ways };
        if ways == 0 || size < line {
            return Err(ConfigError::Capacity { level, size, line });
        }

        let indivisible = ConfigError::Indivisible {
            level,
            size,
            line,
            ways,
        };
        let Some(set_bytes) = line.checked_mul(ways) else {
            return Err(indivisible);
        };
        if size < set_bytes || size % set_bytes != 0 {
            return Err(indivisible);
        }

        let sets = size / set_bytes;
        if !sets.is_power_of_two() {
            return Err(ConfigError::SetCount { level, sets });
        }

        let too_narrow = ConfigError::Geometry {
            level,
            source: GeometryError::AddressTooNarrow {
                offset_bits: line.trailing_zeros(),
                index_bits: sets.trailing_zeros(),
            },
        };
        let (Ok(line_u32), Ok(sets_u32)) = (u32::try_from(line), u32::try_from(sets)) else {
            return Err(too_narrow);
        };
        let decoder = AddressDecoder::new(line_u32, sets_u32)
            .map_err(|source| ConfigError::Geometry { level, source })?;

        Ok(LevelGeometry { decoder, ways })
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            line_bytes: defaults::CACHE_LINE,
            ways: defaults::CACHE_WAYS,
            size_bytes: defaults::CACHE_SIZE,
        }
    }
}

/// Validated shape of one cache level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelGeometry {
    /// Address decoder for this level's block size and set count.
    pub decoder: AddressDecoder,
    /// Resolved associativity (never zero).
    pub ways: usize,
}

impl LevelGeometry {
    /// Total number of blocks the level can hold.
    pub const fn capacity_blocks(&self) -> usize {
        self.decoder.num_sets() as usize * self.ways
    }
}

/// Validated shapes of both levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HierarchyGeometry {
    /// First-level geometry.
    pub l1: LevelGeometry,
    /// Second-level geometry.
    pub l2: LevelGeometry,
}

impl HierarchyConfig {
    /// Creates a configuration from the two level configurations.
    pub const fn new(l1: CacheConfig, l2: CacheConfig) -> Self {
        Self { l1, l2 }
    }

    /// Loads a configuration file.
    ///
    /// Files with a `.json` extension are deserialized as JSON; anything else
    /// is read in the plain-text format (see [`parse_text`](Self::parse_text)).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and a parse
    /// error if its contents are not a valid configuration.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Ok(serde_json::from_str(&text)?)
        } else {
            Self::parse_text(&text)
        }
    }

    /// Parses the plain-text configuration format.
    ///
    /// The input is a sequence of whitespace-separated tokens:
    ///
    /// ```text
    /// L1: <block size> <associativity> <cache size>
    /// L2: <block size> <associativity> <cache size>
    /// ```
    ///
    /// The two label tokens are skipped whatever they contain. Tokens after
    /// the last L2 value are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] if the input ends early and
    /// [`ConfigError::Parse`] if a numeric token is not a non-negative integer.
    pub fn parse_text(text: &str) -> Result<Self, ConfigError> {
        let mut tokens = text.split_whitespace();
        let l1 = parse_level(&mut tokens, &L1_FIELDS)?;
        let l2 = parse_level(&mut tokens, &L2_FIELDS)?;
        Ok(Self { l1, l2 })
    }

    /// Validates both levels and the cross-level block size requirement.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::BlockSizeMismatch`] if the levels use different
    /// block sizes, otherwise the first per-level error (L1 before L2).
    pub fn validate(&self) -> Result<HierarchyGeometry, ConfigError> {
        if self.l1.line_bytes != self.l2.line_bytes {
            return Err(ConfigError::BlockSizeMismatch {
                l1: self.l1.line_bytes,
                l2: self.l2.line_bytes,
            });
        }
        Ok(HierarchyGeometry {
            l1: self.l1.geometry(Level::L1)?,
            l2: self.l2.geometry(Level::L2)?,
        })
    }
}

impl FromStr for HierarchyConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_text(s)
    }
}

/// Field names used in parse errors, in file order: label, block, ways, size.
const L1_FIELDS: [&str; 4] = [
    "the L1 label",
    "L1 block size",
    "L1 associativity",
    "L1 cache size",
];
const L2_FIELDS: [&str; 4] = [
    "the L2 label",
    "L2 block size",
    "L2 associativity",
    "L2 cache size",
];

fn parse_level<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    fields: &[&'static str; 4],
) -> Result<CacheConfig, ConfigError> {
    let [label, line, ways, size] = *fields;
    let _label = tokens.next().ok_or(ConfigError::Missing { field: label })?;
    let mut next = |field: &'static str| -> Result<usize, ConfigError> {
        let token = tokens.next().ok_or(ConfigError::Missing { field })?;
        token.parse().map_err(|_| ConfigError::Parse {
            field,
            found: token.to_owned(),
        })
    };
    Ok(CacheConfig {
        line_bytes: next(line)?,
        ways: next(ways)?,
        size_bytes: next(size)?,
    })
}
