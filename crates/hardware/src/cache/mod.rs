//! Set-Associative Cache Level.
//!
//! This module implements one level of the hierarchy. It tracks block
//! metadata only (no payload): each way holds a tag, a valid bit, and a dirty
//! bit. The same type backs both L1 and L2; the hierarchy decides how blocks
//! move between them.

/// Cache replacement policy implementations.
pub mod policies;

use self::policies::{LruPolicy, ReplacementPolicy};
use crate::common::{Addr, AddressDecoder, Decoded, Level};
use crate::config::LevelGeometry;

/// Cache line entry containing tag, validity, and dirty bits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Block {
    /// Tag bits of the block's address for this level's geometry.
    pub tag: u32,
    /// Whether the way holds a block at all.
    pub valid: bool,
    /// Whether the block was written since it entered the hierarchy.
    pub dirty: bool,
}

/// Outcome of a tag lookup in one set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lookup {
    /// The block is present in the given way.
    Hit(usize),
    /// No valid way carries the tag.
    Miss,
}

/// One set-associative cache level.
///
/// Blocks are stored set-major: way `w` of set `s` lives at `s * ways + w`.
/// Every public method taking a `set` or `way` expects values produced by
/// this level's own [`decode`](Self::decode) and [`lookup`](Self::lookup).
///
/// # Panics
///
/// Methods taking raw `set`/`way` indices panic if they are out of range for
/// the configured geometry.
#[derive(Debug)]
pub struct CacheLevel {
    level: Level,
    decoder: AddressDecoder,
    ways: usize,
    blocks: Vec<Block>,
    policy: Box<dyn ReplacementPolicy>,
}

impl CacheLevel {
    /// Creates an empty cache level with LRU replacement.
    pub fn new(level: Level, geometry: &LevelGeometry) -> Self {
        let num_sets = geometry.decoder.num_sets() as usize;
        Self {
            level,
            decoder: geometry.decoder,
            ways: geometry.ways,
            blocks: vec![Block::default(); num_sets * geometry.ways],
            policy: Box::new(LruPolicy::new(num_sets, geometry.ways)),
        }
    }

    /// Which level of the hierarchy this cache is.
    pub const fn level(&self) -> Level {
        self.level
    }

    /// The address decoder for this level's geometry.
    pub const fn decoder(&self) -> &AddressDecoder {
        &self.decoder
    }

    /// Associativity.
    pub const fn ways(&self) -> usize {
        self.ways
    }

    /// Number of sets.
    pub const fn num_sets(&self) -> usize {
        self.decoder.num_sets() as usize
    }

    /// Splits `addr` for this level.
    #[inline]
    pub fn decode(&self, addr: Addr) -> Decoded {
        self.decoder.decode(addr)
    }

    /// Searches `set` for a valid block carrying `tag`.
    pub fn lookup(&self, tag: u32, set: usize) -> Lookup {
        self.set_blocks(set)
            .iter()
            .position(|b| b.valid && b.tag == tag)
            .map_or(Lookup::Miss, Lookup::Hit)
    }

    /// Records a hit or fill of `way`, making it the most recently used.
    pub fn mark_accessed(&mut self, set: usize, way: usize) {
        self.policy.update(set, way);
    }

    /// Places a valid block with `tag` into `set`.
    ///
    /// An invalid way is filled first (lowest index wins). When every way is
    /// valid, the least recently used way is overwritten and its previous
    /// contents are returned. The filled way becomes the most recently used.
    pub fn insert(&mut self, tag: u32, set: usize, dirty: bool) -> Option<Block> {
        let (way, evicted) = match self.set_blocks(set).iter().position(|b| !b.valid) {
            Some(free) => (free, None),
            None => {
                let victim = self.policy.get_victim(set);
                (victim, Some(self.blocks[self.index(set, victim)]))
            }
        };

        let idx = self.index(set, way);
        self.blocks[idx] = Block {
            tag,
            valid: true,
            dirty,
        };
        self.policy.update(set, way);
        evicted
    }

    /// Marks the block in `way` as modified.
    pub fn set_dirty(&mut self, set: usize, way: usize) {
        let idx = self.index(set, way);
        self.blocks[idx].dirty = true;
    }

    /// Removes the block in `way`, returning what it held.
    pub fn invalidate(&mut self, set: usize, way: usize) -> Block {
        let idx = self.index(set, way);
        std::mem::take(&mut self.blocks[idx])
    }

    /// Returns the metadata stored in `way` of `set`.
    pub fn block(&self, set: usize, way: usize) -> Block {
        self.blocks[self.index(set, way)]
    }

    /// Checks whether the block containing `addr` is resident.
    pub fn contains(&self, addr: Addr) -> bool {
        let d = self.decode(addr);
        matches!(self.lookup(d.tag, d.set), Lookup::Hit(_))
    }

    /// Returns the resident block containing `addr`, if any.
    pub fn probe(&self, addr: Addr) -> Option<Block> {
        let d = self.decode(addr);
        match self.lookup(d.tag, d.set) {
            Lookup::Hit(way) => Some(self.block(d.set, way)),
            Lookup::Miss => None,
        }
    }

    /// Number of valid ways in `set`.
    pub fn valid_ways(&self, set: usize) -> usize {
        self.set_blocks(set).iter().filter(|b| b.valid).count()
    }

    /// Iterates over the addresses of every resident block.
    pub fn resident(&self) -> impl Iterator<Item = Addr> + '_ {
        self.blocks
            .chunks_exact(self.ways)
            .enumerate()
            .flat_map(move |(set, blocks)| {
                blocks
                    .iter()
                    .filter(|b| b.valid)
                    .map(move |b| self.decoder.block_address(b.tag, set))
            })
    }

    fn set_blocks(&self, set: usize) -> &[Block] {
        let base = set * self.ways;
        &self.blocks[base..base + self.ways]
    }

    #[inline]
    const fn index(&self, set: usize, way: usize) -> usize {
        set * self.ways + way
    }
}
