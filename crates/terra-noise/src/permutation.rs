//! Seeded permutation tables for gradient hashing.
//!
//! A table is a Fisher-Yates shuffle of `0..=255` driven by [`Mulberry32`],
//! mirrored into a second half so corner lookups never need to wrap.

use rand::{RngCore, SeedableRng};

/// Number of distinct lattice hashes.
pub const PERIOD: usize = 256;

/// Total table length (two copies of the permutation).
pub const TABLE_LEN: usize = PERIOD * 2;

/// Mulberry32: a 32-bit state advanced by a fixed odd increment, then
/// scrambled with shift/xor/multiply steps.
///
/// The increment is applied before scrambling, so a zero seed still yields a
/// well-mixed stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    const INCREMENT: u32 = 0x6D2B_79F5;

    /// Create a generator from a 32-bit seed.
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Next value in `[0, 1)`, with 32 bits of resolution.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }
}

impl RngCore for Mulberry32 {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(Self::INCREMENT);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    fn next_u64(&mut self) -> u64 {
        rand::rand_core::impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        rand::rand_core::impls::fill_bytes_via_next(self, dst);
    }
}

impl SeedableRng for Mulberry32 {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }
}

/// A doubled permutation of `0..=255`.
///
/// Entries `0..256` hold the shuffled permutation and entries `256..512`
/// repeat them. Never mutated after [`PermutationTable::build`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PermutationTable {
    entries: [u8; TABLE_LEN],
}

impl PermutationTable {
    /// Build the table for `seed`. Same seed, same table, on every platform.
    pub fn build(seed: u32) -> Self {
        let mut rng = Mulberry32::new(seed);
        let mut entries = [0u8; TABLE_LEN];

        for (i, entry) in entries[..PERIOD].iter_mut().enumerate() {
            *entry = i as u8;
        }

        for i in (1..PERIOD).rev() {
            let j = (rng.next_f64() * (i + 1) as f64) as usize;
            entries.swap(i, j);
        }

        let (low, high) = entries.split_at_mut(PERIOD);
        high.copy_from_slice(low);

        Self { entries }
    }

    /// Table entry at `index`, widened for arithmetic on lattice coordinates.
    ///
    /// # Panics
    ///
    /// Panics if `index >= TABLE_LEN`.
    #[inline]
    pub fn get(&self, index: usize) -> usize {
        self.entries[index] as usize
    }

    /// The full 512-entry table.
    pub fn as_slice(&self) -> &[u8] {
        &self.entries
    }

    /// The shuffled half (first 256 entries).
    pub fn permutation(&self) -> &[u8] {
        &self.entries[..PERIOD]
    }
}
