//! Hash scheme for the Bloom filter
//!
//! Maps an arbitrary byte string to `k` bit positions in `[0, m)`.
//!
//! A single MurmurHash3 x64/128 evaluation yields two 64-bit base values
//! `h1` (low half) and `h2` (high half). Probe `i` is `(h1 + i * h2) mod m`
//! (Kirsch-Mitzenmacher double hashing), so the cost of a probe sequence is
//! one hash regardless of `k`.
//!
//! The seed is a fixed constant: positions are reproducible across calls and
//! across process restarts, which the no-false-negative guarantee relies on
//! whenever a filter is rebuilt with equal parameters.

use std::io::Cursor;

/// Seed for the base hash. Changing it changes every bit position.
pub const HASH_SEED: u32 = 0x5643_4246;

/// Compute the two base hash values for a record
pub fn base_hashes(record: &[u8]) -> (u64, u64) {
    let mut cursor = Cursor::new(record);

    // Reading from an in-memory cursor cannot fail
    let hash = murmur3::murmur3_x64_128(&mut cursor, HASH_SEED).unwrap_or(0);
    (hash as u64, (hash >> 64) as u64)
}

/// Iterator over the `k` probe positions of one record
///
/// Holds only the two base hashes and a counter, so walking the probe
/// sequence never touches the heap.
#[derive(Clone, Debug)]
pub struct HashPositions {
    h1: u64,
    h2: u64,
    m: u64,
    next: u64,
    k: u64,
}

impl Iterator for HashPositions {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.next >= self.k {
            return None;
        }
        let hash = self.h1.wrapping_add(self.next.wrapping_mul(self.h2));
        self.next += 1;
        Some((hash % self.m) as usize)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.k - self.next) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for HashPositions {}

/// Compute the `k` bit positions for a record in a filter of `m` bits
///
/// Total over every byte string, the empty one included. With `m == 0`
/// there is no valid position and the sequence is empty.
pub fn positions(record: &[u8], k: usize, m: usize) -> HashPositions {
    let (h1, h2) = base_hashes(record);
    let k = if m == 0 { 0 } else { k as u64 };

    HashPositions {
        h1,
        h2,
        m: m as u64,
        next: 0,
        k,
    }
}
