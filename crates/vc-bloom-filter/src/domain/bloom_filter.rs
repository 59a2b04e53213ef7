//! Core Bloom filter implementation
//!
//! A filter lives in one of two phases, each its own type:
//!
//! - `FilterBuilder` (Building): owns a mutable bit array and accepts inserts.
//!   Only reachable inside a build pass.
//! - `BloomFilter` (Ready): immutable, answers `contains`. Produced by
//!   `FilterBuilder::finish`, which consumes the builder, so there is no way
//!   back to Building. A rebuild always produces a new instance.
//!
//! INVARIANTS:
//! - No false negatives: if inserted, `contains()` MUST return true
//! - m and k are fixed at construction; bits only go 0 -> 1

use bitvec::prelude::*;
use chrono::{DateTime, Utc};
use std::fmt;
use tracing::warn;

use super::hash_functions::positions;
use super::parameters::{calculate_fpr, calculate_optimal_parameters, FilterParameters};
use super::status::FilterStatus;
use crate::error::FilterError;

/// A filter in the Building phase
pub struct FilterBuilder {
    bits: BitVec<u64, Lsb0>,
    k: usize,
    m: usize,
    inserted: u64,
    parameters: FilterParameters,
}

impl FilterBuilder {
    /// Size a new all-zero filter for the given parameters
    ///
    /// Fails with `InvalidParameters` if capacity is zero or the target
    /// error rate is outside (0, 1).
    pub fn new(parameters: FilterParameters) -> Result<Self, FilterError> {
        let sizing = calculate_optimal_parameters(&parameters)?;

        Ok(Self {
            bits: BitVec::repeat(false, sizing.size_bits),
            k: sizing.hash_count,
            m: sizing.size_bits,
            inserted: 0,
            parameters,
        })
    }

    /// Set the k bits of a record
    ///
    /// Idempotent on the bit array. Inserting past capacity is accepted and
    /// only raises the realised false positive rate.
    pub fn insert(&mut self, record: &[u8]) {
        for pos in positions(record, self.k, self.m) {
            self.bits.set(pos, true);
        }
        self.inserted += 1;
    }

    /// Number of insert calls so far, duplicates included
    pub fn elements_inserted(&self) -> u64 {
        self.inserted
    }

    /// Freeze the filter for reads
    pub fn finish(self) -> BloomFilter {
        let filter = BloomFilter {
            bits: self.bits,
            k: self.k,
            m: self.m,
            inserted: self.inserted,
            parameters: self.parameters,
            built_at: Utc::now(),
        };

        if filter.is_over_capacity() {
            warn!(
                inserted = filter.inserted,
                capacity = filter.parameters.capacity,
                estimated_fpr = filter.false_positive_rate(),
                "Filter built past its capacity; accuracy degraded"
            );
        }

        filter
    }
}

impl fmt::Debug for FilterBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterBuilder")
            .field("m", &self.m)
            .field("k", &self.k)
            .field("inserted", &self.inserted)
            .finish()
    }
}

/// Bloom filter in the Ready phase
///
/// Space-efficient probabilistic membership test. False positives are
/// possible, false negatives are not. Safe to share across threads without
/// synchronisation because nothing can mutate it.
pub struct BloomFilter {
    /// Bit array storing the filter state
    bits: BitVec<u64, Lsb0>,
    /// Number of probes (k)
    k: usize,
    /// Size in bits (m)
    m: usize,
    /// Insert calls performed during the build
    inserted: u64,
    parameters: FilterParameters,
    built_at: DateTime<Utc>,
}

impl BloomFilter {
    /// Build a Ready filter from a sequence of records in one pass
    ///
    /// The sequence is consumed lazily; order does not affect the result.
    pub fn build<I, R>(parameters: FilterParameters, records: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[u8]>,
    {
        let mut builder = FilterBuilder::new(parameters)?;
        for record in records {
            builder.insert(record.as_ref());
        }
        Ok(builder.finish())
    }

    /// Test if a record might be in the set
    ///
    /// Returns:
    /// - `true` if the record might be in the set (could be false positive)
    /// - `false` if the record is definitely NOT in the set
    pub fn contains(&self, record: &[u8]) -> bool {
        positions(record, self.k, self.m).all(|pos| self.bits[pos])
    }

    /// Estimated false positive rate for the current insertion count
    ///
    /// Formula: FPR = (1 - e^(-kn/m))^k. Counts duplicate inserts, so this
    /// is an upper estimate when the source repeats records.
    pub fn false_positive_rate(&self) -> f64 {
        calculate_fpr(self.m, self.inserted as usize, self.k)
    }

    /// Whether more records were inserted than the filter was sized for
    pub fn is_over_capacity(&self) -> bool {
        self.inserted > self.parameters.capacity as u64
    }

    /// Get the number of bits set in the filter
    pub fn bits_set(&self) -> usize {
        self.bits.count_ones()
    }

    /// Get the filter size in bits
    pub fn size_bits(&self) -> usize {
        self.m
    }

    /// Get the number of probes per record
    pub fn hash_count(&self) -> usize {
        self.k
    }

    /// Get the number of insertions performed
    pub fn elements_inserted(&self) -> u64 {
        self.inserted
    }

    pub fn parameters(&self) -> &FilterParameters {
        &self.parameters
    }

    pub fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }

    /// Serializable summary for operators
    pub fn status(&self) -> FilterStatus {
        FilterStatus {
            size_bits: self.m,
            hash_count: self.k,
            elements_inserted: self.inserted,
            capacity: self.parameters.capacity,
            target_error_rate: self.parameters.target_error_rate,
            estimated_error_rate: self.false_positive_rate(),
            fill_ratio: self.bits_set() as f64 / self.m as f64,
            degraded_accuracy: self.is_over_capacity(),
            memory_bytes: self.bits.as_raw_slice().len() * std::mem::size_of::<u64>(),
            built_at: self.built_at,
        }
    }
}

impl fmt::Debug for BloomFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BloomFilter")
            .field("m", &self.m)
            .field("k", &self.k)
            .field("inserted", &self.inserted)
            .field("bits_set", &self.bits_set())
            .field("built_at", &self.built_at)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> FilterParameters {
        FilterParameters::new(1000, 0.1)
    }

    #[test]
    fn test_new_builder_is_all_zero() {
        let filter = FilterBuilder::new(params()).unwrap().finish();

        assert_eq!(filter.size_bits(), 4793);
        assert_eq!(filter.hash_count(), 3);
        assert_eq!(filter.elements_inserted(), 0);
        assert_eq!(filter.bits_set(), 0, "All bits should be zero initially");
    }

    #[test]
    fn test_new_rejects_invalid_parameters() {
        assert!(matches!(
            FilterBuilder::new(FilterParameters::new(0, 0.1)),
            Err(FilterError::InvalidParameters(_))
        ));
        assert!(matches!(
            FilterBuilder::new(FilterParameters::new(1000, 1.0)),
            Err(FilterError::InvalidParameters(_))
        ));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_oversized_capacity_is_an_error_not_a_panic() {
        let result = std::panic::catch_unwind(|| {
            FilterBuilder::new(FilterParameters::new(1usize << 61, 0.5)).map(|_| ())
        });
        assert!(matches!(result, Ok(Err(FilterError::InvalidParameters(_)))));
    }

    #[test]
    fn test_insert_sets_at_most_k_bits() {
        let mut builder = FilterBuilder::new(params()).unwrap();
        builder.insert(b"AB-12-CD-3456");
        let filter = builder.finish();

        assert!(filter.bits_set() > 0);
        assert!(filter.bits_set() <= filter.hash_count());
        assert!(filter.contains(b"AB-12-CD-3456"));
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut once = FilterBuilder::new(params()).unwrap();
        let mut many = FilterBuilder::new(params()).unwrap();

        once.insert(b"QX-45-LM-7781");
        for _ in 0..3 {
            many.insert(b"QX-45-LM-7781");
        }

        let once = once.finish();
        let many = many.finish();
        assert_eq!(once.bits, many.bits, "Repeated inserts must not change the bit array");
        assert_eq!(many.elements_inserted(), 3, "Counter tracks every insert call");
    }

    #[test]
    fn test_no_false_negatives_bulk() {
        let records: Vec<String> = (0..1000).map(|i| format!("plate_{:04}", i)).collect();
        let filter = BloomFilter::build(params(), &records).unwrap();

        for record in &records {
            assert!(
                filter.contains(record.as_bytes()),
                "False negative for {}",
                record
            );
        }
    }

    #[test]
    fn test_build_is_order_independent() {
        let records: Vec<String> = (0..200).map(|i| format!("plate_{}", i)).collect();

        let forward = BloomFilter::build(params(), records.iter()).unwrap();
        let backward = BloomFilter::build(params(), records.iter().rev()).unwrap();

        assert_eq!(forward.bits, backward.bits);
    }

    #[test]
    fn test_empty_build_contains_nothing() {
        let filter = BloomFilter::build(params(), std::iter::empty::<&[u8]>()).unwrap();

        assert_eq!(filter.bits_set(), 0);
        assert!(!filter.contains(b"AB-12-CD-3456"));
        assert!(!filter.contains(b""));
        assert_eq!(filter.false_positive_rate(), 0.0);
    }

    #[test]
    fn test_over_capacity_is_reported_not_rejected() {
        let small = FilterParameters::new(10, 0.1);
        let filter = BloomFilter::build(small, (0..50).map(|i| format!("r{}", i))).unwrap();

        assert!(filter.is_over_capacity());
        assert_eq!(filter.elements_inserted(), 50);
        assert!(filter.false_positive_rate() > 0.1);
        assert!(filter.status().degraded_accuracy);
    }

    #[test]
    fn test_status_summary() {
        let filter = BloomFilter::build(params(), ["AB-12-CD-3456", "ZZ-99-YY-1000"]).unwrap();
        let status = filter.status();

        assert_eq!(status.size_bits, 4793);
        assert_eq!(status.hash_count, 3);
        assert_eq!(status.elements_inserted, 2);
        assert_eq!(status.capacity, 1000);
        assert!(!status.degraded_accuracy);
        assert!(status.fill_ratio > 0.0 && status.fill_ratio < 0.01);
        // 4793 bits round up to 75 u64 words
        assert_eq!(status.memory_bytes, 600);
    }
}
