//! Bloom filter sizing
//!
//! Formulas:
//! - m = ceil(-n*ln(p) / (ln(2)^2))  -- bits
//! - k = round((m/n) * ln(2))        -- probes
//! - FPR = (1 - e^(-kn/m))^k         -- expected rate after n insertions

use bitvec::{order::Lsb0, slice::BitSlice};
use serde::{Deserialize, Serialize};
use std::f64::consts::LN_2;

use crate::error::FilterError;

/// Caller-supplied sizing inputs, immutable once a filter is constructed
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilterParameters {
    /// Expected number of distinct records (n)
    pub capacity: usize,
    /// Desired upper bound on the false positive rate at `capacity` (p)
    pub target_error_rate: f64,
}

impl FilterParameters {
    pub fn new(capacity: usize, target_error_rate: f64) -> Self {
        Self {
            capacity,
            target_error_rate,
        }
    }

    /// Reject `n == 0` and any `p` outside the open interval (0, 1)
    ///
    /// Out-of-range values are never clamped.
    pub fn validate(&self) -> Result<(), FilterError> {
        if self.capacity == 0 {
            return Err(FilterError::InvalidParameters(
                "capacity must be greater than 0".to_string(),
            ));
        }

        // Written so that NaN fails too
        if !(self.target_error_rate > 0.0 && self.target_error_rate < 1.0) {
            return Err(FilterError::InvalidParameters(format!(
                "target error rate must be within (0, 1), got {}",
                self.target_error_rate
            )));
        }

        Ok(())
    }
}

impl Default for FilterParameters {
    fn default() -> Self {
        Self {
            capacity: 1000,
            target_error_rate: 0.1,
        }
    }
}

/// Derived bit-array dimensions
#[derive(Clone, Debug, PartialEq)]
pub struct BloomFilterParams {
    /// Number of bits in the filter (m)
    pub size_bits: usize,
    /// Number of probes per record (k)
    pub hash_count: usize,
    /// Expected false positive rate once `capacity` records are inserted
    pub expected_fpr: f64,
}

/// Calculate m and k for the given parameters
///
/// Both are at least 1. `k` is not capped: very small error rates legitimately
/// need tens of probes, and double hashing keeps each probe cheap.
pub fn calculate_optimal_parameters(
    parameters: &FilterParameters,
) -> Result<BloomFilterParams, FilterError> {
    parameters.validate()?;

    let m = minimum_bits(parameters.capacity, parameters.target_error_rate)?;
    let k = optimal_k(m, parameters.capacity);
    let expected_fpr = calculate_fpr(m, parameters.capacity, k);

    Ok(BloomFilterParams {
        size_bits: m,
        hash_count: k,
        expected_fpr,
    })
}

/// Largest bit array a filter may allocate (4 GiB)
pub const MAX_FILTER_BITS: u64 = 1 << 35;

/// Effective ceiling on m: the allocation cap, or what `bitvec` can address
/// on this target if that is lower
pub fn max_filter_bits() -> usize {
    let addressable = BitSlice::<u64, Lsb0>::MAX_BITS;
    usize::try_from(MAX_FILTER_BITS).map_or(addressable, |cap| cap.min(addressable))
}

/// Minimum m for `n` records at target rate `p`
pub fn minimum_bits(n: usize, target_fpr: f64) -> Result<usize, FilterError> {
    let ln2_squared = LN_2 * LN_2;
    let m = (-(n as f64) * target_fpr.ln() / ln2_squared).ceil();
    let ceiling = max_filter_bits();

    if !m.is_finite() || m > ceiling as f64 {
        return Err(FilterError::InvalidParameters(format!(
            "bit array for capacity {} at rate {} exceeds the {} bit limit",
            n, target_fpr, ceiling
        )));
    }

    Ok((m as usize).max(1))
}

/// Optimal k for m bits and n records, never below 1
pub fn optimal_k(m: usize, n: usize) -> usize {
    if n == 0 {
        return 1;
    }
    let k = ((m as f64 / n as f64) * LN_2).round() as usize;
    k.max(1)
}

/// Calculate the false positive rate for given dimensions
///
/// Formula: FPR = (1 - e^(-kn/m))^k
pub fn calculate_fpr(m: usize, n: usize, k: usize) -> f64 {
    if m == 0 {
        return 1.0;
    }
    let exponent = -(k as f64) * (n as f64) / (m as f64);
    (1.0 - exponent.exp()).powi(k as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sizing_n1000_p01() {
        let params = calculate_optimal_parameters(&FilterParameters::new(1000, 0.1)).unwrap();

        let expected_m = (-(1000.0 * 0.1f64.ln()) / (LN_2 * LN_2)).ceil() as usize;
        let expected_k = ((expected_m as f64 / 1000.0) * LN_2).round() as usize;

        assert_eq!(params.size_bits, expected_m);
        assert_eq!(params.size_bits, 4793);
        assert_eq!(params.hash_count, expected_k);
        assert_eq!(params.hash_count, 3);
    }

    #[test]
    fn test_sizing_n100_p001() {
        // For n=100, FPR=0.01 -> m=959, k=7
        let params = calculate_optimal_parameters(&FilterParameters::new(100, 0.01)).unwrap();
        assert_eq!(params.size_bits, 959);
        assert_eq!(params.hash_count, 7);
    }

    #[test]
    fn test_small_error_rate_is_not_capped() {
        // k = round(ln(1/p) / ln 2) ~ 50 for p = 1e-15
        let params = calculate_optimal_parameters(&FilterParameters::new(10, 1e-15)).unwrap();
        assert!(
            params.hash_count > 32,
            "k should follow the formula, got {}",
            params.hash_count
        );
    }

    #[test]
    fn test_degenerate_inputs_still_give_at_least_one() {
        // p close to 1 makes m and k tiny but never zero
        let params = calculate_optimal_parameters(&FilterParameters::new(1, 0.999)).unwrap();
        assert!(params.size_bits >= 1);
        assert!(params.hash_count >= 1);
    }

    #[test]
    fn test_rejects_zero_capacity() {
        let result = calculate_optimal_parameters(&FilterParameters::new(0, 0.1));
        assert!(matches!(result, Err(FilterError::InvalidParameters(_))));
    }

    #[test]
    fn test_rejects_out_of_range_error_rate() {
        for p in [0.0, 1.0, -0.5, 1.5, f64::NAN, f64::INFINITY] {
            let result = FilterParameters::new(1000, p).validate();
            assert!(
                matches!(result, Err(FilterError::InvalidParameters(_))),
                "p={} should be rejected",
                p
            );
        }
    }

    #[test]
    fn test_rejects_unallocatable_size() {
        let result = calculate_optimal_parameters(&FilterParameters::new(usize::MAX, 1e-300));
        assert!(matches!(result, Err(FilterError::InvalidParameters(_))));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_rejects_sizes_past_the_bit_limit() {
        // m here is finite and below usize::MAX but far past the allocation cap
        let result = calculate_optimal_parameters(&FilterParameters::new(1usize << 61, 0.5));
        assert!(matches!(result, Err(FilterError::InvalidParameters(_))));

        let result = calculate_optimal_parameters(&FilterParameters::new(1usize << 35, 0.5));
        assert!(matches!(result, Err(FilterError::InvalidParameters(_))));
    }

    #[test]
    fn test_bit_limit_is_addressable() {
        assert!(max_filter_bits() <= BitSlice::<u64, Lsb0>::MAX_BITS);
        assert!(max_filter_bits() >= 1 << 29);
    }

    #[test]
    fn test_expected_fpr_meets_target() {
        let target = 0.01;
        let params = calculate_optimal_parameters(&FilterParameters::new(100, target)).unwrap();
        assert!(
            params.expected_fpr <= target * 1.1,
            "Expected FPR {} should be <= target {}",
            params.expected_fpr,
            target
        );
    }

    #[test]
    fn test_fpr_calculation() {
        // With m=1000, n=100, k=7, FPR should be around 0.008
        let fpr = calculate_fpr(1000, 100, 7);
        assert!(fpr > 0.005 && fpr < 0.02, "Expected FPR~0.008, got {}", fpr);
        assert_eq!(calculate_fpr(1000, 0, 7), 0.0);
    }

    #[test]
    fn test_lower_fpr_needs_more_bits() {
        let loose = calculate_optimal_parameters(&FilterParameters::new(100, 0.1)).unwrap();
        let tight = calculate_optimal_parameters(&FilterParameters::new(100, 0.01)).unwrap();
        assert!(tight.size_bits > loose.size_bits);
    }

    #[test]
    fn test_parameters_deserialize() {
        let params: FilterParameters =
            serde_json::from_str(r#"{"capacity": 5000, "target_error_rate": 0.05}"#).unwrap();
        assert_eq!(params, FilterParameters::new(5000, 0.05));
    }
}
