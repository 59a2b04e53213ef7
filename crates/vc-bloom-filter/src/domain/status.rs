//! Operator-facing summary of a published filter

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Point-in-time description of a Ready filter
///
/// `degraded_accuracy` is set once more records were inserted than the
/// filter was sized for. It is an observable condition, never an error.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilterStatus {
    pub size_bits: usize,
    pub hash_count: usize,
    pub elements_inserted: u64,
    pub capacity: usize,
    pub target_error_rate: f64,
    pub estimated_error_rate: f64,
    /// Fraction of bits set to 1
    pub fill_ratio: f64,
    pub degraded_accuracy: bool,
    pub memory_bytes: usize,
    pub built_at: DateTime<Utc>,
}
