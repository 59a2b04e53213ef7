//! Metrics hooks for filter builds and lookups
//!
//! ## Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use vc_bloom_filter::{BloomFilterService, Metrics};
//!
//! let metrics = Arc::new(Metrics::new());
//! let service = BloomFilterService::new().with_metrics(metrics.clone());
//!
//! // ... build and query ...
//! println!("{:?}", metrics.snapshot());
//! ```

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Metrics collector for filter operations
///
/// Thread-safe counters. `records_inserted` is the insertions-performed
/// counter operators watch for capacity drift.
#[derive(Default)]
pub struct Metrics {
    /// Builds that completed and produced a Ready filter
    pub filters_built: AtomicU64,
    /// Builds aborted by a source error or timeout
    pub builds_failed: AtomicU64,
    /// Records inserted across all successful builds
    pub records_inserted: AtomicU64,
    /// Total lookups performed
    pub lookups_performed: AtomicU64,
    /// Total positive lookups (matches, false positives included)
    pub lookups_positive: AtomicU64,
    /// Cumulative lookup time in nanoseconds
    pub lookup_time_ns: AtomicU64,
    /// Duration of the most recent successful build in milliseconds
    pub last_build_ms: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful build
    pub fn record_filter_built(&self, records: u64, duration: Duration) {
        self.filters_built.fetch_add(1, Ordering::Relaxed);
        self.records_inserted.fetch_add(records, Ordering::Relaxed);
        self.last_build_ms
            .store(duration.as_millis() as u64, Ordering::Relaxed);
    }

    pub fn record_build_failed(&self) {
        self.builds_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Record lookup operation
    ///
    /// # Arguments
    /// * `duration` - Time taken for lookup
    /// * `found` - Whether the record was reported present
    pub fn record_lookup(&self, duration: Duration, found: bool) {
        self.lookups_performed.fetch_add(1, Ordering::Relaxed);
        self.lookup_time_ns
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
        if found {
            self.lookups_positive.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            filters_built: self.filters_built.load(Ordering::Relaxed),
            builds_failed: self.builds_failed.load(Ordering::Relaxed),
            records_inserted: self.records_inserted.load(Ordering::Relaxed),
            lookups_performed: self.lookups_performed.load(Ordering::Relaxed),
            lookups_positive: self.lookups_positive.load(Ordering::Relaxed),
            avg_lookup_ns: self.avg_lookup_time_ns(),
            last_build_ms: self.last_build_ms.load(Ordering::Relaxed),
        }
    }

    /// Calculate average lookup time in nanoseconds
    pub fn avg_lookup_time_ns(&self) -> u64 {
        let total = self.lookup_time_ns.load(Ordering::Relaxed);
        let count = self.lookups_performed.load(Ordering::Relaxed);
        if count > 0 {
            total / count
        } else {
            0
        }
    }

    /// Ratio of positive lookups to total lookups
    ///
    /// Includes true positives, so it only bounds the false positive rate
    /// from above when queries are mostly for absent records.
    pub fn observed_positive_rate(&self) -> f64 {
        let total = self.lookups_performed.load(Ordering::Relaxed);
        let positive = self.lookups_positive.load(Ordering::Relaxed);
        if total > 0 {
            positive as f64 / total as f64
        } else {
            0.0
        }
    }
}

/// Point-in-time metrics snapshot
#[derive(Clone, Debug, Default, Serialize)]
pub struct MetricsSnapshot {
    pub filters_built: u64,
    pub builds_failed: u64,
    pub records_inserted: u64,
    pub lookups_performed: u64,
    pub lookups_positive: u64,
    pub avg_lookup_ns: u64,
    pub last_build_ms: u64,
}

/// Trait for custom metrics recording implementations
///
/// Implement this trait to forward filter events to an external metrics
/// system.
pub trait MetricsRecorder: Send + Sync {
    fn record_filter_built(&self, records: u64, duration: Duration);

    fn record_build_failed(&self);

    fn record_lookup(&self, duration: Duration, found: bool);
}

/// No-op metrics recorder for when metrics are disabled
#[derive(Default)]
pub struct NoOpMetrics;

impl MetricsRecorder for NoOpMetrics {
    fn record_filter_built(&self, _: u64, _: Duration) {}
    fn record_build_failed(&self) {}
    fn record_lookup(&self, _: Duration, _: bool) {}
}

impl MetricsRecorder for Metrics {
    fn record_filter_built(&self, records: u64, duration: Duration) {
        Metrics::record_filter_built(self, records, duration);
    }

    fn record_build_failed(&self) {
        Metrics::record_build_failed(self);
    }

    fn record_lookup(&self, duration: Duration, found: bool) {
        Metrics::record_lookup(self, duration, found);
    }
}
