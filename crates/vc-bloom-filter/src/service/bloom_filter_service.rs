//! Bloom Filter Service
//!
//! Implements the build protocol against a `RecordSource`: size a fresh
//! filter, stream every record into it in one pass under a deadline, and
//! hand back a Ready filter or an error, never a partial filter.

use async_trait::async_trait;
use futures::StreamExt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::domain::{BloomFilter, FilterBuilder, FilterParameters};
use crate::error::{DataError, FilterError};
use crate::metrics::{Metrics, MetricsRecorder};
use crate::ports::{MembershipFilterApi, RecordSource};

/// Default deadline for one full pass over the record source
pub const DEFAULT_BUILD_TIMEOUT: Duration = Duration::from_secs(30);

/// Bloom Filter Service implementation
///
/// Implements the `MembershipFilterApi` port. Stateless apart from its
/// metrics sink, so one instance can serve any number of builds.
pub struct BloomFilterService {
    metrics: Arc<dyn MetricsRecorder>,
    build_timeout: Duration,
}

impl BloomFilterService {
    pub fn new() -> Self {
        Self {
            metrics: Arc::new(Metrics::new()),
            build_timeout: DEFAULT_BUILD_TIMEOUT,
        }
    }

    /// Replace the metrics sink
    pub fn with_metrics(mut self, metrics: Arc<dyn MetricsRecorder>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Bound the whole pass over the record source
    pub fn with_build_timeout(mut self, build_timeout: Duration) -> Self {
        self.build_timeout = build_timeout;
        self
    }

    /// Stream every record from `source` into `builder`
    async fn fill(builder: &mut FilterBuilder, source: &dyn RecordSource) -> Result<(), DataError> {
        let mut records = source.records().await?;
        while let Some(record) = records.next().await {
            builder.insert(&record?);
        }
        Ok(())
    }
}

impl Default for BloomFilterService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MembershipFilterApi for BloomFilterService {
    async fn build(
        &self,
        parameters: FilterParameters,
        source: &dyn RecordSource,
    ) -> Result<BloomFilter, FilterError> {
        // Parameters are checked before the source is touched
        let mut builder = FilterBuilder::new(parameters)?;
        let started = Instant::now();

        debug!(
            capacity = parameters.capacity,
            target_error_rate = parameters.target_error_rate,
            "Starting filter build"
        );

        let outcome = match timeout(self.build_timeout, Self::fill(&mut builder, source)).await {
            Ok(result) => result,
            Err(_) => Err(DataError::Timeout),
        };

        if let Err(e) = outcome {
            self.metrics.record_build_failed();
            warn!(
                error = %e,
                records_read = builder.elements_inserted(),
                "Filter build aborted"
            );
            return Err(FilterError::SourceUnavailable(e));
        }

        let filter = builder.finish();
        let elapsed = started.elapsed();
        self.metrics
            .record_filter_built(filter.elements_inserted(), elapsed);

        info!(
            size_bits = filter.size_bits(),
            hash_count = filter.hash_count(),
            records = filter.elements_inserted(),
            elapsed_ms = elapsed.as_millis() as u64,
            "Filter built"
        );

        Ok(filter)
    }

    fn contains(&self, filter: &BloomFilter, record: &[u8]) -> bool {
        let started = Instant::now();
        let found = filter.contains(record);
        self.metrics.record_lookup(started.elapsed(), found);
        found
    }
}
