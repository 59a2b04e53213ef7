//! Filter lifecycle manager
//!
//! Owns the single "current" filter of the process. Readers take a cheap
//! `Arc` snapshot and query it without further locking; a rebuild constructs
//! a brand new filter off to the side and swaps the reference only once the
//! filter is Ready. A failed rebuild leaves the published filter untouched.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::BloomFilterService;
use crate::domain::{BloomFilter, FilterParameters, FilterStatus};
use crate::error::FilterError;
use crate::ports::{MembershipFilterApi, RecordSource};

/// Lifecycle configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LifecycleConfig {
    /// Sizing used for every build
    pub parameters: FilterParameters,
    /// Attempts made by `initialize` before giving up (at least 1)
    pub retry_attempts: u32,
    /// Base delay between attempts, multiplied by the attempt number
    pub retry_backoff: Duration,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            parameters: FilterParameters::default(),
            retry_attempts: 5,
            retry_backoff: Duration::from_secs(1),
        }
    }
}

impl LifecycleConfig {
    pub fn validate(&self) -> Result<(), FilterError> {
        self.parameters.validate()?;
        if self.retry_attempts == 0 {
            return Err(FilterError::InvalidParameters(
                "retry_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Lifecycle manager for the process-wide filter
pub struct FilterLifecycle<S: RecordSource> {
    service: BloomFilterService,
    source: Arc<S>,
    config: LifecycleConfig,
    /// Published filter. Only ever replaced wholesale.
    current: RwLock<Option<Arc<BloomFilter>>>,
    /// Held for the duration of a build so builds never overlap
    build_slot: Mutex<()>,
}

impl<S: RecordSource + 'static> FilterLifecycle<S> {
    pub fn new(service: BloomFilterService, source: Arc<S>, config: LifecycleConfig) -> Self {
        Self {
            service,
            source,
            config,
            current: RwLock::new(None),
            build_slot: Mutex::new(()),
        }
    }

    /// Snapshot of the published filter, if any
    pub fn current(&self) -> Option<Arc<BloomFilter>> {
        self.current.read().clone()
    }

    pub fn is_ready(&self) -> bool {
        self.current.read().is_some()
    }

    /// Query the published filter
    ///
    /// `NotReady` means the caller queried before the first successful build.
    pub fn contains(&self, record: &[u8]) -> Result<bool, FilterError> {
        let filter = self.current().ok_or(FilterError::NotReady)?;
        Ok(self.service.contains(&filter, record))
    }

    pub fn status(&self) -> Option<FilterStatus> {
        self.current().map(|filter| filter.status())
    }

    pub fn config(&self) -> &LifecycleConfig {
        &self.config
    }

    /// Build the first filter, retrying transient source failures
    ///
    /// Waits for the build slot instead of failing fast, so it can be called
    /// while a rebuild is already running.
    pub async fn initialize(&self) -> Result<Arc<BloomFilter>, FilterError> {
        let _slot = self.build_slot.lock().await;
        let max_attempts = self.config.retry_attempts.max(1);
        let mut attempt = 1;

        info!(
            capacity = self.config.parameters.capacity,
            target_error_rate = self.config.parameters.target_error_rate,
            "Loading filter from record source"
        );

        loop {
            match self.build_and_publish().await {
                Ok(filter) => return Ok(filter),
                Err(e) if e.is_transient() && attempt < max_attempts => {
                    let delay = self.config.retry_backoff * attempt;
                    warn!(
                        attempt,
                        max_attempts,
                        retry_in_ms = delay.as_millis() as u64,
                        error = %e,
                        "Filter build failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Build a fresh filter and swap it in
    ///
    /// Fails fast with `RebuildInProgress` if another build holds the slot.
    /// On any other failure the previously published filter stays in service.
    pub async fn rebuild(&self) -> Result<Arc<BloomFilter>, FilterError> {
        let _slot = self
            .build_slot
            .try_lock()
            .map_err(|_| FilterError::RebuildInProgress)?;
        self.build_and_publish().await
    }

    /// Rebuild on a fixed interval until `shutdown` fires
    pub fn spawn_periodic_rebuild(
        self: Arc<Self>,
        interval: Duration,
        mut shutdown: watch::Receiver<bool>,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick completes immediately; the initial build already ran
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        match self.rebuild().await {
                            Ok(_) => {}
                            Err(FilterError::RebuildInProgress) => {
                                debug!("Skipping scheduled rebuild, another build is running");
                            }
                            Err(e) => {
                                warn!(error = %e, "Scheduled rebuild failed");
                            }
                        }
                    }
                    _ = shutdown.changed() => {
                        info!("Periodic rebuild stopped");
                        break;
                    }
                }
            }
        })
    }

    async fn build_and_publish(&self) -> Result<Arc<BloomFilter>, FilterError> {
        match self
            .service
            .build(self.config.parameters, self.source.as_ref())
            .await
        {
            Ok(filter) => Ok(self.publish(filter)),
            Err(e) => {
                if self.is_ready() {
                    warn!(error = %e, "Rebuild failed, previous filter remains published");
                } else {
                    warn!(error = %e, "Filter build failed, no filter published yet");
                }
                Err(e)
            }
        }
    }

    fn publish(&self, filter: BloomFilter) -> Arc<BloomFilter> {
        let filter = Arc::new(filter);
        let previous = self.current.write().replace(Arc::clone(&filter));

        info!(
            size_bits = filter.size_bits(),
            hash_count = filter.hash_count(),
            records = filter.elements_inserted(),
            built_at = %filter.built_at(),
            replaced = previous.is_some(),
            "Filter published"
        );

        filter
    }
}
