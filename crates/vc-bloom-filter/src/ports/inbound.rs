//! Inbound Ports (Driving Ports)
//!
//! The API the surrounding service uses to build and query filters.

use async_trait::async_trait;

use super::outbound::RecordSource;
use crate::domain::{BloomFilter, FilterParameters};
use crate::error::FilterError;

/// Primary membership filter API (Driving Port)
#[async_trait]
pub trait MembershipFilterApi: Send + Sync {
    /// Build a Ready filter from one full pass over `source`
    ///
    /// Fails with `InvalidParameters` before the source is touched, or with
    /// `SourceUnavailable` if the pass errors or stalls. A failed build
    /// never yields a partial filter.
    async fn build(
        &self,
        parameters: FilterParameters,
        source: &dyn RecordSource,
    ) -> Result<BloomFilter, FilterError>;

    /// Test a record against a Ready filter. Has no error path.
    fn contains(&self, filter: &BloomFilter, record: &[u8]) -> bool;
}
