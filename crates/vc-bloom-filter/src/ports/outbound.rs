//! Outbound Ports (Driven Ports)
//!
//! Dependencies the filter core needs from the record store.

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::error::DataError;

/// An opaque byte-string identifier
pub type Record = Vec<u8>;

/// Lazy, finite, single-pass sequence of records
pub type RecordStream = BoxStream<'static, Result<Record, DataError>>;

/// Record source (Driven Port)
///
/// Produces every known record, once, in any order. Connectivity,
/// authentication and default seeding are the implementor's concern; the
/// core never writes back.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Open a fresh pass over all known records
    ///
    /// Each call yields an independent stream. An error here, or an `Err`
    /// item mid-stream, aborts the build that requested it.
    async fn records(&self) -> Result<RecordStream, DataError>;
}
