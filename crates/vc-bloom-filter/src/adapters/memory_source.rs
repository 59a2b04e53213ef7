//! In-memory record source
//!
//! Serves a fixed list of records. Useful for tests and for embedding the
//! core where the record set is already in hand.

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use std::sync::Arc;

use crate::error::DataError;
use crate::ports::{Record, RecordSource, RecordStream};

/// Record source over an owned, shared list of records
#[derive(Clone, Debug, Default)]
pub struct MemoryRecordSource {
    records: Arc<Vec<Record>>,
}

impl MemoryRecordSource {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records: Arc::new(records),
        }
    }

    /// Build from string identifiers, encoded as UTF-8
    pub fn from_strings<S: AsRef<str>>(items: &[S]) -> Self {
        Self::new(
            items
                .iter()
                .map(|s| s.as_ref().as_bytes().to_vec())
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl RecordSource for MemoryRecordSource {
    async fn records(&self) -> Result<RecordStream, DataError> {
        let records = Arc::clone(&self.records);
        let len = records.len();

        // Walk by index so the stream shares the list instead of copying it
        Ok(stream::iter(0..len)
            .map(move |i| Ok(records[i].clone()))
            .boxed())
    }
}
