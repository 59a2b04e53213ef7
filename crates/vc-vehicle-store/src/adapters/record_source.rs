//! Record source backed by a vehicle store

use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::{StreamExt, TryStreamExt};
use vc_bloom_filter::{DataError, RecordSource, RecordStream};

use crate::ports::VehicleStore;

/// Feeds plate numbers from a `VehicleStore` into filter builds
#[derive(Clone)]
pub struct VehicleRecordSource {
    store: Arc<dyn VehicleStore>,
}

impl VehicleRecordSource {
    pub fn new(store: Arc<dyn VehicleStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl RecordSource for VehicleRecordSource {
    async fn records(&self) -> Result<RecordStream, DataError> {
        let vehicles = self.store.stream().await?;
        Ok(vehicles
            .map_ok(|vehicle| vehicle.record())
            .map_err(DataError::from)
            .boxed())
    }
}
