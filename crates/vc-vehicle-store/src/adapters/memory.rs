//! In-memory vehicle store

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use parking_lot::RwLock;

use crate::domain::Vehicle;
use crate::error::StoreError;
use crate::ports::{VehicleStore, VehicleStream};

/// Vehicle store held entirely in memory
///
/// Streams iterate over a snapshot taken when the stream is opened, so a
/// concurrent insert never shows up half way through a build.
#[derive(Debug, Default)]
pub struct InMemoryVehicleStore {
    vehicles: RwLock<Vec<Vehicle>>,
}

impl InMemoryVehicleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vehicles(vehicles: Vec<Vehicle>) -> Self {
        Self {
            vehicles: RwLock::new(vehicles),
        }
    }
}

#[async_trait]
impl VehicleStore for InMemoryVehicleStore {
    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.vehicles.read().len())
    }

    async fn insert_many(&self, vehicles: Vec<Vehicle>) -> Result<usize, StoreError> {
        let inserted = vehicles.len();
        self.vehicles.write().extend(vehicles);
        Ok(inserted)
    }

    async fn stream(&self) -> Result<VehicleStream, StoreError> {
        let snapshot = self.vehicles.read().clone();
        Ok(stream::iter(snapshot.into_iter().map(Ok)).boxed())
    }
}
