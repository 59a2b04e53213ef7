//! Vehicle store port
//!
//! The store is the authoritative record set behind the membership filter.
//! Backends implement `VehicleStore`; the filter only ever sees them through
//! `VehicleRecordSource`.

use async_trait::async_trait;
use futures::stream::{BoxStream, TryStreamExt};

use crate::domain::Vehicle;
use crate::error::StoreError;

/// Lazy sequence of stored vehicles
pub type VehicleStream = BoxStream<'static, Result<Vehicle, StoreError>>;

#[async_trait]
pub trait VehicleStore: Send + Sync {
    /// Number of stored vehicles
    async fn count(&self) -> Result<usize, StoreError>;

    /// Append vehicles, returning how many were written
    async fn insert_many(&self, vehicles: Vec<Vehicle>) -> Result<usize, StoreError>;

    /// Stream every stored vehicle once, without loading them all up front
    async fn stream(&self) -> Result<VehicleStream, StoreError>;

    /// Materialise every stored vehicle
    async fn list(&self) -> Result<Vec<Vehicle>, StoreError> {
        self.stream().await?.try_collect().await
    }
}
