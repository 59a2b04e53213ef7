//! # VC Vehicle Store
//!
//! The authoritative vehicle set behind the membership filter.
//!
//! - `VehicleStore`: storage port (count, insert, list, stream)
//! - `InMemoryVehicleStore` / `FileVehicleStore`: backends
//! - `seed_if_empty`: fills an empty store with generated sample plates
//! - `VehicleRecordSource`: adapts any store to the filter's `RecordSource`

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;
pub mod seed;

pub use adapters::{FileVehicleStore, InMemoryVehicleStore, VehicleRecordSource};
pub use domain::{generate_plate, Vehicle};
pub use error::StoreError;
pub use ports::{VehicleStore, VehicleStream};
pub use seed::{seed_if_empty, DEFAULT_SEED_COUNT};
