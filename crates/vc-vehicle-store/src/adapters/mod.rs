//! Store backends and the record source adapter

mod file;
mod memory;
mod record_source;

pub use file::FileVehicleStore;
pub use memory::InMemoryVehicleStore;
pub use record_source::VehicleRecordSource;
