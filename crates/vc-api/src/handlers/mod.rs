//! Request handlers

mod filter;
mod health;
mod vehicles;

pub use filter::{filter_status, rebuild_filter};
pub use health::health;
pub use vehicles::{check_vehicle, list_vehicles};
