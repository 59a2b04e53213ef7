//! Vehicle domain types

mod vehicle;

pub use vehicle::{generate_plate, Vehicle};
