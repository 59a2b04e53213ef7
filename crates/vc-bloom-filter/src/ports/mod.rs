//! Ports Layer
//!
//! Defines the interfaces (traits) for:
//! - Driving Ports (inbound) - API for the surrounding service
//! - Driven Ports (outbound) - Dependency on the record store

pub mod inbound;
pub mod outbound;

pub use inbound::MembershipFilterApi;
pub use outbound::{Record, RecordSource, RecordStream};
