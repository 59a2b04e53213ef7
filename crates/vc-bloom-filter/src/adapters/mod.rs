//! Adapters Layer
//!
//! Implementations of driven ports that live inside the core.
//!
//! ## Adapters
//!
//! - `MemoryRecordSource` - Serves a fixed in-memory record list

pub mod memory_source;

pub use memory_source::MemoryRecordSource;
