//! Domain Layer - Pure filter logic
//!
//! This layer contains:
//! - Hash scheme (double hashing over MurmurHash3)
//! - Parameter calculations
//! - Filter structure in its Building and Ready phases
//!
//! RULES:
//! - No I/O operations
//! - No async code

pub mod bloom_filter;
pub mod hash_functions;
pub mod parameters;
pub mod status;

pub use bloom_filter::{BloomFilter, FilterBuilder};
pub use hash_functions::{positions, HashPositions};
pub use parameters::{calculate_fpr, calculate_optimal_parameters, BloomFilterParams, FilterParameters};
pub use status::FilterStatus;
