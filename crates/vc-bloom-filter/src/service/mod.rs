//! Service Layer
//!
//! Orchestrates domain logic against the record source:
//! - `BloomFilterService` runs one build pass and answers lookups
//! - `FilterLifecycle` owns the published filter and its rebuilds

pub mod bloom_filter_service;
pub mod lifecycle;

pub use bloom_filter_service::{BloomFilterService, DEFAULT_BUILD_TIMEOUT};
pub use lifecycle::{FilterLifecycle, LifecycleConfig};
