//! # VC Bloom Filter
//!
//! Probabilistic membership core for the vehicle check service: answers
//! "is this identifier possibly in the known set?" with a bounded false
//! positive rate and no false negatives.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): Pure logic, no I/O
//!   - `hash_functions`: double hashing over MurmurHash3
//!   - `FilterParameters` / sizing math
//!   - `FilterBuilder` (Building phase) and `BloomFilter` (Ready phase)
//!
//! - **Ports Layer** (`ports/`): Trait definitions
//!   - `MembershipFilterApi`: Driving port (build + contains)
//!   - `RecordSource`: Driven port (the record store)
//!
//! - **Service Layer** (`service/`): Orchestration
//!   - `BloomFilterService`: Implements `MembershipFilterApi`
//!   - `FilterLifecycle`: Publishes and atomically replaces the current filter
//!
//! - **Adapters Layer** (`adapters/`)
//!   - `MemoryRecordSource`: In-memory `RecordSource`
//!
//! ## Invariants
//!
//! - m = ceil(-n*ln(p) / ln(2)^2) >= 1, k = round((m/n) * ln(2)) >= 1
//! - No false negatives: if inserted, `contains()` MUST return true
//! - A published filter is never mutated; readers see the old or the new
//!   filter, never a partial one
//!
//! ## Usage Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use vc_bloom_filter::{
//!     BloomFilterService, FilterLifecycle, LifecycleConfig, MemoryRecordSource,
//! };
//!
//! let source = Arc::new(MemoryRecordSource::from_strings(&["AB-12-CD-3456"]));
//! let lifecycle = FilterLifecycle::new(BloomFilterService::new(), source, LifecycleConfig::default());
//!
//! lifecycle.initialize().await?;
//! assert!(lifecycle.contains(b"AB-12-CD-3456")?);
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod ports;
pub mod service;

// Re-exports for convenience
pub use adapters::MemoryRecordSource;
pub use domain::{BloomFilter, FilterBuilder, FilterParameters, FilterStatus};
pub use error::{DataError, FilterError};
pub use metrics::{Metrics, MetricsRecorder, MetricsSnapshot, NoOpMetrics};
pub use ports::{MembershipFilterApi, Record, RecordSource, RecordStream};
pub use service::{BloomFilterService, FilterLifecycle, LifecycleConfig, DEFAULT_BUILD_TIMEOUT};
