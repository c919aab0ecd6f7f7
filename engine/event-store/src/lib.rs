//! # Event Store
//!
//! Boundary between the flattening pipeline and the filesystem.
//!
//! ## Architecture
//!
//! - **raw**: loads scraped game records (JSON array, single object or JSON Lines)
//! - **EventStore**: trait for keyed storage of flat shot-event tables
//! - **CsvEventStore**: one CSV file per key under a data directory
//! - **InMemoryEventStore**: map-backed store for tests and embedding
//! - **cache**: reuse an existing table or force it to be recomputed
//!
//! ## Usage
//!
//! ```rust
//! use event_store::{load_or_compute, CachePolicy, CsvEventStore, StoreConfig};
//! use tempfile::TempDir;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let temp_dir = TempDir::new()?;
//!     let mut store = CsvEventStore::new(StoreConfig::new(temp_dir.path()))?;
//!
//!     let outcome = load_or_compute(&mut store, "2021", CachePolicy::ReuseExisting, || {
//!         Ok(Vec::new())
//!     })?;
//!     assert!(outcome.events.is_empty());
//!
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod cache;
pub mod config;
pub mod error;
pub mod raw;

pub use backend::{validate_key, CsvEventStore, EventStore, InMemoryEventStore};
pub use cache::{load_or_compute, CacheOutcome, CachePolicy, CacheSource};
pub use config::StoreConfig;
pub use error::{Result, StoreError};
pub use raw::{load_raw_records, parse_raw_records};
