//! Play Flattener - Turns raw NHL game feeds into flat shot/goal rows
//!
//! A raw game record is kept as an untyped [`serde_json::Value`] because the upstream
//! feed is loosely shaped. Every field is read through [`lookup::safe_get`], so a
//! malformed play only ever produces missing fields, never an error.

pub mod flatten;
pub mod lookup;
pub mod models;

pub use flatten::{flatten, flatten_all, flatten_with_summary, FlattenSummary};
pub use lookup::safe_get;
pub use models::{PlayType, RawGameRecord, ShotEvent, SHOT_EVENT_COLUMNS};
