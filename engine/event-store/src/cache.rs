//! Reuse-or-recompute policy for stored event tables

use crate::backend::EventStore;
use crate::error::Result;
use play_flattener::ShotEvent;
use serde::{Deserialize, Serialize};

/// What to do when a table already exists under the key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CachePolicy {
    /// Return the stored table as-is without recomputing
    #[default]
    ReuseExisting,
    /// Recompute and overwrite the stored table
    ForceRecompute,
}

impl CachePolicy {
    pub fn from_force_flag(force: bool) -> Self {
        if force {
            CachePolicy::ForceRecompute
        } else {
            CachePolicy::ReuseExisting
        }
    }
}

/// Where the returned events came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheSource {
    Cached,
    Computed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CacheOutcome {
    pub events: Vec<ShotEvent>,
    pub source: CacheSource,
}

/// Load the table under `key`, or run `compute` and store its result.
///
/// With [`CachePolicy::ReuseExisting`] an existing table is returned without
/// calling `compute`.
pub fn load_or_compute<S, F>(
    store: &mut S,
    key: &str,
    policy: CachePolicy,
    compute: F,
) -> Result<CacheOutcome>
where
    S: EventStore + ?Sized,
    F: FnOnce() -> Result<Vec<ShotEvent>>,
{
    if policy == CachePolicy::ReuseExisting && store.exists(key)? {
        tracing::info!("Reusing stored events for '{}'", key);
        let events = store.load(key)?;
        return Ok(CacheOutcome { events, source: CacheSource::Cached });
    }

    tracing::info!("Computing events for '{}' ({:?})", key, policy);
    let events = compute()?;
    store.store(key, &events)?;

    Ok(CacheOutcome { events, source: CacheSource::Computed })
}
