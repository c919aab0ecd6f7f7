//! # Shot Analytics
//!
//! Spatial analytics over flattened shot events.
//!
//! ## Pipeline
//!
//! - **Normalization**: mirror every shot onto the attacking half of the rink (`x >= 0`)
//! - **Binning**: place each shot in a fixed-width cell of the rink grid
//! - **Rates**: shots per game for every (team, cell) in a season
//! - **League average**: mean rate across teams for every cell
//! - **Differential**: a team's rate minus the league rate, cell by cell
//!
//! [`visualization_table`] runs the whole pipeline for one team and season.

pub mod bins;
pub mod coords;
pub mod differential;
pub mod error;
pub mod league;
pub mod pipeline;
pub mod rates;
pub mod season;

pub use bins::{assign_bins, unbinned_count, Bin, BinGrid, BinnedEvent};
pub use coords::{normalize_coordinates, NormalizedEvent};
pub use differential::{team_differential, TeamDifferential};
pub use error::{AnalyticsError, Result};
pub use league::{league_average, LeagueAverageCell};
pub use pipeline::{visualization_table, VisualizationRequest};
pub use rates::{per_game, shot_rate_by_cell, ShotRateCell};
pub use season::{event_year, extract_year};
