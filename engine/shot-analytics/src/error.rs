//! Error types for shot analytics

use thiserror::Error;

/// Result type alias for analytics operations
pub type Result<T> = std::result::Result<T, AnalyticsError>;

/// Errors surfaced by the analytics pipeline.
///
/// Missing fields are not errors; they travel as `None`. These variants cover the
/// row-level defects a caller has to see.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    /// Game identifier does not start with a four-digit season year
    #[error("Malformed game id '{0}': expected a leading four-digit season year")]
    InvalidGameId(String),

    /// Event has no game identifier to derive a season from
    #[error("Event has no game id; cannot derive its season")]
    MissingGameId,

    /// Rate requested for a team with no recorded games
    #[error("Undefined shot rate for team '{team}' in {year}: zero games played")]
    UndefinedRate { team: String, year: i32 },

    /// Bin width must be strictly positive
    #[error("Invalid bin size {0}: must be greater than 0")]
    InvalidBinSize(u32),

    /// Requested team has no events in the requested season
    #[error("No shot data for team '{team}' in {year}")]
    NoData { team: String, year: i32 },
}

impl AnalyticsError {
    /// Create a new malformed game id error
    pub fn invalid_game_id(id: impl Into<String>) -> Self {
        Self::InvalidGameId(id.into())
    }

    /// Create a new undefined rate error
    pub fn undefined_rate(team: impl Into<String>, year: i32) -> Self {
        Self::UndefinedRate { team: team.into(), year }
    }

    /// Create a new no data error
    pub fn no_data(team: impl Into<String>, year: i32) -> Self {
        Self::NoData { team: team.into(), year }
    }
}
