//! # Shot Rates
//!
//! Per-team shot counts for every grid cell of a season, normalized by the number
//! of distinct games the team played that season.

use crate::bins::{Bin, BinnedEvent};
use crate::error::{AnalyticsError, Result};
use crate::season::event_year;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Shots of one team in one grid cell for one season
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotRateCell {
    pub team: String,
    pub year: i32,
    pub x_bin: Bin,
    pub y_bin: Bin,
    pub shots: u32,
    pub games_played: u32,

    /// Shots per game played; the name is kept from the dashboard's table schema
    pub shots_per_hour: f64,
}

/// Build the shot-rate table for `year`.
///
/// Every team with at least one event in the season gets a cell for each
/// combination of x bin and y bin occupied by any team that season, with
/// `shots = 0` where the team never shot from. Games played count all of the
/// team's events in the season, including unbinned ones. Events without a team
/// name are left out. Rows are ordered by team, then x bin, then y bin.
///
/// Fails if any event's season cannot be derived from its game id.
pub fn shot_rate_by_cell(events: &[BinnedEvent], year: i32) -> Result<Vec<ShotRateCell>> {
    let mut games: BTreeMap<&str, BTreeSet<i64>> = BTreeMap::new();
    let mut counts: BTreeMap<(&str, Bin, Bin), u32> = BTreeMap::new();
    let mut occupied_x = BTreeSet::new();
    let mut occupied_y = BTreeSet::new();
    let mut unattributed = 0usize;
    let mut unbinned = 0usize;

    for binned in events {
        if event_year(&binned.event)? != year {
            continue;
        }

        let Some(team) = binned.event.attacking_team_name.as_deref() else {
            unattributed += 1;
            continue;
        };

        // event_year succeeded, so the game id is present
        if let Some(game_id) = binned.event.game_id {
            games.entry(team).or_default().insert(game_id);
        }

        match binned.cell() {
            Some((x_bin, y_bin)) => {
                *counts.entry((team, x_bin, y_bin)).or_insert(0) += 1;
                occupied_x.insert(x_bin);
                occupied_y.insert(y_bin);
            }
            None => unbinned += 1,
        }
    }

    debug!(
        "Season {}: {} teams, {} occupied cells, {} unbinned and {} unattributed events skipped",
        year,
        games.len(),
        occupied_x.len() * occupied_y.len(),
        unbinned,
        unattributed
    );

    let mut cells = Vec::with_capacity(games.len() * occupied_x.len() * occupied_y.len());
    for (team, team_games) in &games {
        // every team in `games` has at least one game id, so `per_game` cannot fail here
        let games_played = team_games.len() as u32;

        for x_bin in &occupied_x {
            for y_bin in &occupied_y {
                let shots = counts.get(&(*team, *x_bin, *y_bin)).copied().unwrap_or(0);
                cells.push(ShotRateCell {
                    team: team.to_string(),
                    year,
                    x_bin: *x_bin,
                    y_bin: *y_bin,
                    shots,
                    games_played,
                    shots_per_hour: per_game(shots, games_played, team, year)?,
                });
            }
        }
    }

    Ok(cells)
}

/// Shots per game played; zero games is [`AnalyticsError::UndefinedRate`]
pub fn per_game(shots: u32, games_played: u32, team: &str, year: i32) -> Result<f64> {
    if games_played == 0 {
        return Err(AnalyticsError::undefined_rate(team, year));
    }
    Ok(shots as f64 / games_played as f64)
}
