use crate::bins::Bin;
use crate::league::LeagueAverageCell;
use crate::rates::ShotRateCell;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

/// A team's rate in one cell against the league baseline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamDifferential {
    pub team: String,
    pub year: i32,
    pub x_bin: Bin,
    pub y_bin: Bin,
    /// Cell midpoint in rink coordinates, for plotting
    pub x_center: f64,
    pub y_center: f64,
    pub shots: u32,
    pub shots_per_hour: f64,
    /// `None` when no league cell matches
    pub league_shots_per_hour: Option<f64>,
    /// `shots_per_hour - league_shots_per_hour`, positive when the team outshoots the league
    pub shot_diff: Option<f64>,
}

/// Join `team`'s cells to the league averages on (year, x bin, y bin).
///
/// A team cell without a matching league cell keeps its row with a missing
/// differential rather than a zero.
pub fn team_differential(
    cells: &[ShotRateCell],
    league_avgs: &[LeagueAverageCell],
    team: &str,
) -> Vec<TeamDifferential> {
    let league: HashMap<(i32, Bin, Bin), f64> = league_avgs
        .iter()
        .map(|avg| ((avg.year, avg.x_bin, avg.y_bin), avg.shots_per_hour))
        .collect();

    cells
        .iter()
        .filter(|cell| cell.team == team)
        .map(|cell| {
            let league_rate = league.get(&(cell.year, cell.x_bin, cell.y_bin)).copied();
            if league_rate.is_none() {
                warn!(
                    "No league average for {} at x {} y {} in {}",
                    team, cell.x_bin, cell.y_bin, cell.year
                );
            }

            TeamDifferential {
                team: cell.team.clone(),
                year: cell.year,
                x_bin: cell.x_bin,
                y_bin: cell.y_bin,
                x_center: cell.x_bin.center(),
                y_center: cell.y_bin.center(),
                shots: cell.shots,
                shots_per_hour: cell.shots_per_hour,
                league_shots_per_hour: league_rate,
                shot_diff: league_rate.map(|rate| cell.shots_per_hour - rate),
            }
        })
        .collect()
}
