use crate::bins::Bin;
use crate::rates::ShotRateCell;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// League-wide baseline rate for one grid cell of a season
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueAverageCell {
    pub year: i32,
    pub x_bin: Bin,
    pub y_bin: Bin,
    /// Mean of the teams' `shots_per_hour` in this cell
    pub shots_per_hour: f64,
    /// Number of teams that contributed to the mean
    pub teams: usize,
}

/// Mean rate across teams, grouped by (year, x bin, y bin)
pub fn league_average(cells: &[ShotRateCell]) -> Vec<LeagueAverageCell> {
    let mut totals: BTreeMap<(i32, Bin, Bin), (f64, usize)> = BTreeMap::new();

    for cell in cells {
        let entry = totals.entry((cell.year, cell.x_bin, cell.y_bin)).or_insert((0.0, 0));
        entry.0 += cell.shots_per_hour;
        entry.1 += 1;
    }

    totals
        .into_iter()
        .map(|((year, x_bin, y_bin), (sum, teams))| LeagueAverageCell {
            year,
            x_bin,
            y_bin,
            shots_per_hour: sum / teams as f64,
            teams,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::shot_rate_by_cell;
    use crate::rates::tests::{binned, event};

    #[test]
    fn test_league_average_is_mean_over_teams() {
        let events = binned(
            vec![
                event("Team A", 2021020001, 12.0, 3.0),
                event("Team A", 2021020001, 12.0, 3.0),
                event("Team A", 2021020001, 12.0, 3.0),
                event("Team B", 2021020002, 12.0, 3.0),
                event("Team C", 2021020003, 70.0, 3.0),
            ],
            10,
        );

        let cells = shot_rate_by_cell(&events, 2021).unwrap();
        let league = league_average(&cells);

        assert_eq!(league.len(), 2);

        let near = &league[0];
        assert_eq!(near.x_bin.lower, 10);
        assert_eq!(near.teams, 3);
        assert!((near.shots_per_hour - 4.0 / 3.0).abs() < 1e-12);

        let far = &league[1];
        assert_eq!(far.x_bin.lower, 70);
        assert!((far.shots_per_hour - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_league_average_of_nothing_is_empty() {
        assert!(league_average(&[]).is_empty());
    }
}
