use crate::bins::{unbinned_count, BinGrid};
use crate::coords::normalize_coordinates;
use crate::differential::{team_differential, TeamDifferential};
use crate::error::{AnalyticsError, Result};
use crate::league::league_average;
use crate::rates::shot_rate_by_cell;
use play_flattener::ShotEvent;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// One dashboard request: which team, which season, how coarse a grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualizationRequest {
    pub team: String,
    pub year: i32,
    pub bin_size: u32,
}

impl VisualizationRequest {
    pub fn new(team: impl Into<String>, year: i32, bin_size: u32) -> Self {
        Self { team: team.into(), year, bin_size }
    }
}

/// Normalize, bin and aggregate `events`, then compare the requested team to the
/// league cell by cell.
///
/// Fails with [`AnalyticsError::NoData`] when the team has no binned shots in the
/// season, so a caller can tell an empty chart apart from a malformed game id.
pub fn visualization_table(
    events: &[ShotEvent],
    request: &VisualizationRequest,
) -> Result<Vec<TeamDifferential>> {
    let grid = BinGrid::new(request.bin_size)?;

    let binned: Vec<_> = normalize_coordinates(events.iter().cloned())
        .into_iter()
        .map(|event| grid.assign(event))
        .collect();
    debug!("{} of {} events fall outside the grid", unbinned_count(&binned), binned.len());

    let cells = shot_rate_by_cell(&binned, request.year)?;
    let league = league_average(&cells);
    let rows = team_differential(&cells, &league, &request.team);

    if rows.is_empty() {
        return Err(AnalyticsError::no_data(&request.team, request.year));
    }

    info!(
        "Built {} cells for {} in {} (bin size {})",
        rows.len(),
        request.team,
        request.year,
        request.bin_size
    );
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use play_flattener::flatten;
    use serde_json::json;

    fn scenario_record() -> serde_json::Value {
        json!({
            "gamePk": 2021020001,
            "liveData": {"plays": {"allPlays": [
                {
                    "result": {"event": "Shot"},
                    "team": {"id": 1, "name": "Team A"},
                    "coordinates": {"x": -30, "y": 10}
                },
                {
                    "result": {"event": "Faceoff"},
                    "team": {"id": 2, "name": "Team B"},
                    "coordinates": {"x": 0, "y": 0}
                },
                {
                    "result": {"event": "Goal"},
                    "team": {"id": 2, "name": "Team B"},
                    "coordinates": {"x": 40, "y": -5}
                }
            ]}}
        })
    }

    #[test]
    fn test_scenario_flatten_normalize_bin() {
        let rows = flatten(&scenario_record());
        assert_eq!(rows.len(), 2);

        let normalized = normalize_coordinates(rows);
        assert_eq!(normalized[0].coordinates(), Some((30.0, -10.0)));
        assert_eq!(normalized[1].coordinates(), Some((40.0, -5.0)));

        let binned = crate::bins::assign_bins(normalized, 25).unwrap();
        assert_eq!(binned[0].x_bin.unwrap().to_string(), "[25, 50)");
        assert_eq!(binned[1].x_bin.unwrap().to_string(), "[25, 50)");
    }

    #[test]
    fn test_visualization_table_for_scenario() {
        let rows = flatten(&scenario_record());
        let request = VisualizationRequest::new("Team A", 2021, 25);

        let table = visualization_table(&rows, &request).unwrap();

        // both shots land in x [25, 50) and y [-20, 5)
        assert_eq!(table.len(), 1);
        assert_eq!(table[0].shots, 1);
        assert_eq!(table[0].league_shots_per_hour, Some(1.0));
        assert_eq!(table[0].shot_diff, Some(0.0));
        assert_eq!(table[0].x_center, 37.5);
        assert_eq!(table[0].y_center, -7.5);
    }

    #[test]
    fn test_unknown_team_or_year_is_no_data() {
        let rows = flatten(&scenario_record());

        let wrong_team = visualization_table(&rows, &VisualizationRequest::new("Team Z", 2021, 25));
        assert_eq!(wrong_team, Err(AnalyticsError::no_data("Team Z", 2021)));

        let wrong_year = visualization_table(&rows, &VisualizationRequest::new("Team A", 2019, 25));
        assert_eq!(wrong_year, Err(AnalyticsError::no_data("Team A", 2019)));
    }

    #[test]
    fn test_bad_request_parameters_are_errors() {
        let rows = flatten(&scenario_record());
        let zero = visualization_table(&rows, &VisualizationRequest::new("Team A", 2021, 0));
        assert_eq!(zero, Err(AnalyticsError::InvalidBinSize(0)));

        let mut broken = rows.clone();
        broken[0].game_id = Some(99);
        let malformed = visualization_table(&broken, &VisualizationRequest::new("Team A", 2021, 25));
        assert_eq!(malformed, Err(AnalyticsError::invalid_game_id("99")));
    }
}
