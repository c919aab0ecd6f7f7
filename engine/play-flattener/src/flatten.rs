use crate::lookup::{get_bool, get_f64, get_i64, get_str, get_string, safe_get};
use crate::models::{PlayType, RawGameRecord, ShotEvent};
use serde_json::Value;
use tracing::{debug, info};

const PLAYS_PATH: [&str; 3] = ["liveData", "plays", "allPlays"];

/// Progress is logged every this many records
const PROGRESS_INTERVAL: usize = 100;

/// Role markers that identify the shooting player
const SHOOTER_ROLES: [&str; 2] = ["Scorer", "Shooter"];
const GOALIE_ROLE: &str = "Goalie";

/// Counters collected while flattening a batch of records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlattenSummary {
    pub records: usize,
    pub plays_seen: usize,
    pub rows: usize,
}

/// Extract every shot and goal of one game, in play order.
///
/// Never fails: a record without a play list yields no rows, and a field that
/// cannot be read is left as `None`.
pub fn flatten(record: &RawGameRecord) -> Vec<ShotEvent> {
    let game_id = get_i64(record, &["gamePk"]);

    plays(record)
        .iter()
        .filter_map(|play| {
            let play_type = get_str(play, &["result", "event"]).and_then(PlayType::from_event)?;
            Some(extract_play(play, play_type, game_id))
        })
        .collect()
}

/// Flatten many records and concatenate the rows in input order
pub fn flatten_all<'a, I>(records: I) -> Vec<ShotEvent>
where
    I: IntoIterator<Item = &'a RawGameRecord>,
{
    flatten_with_summary(records).0
}

/// Same as [`flatten_all`], also returning volume counters
pub fn flatten_with_summary<'a, I>(records: I) -> (Vec<ShotEvent>, FlattenSummary)
where
    I: IntoIterator<Item = &'a RawGameRecord>,
{
    let mut summary = FlattenSummary::default();
    let mut rows = Vec::new();

    for record in records {
        let events = flatten(record);

        summary.records += 1;
        summary.plays_seen += plays(record).len();
        summary.rows += events.len();

        debug!(
            "Flattened game {:?}: {} shot/goal rows",
            get_i64(record, &["gamePk"]),
            events.len()
        );

        if summary.records % PROGRESS_INTERVAL == 0 {
            info!("Progress: {} records flattened, {} rows so far", summary.records, summary.rows);
        }

        rows.extend(events);
    }

    info!(
        "Flattened {} records: {} plays seen, {} shot/goal rows",
        summary.records, summary.plays_seen, summary.rows
    );

    (rows, summary)
}

fn plays(record: &RawGameRecord) -> &[Value] {
    safe_get(record, &PLAYS_PATH)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn extract_play(play: &Value, play_type: PlayType, game_id: Option<i64>) -> ShotEvent {
    ShotEvent {
        period: get_i64(play, &["about", "period"]),
        period_type: get_string(play, &["about", "periodType"]),
        period_time: get_string(play, &["about", "periodTime"]),
        game_id,
        attacking_team_id: get_i64(play, &["team", "id"]),
        attacking_team_name: get_string(play, &["team", "name"]),
        play_type,
        shooter: first_player_with_role(play, &SHOOTER_ROLES),
        goalie: first_player_with_role(play, &[GOALIE_ROLE]),
        shot_type: get_string(play, &["result", "secondaryType"]),
        x_coordinate: get_f64(play, &["coordinates", "x"]),
        y_coordinate: get_f64(play, &["coordinates", "y"]),
        empty_net: get_bool(play, &["result", "emptyNet"]),
        strength: get_string(play, &["result", "strength", "name"]),
    }
}

/// Full name of the first listed player whose `playerType` is one of `roles`.
///
/// Entries without a readable role are skipped. Only the first matching entry
/// counts: if it has no name the result is `None`.
fn first_player_with_role(play: &Value, roles: &[&str]) -> Option<String> {
    let entry = safe_get(play, &["players"])?
        .as_array()?
        .iter()
        .find(|entry| get_str(entry, &["playerType"]).is_some_and(|role| roles.contains(&role)))?;
    get_string(entry, &["player", "fullName"])
}
