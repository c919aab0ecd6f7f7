use serde::{Deserialize, Serialize};
use std::fmt;

/// One game as received from the stats API, shape untouched
pub type RawGameRecord = serde_json::Value;

/// Column names of the flat event table, in storage order
pub const SHOT_EVENT_COLUMNS: [&str; 14] = [
    "period",
    "period_type",
    "period_time",
    "game_id",
    "attacking_team_id",
    "attacking_team_name",
    "play_type",
    "shooter",
    "goalie",
    "shot_type",
    "x_coordinate",
    "y_coordinate",
    "empty_net",
    "strength",
];

/// Event kinds kept by the flattener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayType {
    Shot,
    Goal,
}

impl PlayType {
    /// Map the feed's `result.event` marker; every other kind is `None`
    pub fn from_event(event: &str) -> Option<Self> {
        match event {
            "Shot" => Some(PlayType::Shot),
            "Goal" => Some(PlayType::Goal),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlayType::Shot => "Shot",
            PlayType::Goal => "Goal",
        }
    }
}

impl fmt::Display for PlayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single shot or goal, flattened out of a game record.
///
/// `None` marks a field whose lookup path was absent or held the wrong type.
/// The same shape is the feature record handed to the prediction service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotEvent {
    pub period: Option<i64>,

    /// Regulation, overtime or shootout marker (e.g. "REGULAR")
    pub period_type: Option<String>,

    /// Elapsed clock in the period (e.g. "12:31")
    pub period_time: Option<String>,

    /// Game identifier; its first four digits are the season start year
    pub game_id: Option<i64>,

    pub attacking_team_id: Option<i64>,
    pub attacking_team_name: Option<String>,
    pub play_type: PlayType,
    pub shooter: Option<String>,
    pub goalie: Option<String>,

    /// Secondary type of the shot (e.g. "Wrist Shot")
    pub shot_type: Option<String>,

    pub x_coordinate: Option<f64>,
    pub y_coordinate: Option<f64>,
    pub empty_net: Option<bool>,

    /// Manpower situation (e.g. "Even", "Power Play")
    pub strength: Option<String>,
}

impl ShotEvent {
    /// Create an event of the given kind with every other field missing
    pub fn new(play_type: PlayType) -> Self {
        Self {
            period: None,
            period_type: None,
            period_time: None,
            game_id: None,
            attacking_team_id: None,
            attacking_team_name: None,
            play_type,
            shooter: None,
            goalie: None,
            shot_type: None,
            x_coordinate: None,
            y_coordinate: None,
            empty_net: None,
            strength: None,
        }
    }

    /// Turn empty text fields into `None`, the single missing marker for text
    pub fn with_blank_text_as_missing(mut self) -> Self {
        for field in [
            &mut self.period_type,
            &mut self.period_time,
            &mut self.attacking_team_name,
            &mut self.shooter,
            &mut self.goalie,
            &mut self.shot_type,
            &mut self.strength,
        ] {
            if field.as_deref() == Some("") {
                *field = None;
            }
        }
        self
    }

    pub fn is_goal(&self) -> bool {
        self.play_type == PlayType::Goal
    }

    /// Both coordinates present
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.x_coordinate?, self.y_coordinate?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_text_becomes_missing() {
        let mut event = ShotEvent::new(PlayType::Shot);
        event.period_time = Some(String::new());
        event.strength = Some("Even".to_string());
        event.x_coordinate = Some(0.0);

        let event = event.with_blank_text_as_missing();
        assert!(event.period_time.is_none());
        assert_eq!(event.strength.as_deref(), Some("Even"));
        assert_eq!(event.x_coordinate, Some(0.0));
    }

    #[test]
    fn test_play_type_from_event() {
        assert_eq!(PlayType::from_event("Shot"), Some(PlayType::Shot));
        assert_eq!(PlayType::from_event("Goal"), Some(PlayType::Goal));
        assert_eq!(PlayType::from_event("Missed Shot"), None);
        assert_eq!(PlayType::from_event("goal"), None);
    }

    #[test]
    fn test_serialized_fields_match_columns() {
        let event = ShotEvent::new(PlayType::Goal);
        let value = serde_json::to_value(&event).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), SHOT_EVENT_COLUMNS.len());
        for column in SHOT_EVENT_COLUMNS {
            assert!(object.contains_key(column), "missing column {column}");
        }
        assert_eq!(object["play_type"], "Goal");
        assert!(object["shooter"].is_null());
    }

    #[test]
    fn test_coordinates_require_both_axes() {
        let mut event = ShotEvent::new(PlayType::Shot);
        event.x_coordinate = Some(-12.0);
        assert_eq!(event.coordinates(), None);

        event.y_coordinate = Some(4.0);
        assert_eq!(event.coordinates(), Some((-12.0, 4.0)));
    }
}
