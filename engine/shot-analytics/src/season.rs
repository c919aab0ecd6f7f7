use crate::error::{AnalyticsError, Result};
use play_flattener::ShotEvent;

/// Season start year encoded in the first four digits of a game id
/// (`"2021020015"` is a 2021 game).
pub fn extract_year(game_id: &str) -> Result<i32> {
    let prefix = game_id
        .get(..4)
        .filter(|prefix| prefix.bytes().all(|b| b.is_ascii_digit()))
        .ok_or_else(|| AnalyticsError::invalid_game_id(game_id))?;

    prefix.parse().map_err(|_| AnalyticsError::invalid_game_id(game_id))
}

pub fn event_year(event: &ShotEvent) -> Result<i32> {
    let game_id = event.game_id.ok_or(AnalyticsError::MissingGameId)?;
    extract_year(&game_id.to_string())
}
