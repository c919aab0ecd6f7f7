//! Loading raw game records handed over by the scraper

use crate::error::{Result, StoreError};
use play_flattener::RawGameRecord;
use serde_json::Value;
use std::path::Path;

/// Read raw game records from `path`.
///
/// Accepts a JSON array of games, a single game object, or JSON Lines.
pub fn load_raw_records(path: &Path) -> Result<Vec<RawGameRecord>> {
    if !path.is_file() {
        return Err(StoreError::not_found(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path)?;
    let records = parse_raw_records(&content)?;
    tracing::info!("Loaded {} raw game records from {:?}", records.len(), path);
    Ok(records)
}

pub fn parse_raw_records(content: &str) -> Result<Vec<RawGameRecord>> {
    let trimmed = content.trim_start();

    if trimmed.starts_with('[') {
        let records: Vec<Value> = serde_json::from_str(trimmed)?;
        return Ok(records);
    }

    // one object, or a stream of objects (JSON Lines)
    let mut records = Vec::new();
    for value in serde_json::Deserializer::from_str(trimmed).into_iter::<Value>() {
        match value? {
            Value::Object(object) => records.push(Value::Object(object)),
            other => {
                return Err(StoreError::invalid_format(format!(
                    "expected a game object, found {}",
                    json_kind(&other)
                )));
            }
        }
    }

    Ok(records)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
