//! Safe nested-path lookup over untyped JSON
//!
//! Every accessor returns `None` instead of failing when a step of the path is
//! absent, is not an object, or holds a value of the wrong type.

use serde_json::Value;

/// Walk `path` key by key starting at `value`.
///
/// Returns `None` if any step is not an object, a key is absent, or the final
/// value is JSON `null`.
pub fn safe_get<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut current = value;
    for key in path {
        current = current.as_object()?.get(*key)?;
    }

    if current.is_null() {
        None
    } else {
        Some(current)
    }
}

/// Integer at `path`. Integral floats (`3.0`) are accepted, numeric strings are not.
pub fn get_i64(value: &Value, path: &[&str]) -> Option<i64> {
    let found = safe_get(value, path)?;
    found.as_i64().or_else(|| {
        found
            .as_f64()
            .filter(|f| f.is_finite() && f.fract() == 0.0)
            .filter(|f| *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
            .map(|f| f as i64)
    })
}

pub fn get_f64(value: &Value, path: &[&str]) -> Option<f64> {
    safe_get(value, path)?.as_f64()
}

pub fn get_str<'a>(value: &'a Value, path: &[&str]) -> Option<&'a str> {
    safe_get(value, path)?.as_str()
}

/// Owned variant of [`get_str`]; an empty string counts as missing
pub fn get_string(value: &Value, path: &[&str]) -> Option<String> {
    get_str(value, path).filter(|s| !s.is_empty()).map(str::to_string)
}

pub fn get_bool(value: &Value, path: &[&str]) -> Option<bool> {
    safe_get(value, path)?.as_bool()
}
