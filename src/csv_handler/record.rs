//! Payload projection for CSV rows.
//!
//! A payload is any `serde::Serialize` value that serializes to a string-keyed
//! mapping. [`to_fields`] performs that conversion, [`render_value`] turns one
//! field into its cell text, and [`project`] lines the fields up with the
//! configured columns.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::RecorderError;

/// Largest magnitude at which every integral `f64` is exactly representable.
const MAX_EXACT_INTEGRAL_FLOAT: f64 = 9_007_199_254_740_992.0;

/// Converts a payload into a mapping from field name to value.
///
/// Structs contribute their serialized field names (so `#[serde(rename)]`
/// applies), maps contribute their keys.
///
/// # Errors
///
/// - [`RecorderError::Serialize`] if the payload's `Serialize` impl fails or
///   a map has non-string keys
/// - [`RecorderError::NotAMapping`] if the payload serializes to a scalar,
///   sequence or null
pub fn to_fields<T>(payload: &T) -> Result<Map<String, Value>, RecorderError>
where
    T: Serialize + ?Sized,
{
    match serde_json::to_value(payload)? {
        Value::Object(fields) => Ok(fields),
        other => Err(RecorderError::NotAMapping(json_kind(&other))),
    }
}

/// Renders a single payload value as CSV cell text.
///
/// - null renders as the empty string
/// - strings are copied verbatim
/// - booleans render as `true` / `false`
/// - integers render as decimal digits
/// - integral floats below 2^53 in magnitude drop the decimal point (`2.0` → `2`);
///   other floats use the shortest round-trip form (`1.5`, `0.1`)
/// - arrays and objects render as compact JSON
#[must_use]
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                n.to_string()
            } else {
                match n.as_f64() {
                    Some(f) if f.fract() == 0.0 && f.abs() < MAX_EXACT_INTEGRAL_FLOAT => {
                        format!("{f:.0}")
                    }
                    Some(f) => f.to_string(),
                    None => n.to_string(),
                }
            }
        }
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Projects payload fields onto `columns`, one cell per column in order.
///
/// Columns missing from the payload, or present with a null value, yield an
/// empty cell. Fields not named by any column are dropped.
#[must_use]
pub fn project<S>(fields: &Map<String, Value>, columns: &[S]) -> Vec<String>
where
    S: AsRef<str>,
{
    columns
        .iter()
        .map(|column| fields.get(column.as_ref()).map(render_value).unwrap_or_default())
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
