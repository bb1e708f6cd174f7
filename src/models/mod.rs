pub mod appointment;
pub mod cart;
pub mod doctor;
pub mod history;
pub mod review;

pub use appointment::*;
pub use cart::*;
pub use doctor::*;
pub use history::*;
pub use review::*;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Read a flat record field as text.
///
/// Persisted slots may carry numbers or booleans where a form would have
/// produced strings; those are kept in their textual form. `null` reads as
/// the empty string. Nested values are rejected.
pub(crate) fn flat_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    value_to_text(&value).ok_or_else(|| serde::de::Error::custom("expected a flat scalar field"))
}

/// Textual form of a scalar JSON value. None for arrays and objects.
pub(crate) fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some(String::new()),
        Value::Array(_) | Value::Object(_) => None,
    }
}
