use serde::Serialize;
use std::fmt::Display;

use crate::engine::Source;

/// Outcome of a command-line resolution, ready for output.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Requested value kind (int, float, bool, string)
    pub target: &'static str,
    /// Whether a candidate or default produced a value
    pub resolved: bool,
    /// Resolved value, `null` when nothing resolved
    pub value: serde_json::Value,
    #[serde(flatten)]
    pub source: Source,
}

impl Report {
    pub fn new<T: Serialize + Display>(target: &'static str, value: Option<T>, source: Source) -> Self {
        let resolved = value.is_some();
        let value = value.map_or(serde_json::Value::Null, |v| to_json(&v));
        Self {
            target,
            resolved,
            value,
            source,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved
    }
}

/// JSON form of a resolved value. Values JSON cannot represent (NaN,
/// infinities) fall back to their display text rather than `null`.
fn to_json<T: Serialize + Display>(value: &T) -> serde_json::Value {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::Null) | Err(_) => serde_json::Value::String(value.to_string()),
        Ok(json) => json,
    }
}
