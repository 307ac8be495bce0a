//! Per-topic scoring rules.
//!
//! Each rule is a pure function of (payload, baby age in months) returning a
//! [`SectionAssessment`](crate::engine::types::SectionAssessment). Payload
//! fields that are missing, null, or of the wrong JSON type read as their
//! documented defaults; a rule never fails on a well-formed JSON object.

pub(crate) mod feeding;
pub(crate) mod mothercare;
pub(crate) mod sleep;
pub(crate) mod stubs;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Accept a JSON number (or nothing) where a float is expected; anything
/// else reads as absent so the rule falls back to its default.
pub(crate) fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)
        .ok()
        .and_then(|value| value.as_f64()))
}

/// As [`lenient_number`], truncated to whole units (counts of feeds, wake-ups).
pub(crate) fn lenient_count<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)
        .ok()
        .and_then(|value| value.as_i64().or_else(|| value.as_f64().map(|f| f as i64))))
}

/// Accept a JSON boolean (or nothing) where a flag is expected.
pub(crate) fn lenient_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)
        .ok()
        .and_then(|value| value.as_bool()))
}

/// Accept a JSON string (or nothing) where a label is expected.
pub(crate) fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)
        .ok()
        .and_then(|value| value.as_str().map(str::to_owned)))
}
