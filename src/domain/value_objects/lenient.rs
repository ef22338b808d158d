//! Tolerant field readers for model-authored JSON
//!
//! Providers routinely answer `8.5` where a string was asked for, or `"12"`
//! where a count was. These readers accept either shape so one loosely typed
//! field does not discard the whole answer.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Text from a string, number or boolean. `null` and structured values read as `None`.
pub(crate) fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text_from(Value::deserialize(deserializer)?))
}

/// Like [`optional_text`], with an empty string for anything unreadable
pub(crate) fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(optional_text(deserializer)?.unwrap_or_default())
}

/// A non-negative whole count from a number or a numeric string
pub(crate) fn optional_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(count_from(Value::deserialize(deserializer)?))
}

fn text_from(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn count_from(value: Value) -> Option<u32> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if !number.is_finite() || number < 0.0 || number > f64::from(u32::MAX) {
        return None;
    }
    Some(number.round() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "optional_text")]
        label: Option<String>,
        #[serde(default, deserialize_with = "text")]
        name: String,
        #[serde(default, deserialize_with = "optional_count")]
        columns: Option<u32>,
    }

    fn sample(value: Value) -> Sample {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_numbers_read_as_text() {
        let s = sample(json!({"label": 8.5, "name": 42}));
        assert_eq!(s.label.as_deref(), Some("8.5"));
        assert_eq!(s.name, "42");
    }

    #[test]
    fn test_null_and_structured_text_are_absent() {
        let s = sample(json!({"label": null, "name": null}));
        assert_eq!(s.label, None);
        assert_eq!(s.name, "");

        let s = sample(json!({"label": ["a"], "name": {"first": "Globex"}}));
        assert_eq!(s.label, None);
        assert_eq!(s.name, "");
    }

    #[test]
    fn test_counts_accept_numeric_strings() {
        assert_eq!(sample(json!({"columns": "12"})).columns, Some(12));
        assert_eq!(sample(json!({"columns": " 8 "})).columns, Some(8));
        assert_eq!(sample(json!({"columns": 12.0})).columns, Some(12));
        assert_eq!(sample(json!({"columns": 6})).columns, Some(6));
    }

    #[test]
    fn test_unreadable_counts_are_absent() {
        assert_eq!(sample(json!({"columns": "twelve"})).columns, None);
        assert_eq!(sample(json!({"columns": -3})).columns, None);
        assert_eq!(sample(json!({"columns": null})).columns, None);
        assert_eq!(sample(json!({})).columns, None);
    }
}
