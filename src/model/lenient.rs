//! Total deserializers for backend payloads.
//!
//! Agent endpoints are free-form JSON owned by other processes. A missing
//! field, a number sent as a string, or a `null` must never fail the whole
//! document, so every model field goes through one of these helpers:
//! wrong-typed scalars become zero/blank, malformed list items are skipped.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Parse a whole payload, falling back to the model's default.
pub fn parse<T: DeserializeOwned + Default>(value: &Value) -> T {
    T::deserialize(value).unwrap_or_default()
}

/// `"NaN"` and `"inf"` parse as floats, so non-finite results count as absent.
fn parse_finite(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|f| f.is_finite())
}

pub fn as_number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => parse_finite(s).unwrap_or(0.0),
        Value::Bool(b) => f64::from(u8::from(*b)),
        _ => 0.0,
    }
}

pub fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

pub fn number<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    Value::deserialize(d).map(|v| as_number(&v))
}

pub fn opt_number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    Value::deserialize(d).map(|v| match v {
        Value::Number(ref n) => n.as_f64(),
        Value::String(ref s) => parse_finite(s),
        _ => None,
    })
}

pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Value::deserialize(d).map(|v| as_text(&v))
}

/// Blank strings count as absent.
pub fn opt_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Value::deserialize(d).map(|v| {
        let s = as_text(&v);
        (!s.trim().is_empty()).then_some(s)
    })
}

pub fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    Value::deserialize(d).map(|v| match v {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on" | "running"
        ),
        _ => false,
    })
}

/// A nested object; a malformed one becomes the default.
pub fn object<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Value::deserialize(d).map(|v| serde_json::from_value(v).unwrap_or_default())
}

/// A list whose unparseable items are dropped. Non-arrays become empty.
pub fn list<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Value::deserialize(d).map(|v| match v {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

/// A list of display strings; scalars are stringified, other items dropped.
pub fn text_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    Value::deserialize(d).map(|v| match v {
        Value::Array(items) => items
            .iter()
            .filter(|item| !item.is_object() && !item.is_array() && !item.is_null())
            .map(as_text)
            .collect(),
        _ => Vec::new(),
    })
}

/// An object of `name → number`, in document order.
pub fn scores<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<(String, f64)>, D::Error> {
    Value::deserialize(d).map(|v| match v {
        Value::Object(map) => map.iter().map(|(k, v)| (k.clone(), as_number(v))).collect(),
        _ => Vec::new(),
    })
}

/// An object of `name → T`, in document order; entries that fail to parse are dropped.
pub fn entries<'de, D, T>(d: D) -> Result<Vec<(String, T)>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Value::deserialize(d).map(|v| match v {
        Value::Object(map) => map
            .into_iter()
            .filter_map(|(k, v)| serde_json::from_value(v).ok().map(|t| (k, t)))
            .collect(),
        _ => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Sample {
        #[serde(deserialize_with = "number")]
        count: f64,
        #[serde(deserialize_with = "text")]
        name: String,
        #[serde(deserialize_with = "opt_number")]
        pnl: Option<f64>,
        #[serde(deserialize_with = "list")]
        items: Vec<Item>,
        #[serde(deserialize_with = "scores")]
        dims: Vec<(String, f64)>,
    }

    #[derive(Debug, Deserialize)]
    struct Item {
        id: u32,
    }

    #[test]
    fn missing_fields_default() {
        let s: Sample = parse(&json!({}));
        assert_eq!(s.count, 0.0);
        assert!(s.name.is_empty());
        assert!(s.pnl.is_none());
        assert!(s.items.is_empty());
    }

    #[test]
    fn wrong_types_coerce_instead_of_failing() {
        let s: Sample = parse(&json!({
            "count": "12",
            "name": 7,
            "pnl": null,
            "items": [{"id": 1}, {"id": "bad"}, 3, {"id": 2}],
        }));
        assert_eq!(s.count, 12.0);
        assert_eq!(s.name, "7");
        assert!(s.pnl.is_none());
        assert_eq!(s.items.iter().map(|i| i.id).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn non_finite_strings_count_as_absent() {
        let s: Sample = parse(&json!({"count": "NaN", "pnl": "inf"}));
        assert_eq!(s.count, 0.0);
        assert!(s.pnl.is_none());
        assert_eq!(as_number(&json!("-infinity")), 0.0);
        assert_eq!(as_number(&json!(" 2.5 ")), 2.5);
    }

    #[test]
    fn non_object_payload_falls_back_to_default() {
        let s: Sample = parse(&json!([1, 2, 3]));
        assert_eq!(s.count, 0.0);
    }

    #[test]
    fn scores_keep_document_order() {
        let s: Sample = parse(&json!({"dims": {"zeta": 1, "alpha": "2", "mid": true}}));
        let keys: Vec<_> = s.dims.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
        assert_eq!(s.dims[1].1, 2.0);
    }
}
