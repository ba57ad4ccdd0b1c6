//! Flat input records supplied by the data collaborator.
//!
//! Numeric fields are parsed leniently: numbers, numeric strings, and
//! missing or malformed values (which become `None`) are all accepted.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RegionRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(deserialize_with = "required_string")]
    pub name: String,
    /// Explicit region metric; the count of matched schemes is used when absent.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub integrated_schemes: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemeRecord {
    #[serde(deserialize_with = "required_string")]
    pub id: String,
    #[serde(deserialize_with = "required_string")]
    pub name: String,
    /// Region display name (fallback match).
    #[serde(default)]
    pub region: String,
    /// Region foreign key (preferred match).
    #[serde(default, deserialize_with = "lenient_string")]
    pub region_id: Option<String>,
    /// Completion status; only the exact literal "Fully Completed" counts as done.
    #[serde(default)]
    pub status: Option<String>,
    /// Optional category label, e.g. "In Progress".
    #[serde(default, deserialize_with = "lenient_string")]
    pub category: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VillageRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(deserialize_with = "required_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub scheme_id: Option<String>,
    /// Scheme display name (fallback match).
    #[serde(default)]
    pub scheme_name: Option<String>,
    /// Region display name; picks between schemes sharing `scheme_name`.
    #[serde(default, deserialize_with = "lenient_string")]
    pub region: Option<String>,
    /// Supply status label ("good", "warning", "critical"). Overrides the
    /// status derived from the readings when it parses.
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub population: Option<f64>,
    /// Daily LPCD readings; malformed entries are kept as `None`.
    #[serde(default, deserialize_with = "lenient_f64_seq")]
    pub lpcd_readings: Vec<Option<f64>>,
}

/// Parse a loosely-typed JSON value as a finite number.
pub(crate) fn number_from_value(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_number(s),
        _ => None,
    };
    n.filter(|n| n.is_finite())
}

/// Parse a text cell as a finite number. Thousands separators are tolerated.
pub(crate) fn parse_number(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() { return None }
    trimmed.replace(',', "").parse::<f64>().ok().filter(|n| n.is_finite())
}

fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(number_from_value(&value))
}

fn lenient_f64_seq<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Option<f64>>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items.iter().map(number_from_value).collect(),
        _ => Vec::new(),
    })
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_owned()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn required_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    lenient_string(deserializer)?
        .ok_or_else(|| serde::de::Error::custom("expected a non-empty string or number"))
}
