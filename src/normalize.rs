//! Field normalization at the API boundary.
//!
//! Gamma delivers `outcomes`, `outcomePrices`, `tags` and `clobTokenIds`
//! either as native JSON arrays or as JSON-encoded strings of the same.
//! Everything downstream consumes only the decoded shape, so the coercion
//! happens exactly once here. A decode failure on one field substitutes a
//! documented default and bumps a counter; it never aborts the record or
//! its siblings.

use serde_json::Value;

use crate::types::{Market, Tag};

/// Fallback outcome pair when the `outcomes` field cannot be decoded.
const DEFAULT_OUTCOMES: [&str; 2] = ["Yes", "No"];

/// Per-field decode failure counters, reported in the batch summary.
#[derive(Debug, Default, Clone)]
pub struct NormalizeStats {
    pub outcome_failures: usize,
    pub price_failures: usize,
    pub tag_failures: usize,
    pub token_failures: usize,
}

impl NormalizeStats {
    pub fn total(&self) -> usize {
        self.outcome_failures + self.price_failures + self.tag_failures + self.token_failures
    }
}

/// Decode one raw Gamma record into a normalized [`Market`]. Total: every
/// field falls back to a default rather than failing the record.
pub fn normalize_market(v: &Value, stats: &mut NormalizeStats) -> Market {
    Market {
        id: string_field(v, "id")
            .or_else(|| string_field(v, "conditionId"))
            .unwrap_or_default(),
        question: string_field(v, "question").unwrap_or_default(),
        description: string_field(v, "description").unwrap_or_default(),
        outcomes: string_list(v.get("outcomes"), &DEFAULT_OUTCOMES, &mut stats.outcome_failures),
        outcome_prices: price_list(v.get("outcomePrices"), &mut stats.price_failures),
        tags: tag_list(v.get("tags"), &mut stats.tag_failures),
        clob_token_ids: string_list(v.get("clobTokenIds"), &[], &mut stats.token_failures),
        active: v.get("active").and_then(Value::as_bool),
        closed: v.get("closed").and_then(Value::as_bool),
        archived: v.get("archived").and_then(Value::as_bool),
        accepting_orders: v.get("acceptingOrders").and_then(Value::as_bool),
        end_date: string_field(v, "endDate").or_else(|| string_field(v, "endDateIso")),
        volume: number_field(v, "volume"),
        liquidity: number_field(v, "liquidity"),
    }
}

fn string_field(v: &Value, key: &str) -> Option<String> {
    match v.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Numbers sometimes arrive as numeric strings; accept both.
fn number_field(v: &Value, key: &str) -> Option<f64> {
    let field = v.get(key)?;
    field
        .as_f64()
        .or_else(|| field.as_str().and_then(|s| s.parse().ok()))
}

/// Resolve a string-or-array field to the array it encodes. Returns None on
/// a decode failure (counted by the caller), Some(default-shaped) otherwise.
fn decode_list(field: Option<&Value>, failures: &mut usize) -> Option<Vec<Value>> {
    match field {
        None | Some(Value::Null) => Some(Vec::new()),
        Some(Value::Array(items)) => Some(items.clone()),
        Some(Value::String(s)) => match serde_json::from_str::<Value>(s) {
            Ok(Value::Array(items)) => Some(items),
            _ => {
                *failures += 1;
                None
            }
        },
        Some(_) => {
            *failures += 1;
            None
        }
    }
}

fn string_list(field: Option<&Value>, default: &[&str], failures: &mut usize) -> Vec<String> {
    let fallback = || default.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    match decode_list(field, failures) {
        Some(items) if items.is_empty() && field.is_none() => fallback(),
        Some(items) => items
            .iter()
            .map(|i| match i {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect(),
        None => fallback(),
    }
}

fn price_list(field: Option<&Value>, failures: &mut usize) -> Vec<f64> {
    match decode_list(field, failures) {
        Some(items) => items
            .iter()
            .map(|i| {
                i.as_f64()
                    .or_else(|| i.as_str().and_then(|s| s.parse().ok()))
                    .unwrap_or(0.0)
            })
            .collect(),
        None => Vec::new(),
    }
}

fn tag_list(field: Option<&Value>, failures: &mut usize) -> Vec<Tag> {
    match decode_list(field, failures) {
        Some(items) => items
            .iter()
            .map(|i| match i {
                Value::String(s) => Tag { id: None, label: s.clone() },
                obj => Tag {
                    id: string_field(obj, "id"),
                    label: string_field(obj, "label").unwrap_or_default(),
                },
            })
            .collect(),
        None => Vec::new(),
    }
}
