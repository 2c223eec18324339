//! Tradeability filter.
//!
//! A total filter over normalized markets: nothing in here can abort the
//! batch, and a record that cannot be evaluated cleanly is excluded rather
//! than propagated. Flags are checked against their explicit values only —
//! an absent flag passes.

use chrono::{DateTime, NaiveDate, Utc};

use crate::types::Market;

/// Keep the markets that are currently tradeable: active, not closed, not
/// archived, accepting orders, and not already past their end date. The
/// output is a subset of the input in order.
pub fn validate(markets: Vec<Market>, now: DateTime<Utc>) -> Vec<Market> {
    markets.into_iter().filter(|m| is_tradeable(m, now)).collect()
}

fn is_tradeable(m: &Market, now: DateTime<Utc>) -> bool {
    if m.active == Some(false) {
        return false;
    }
    if m.closed == Some(true) {
        return false;
    }
    if m.archived == Some(true) {
        return false;
    }
    if m.accepting_orders == Some(false) {
        return false;
    }
    // Exclusion requires a date that parses AND is strictly in the past;
    // an absent or unparseable end date passes.
    if let Some(end) = m.end_date.as_deref() {
        if let Some(end) = parse_end_date(end) {
            if end < now {
                return false;
            }
        }
    }
    true
}

/// Lenient end-date parse: RFC 3339, then ISO without offset (assumed UTC),
/// then a bare date (start of day UTC).
pub fn parse_end_date(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.and_utc());
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}
