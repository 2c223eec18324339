//! UTC → civil date/time formatting with an approximate DST rule.
//!
//! The supported zone gets a fixed −4 h offset for UTC calendar months
//! April through November and −5 h otherwise — an approximation of
//! Eastern Daylight vs Standard that deliberately does not consult real
//! transition dates. Published example outputs depend on this rule, so it
//! must stay as-is; do not replace it with a timezone database. Any other
//! requested zone passes through at offset 0.

use chrono::{DateTime, Datelike, Duration, Timelike, Utc};

use crate::config::DEFAULT_TIMEZONE;

/// Which clock face a call site wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockStyle {
    /// Zero-padded `HH:MM`.
    TwentyFourHour,
    /// `H:MM AM/PM`, midnight rendered as `12:00 AM`.
    TwelveHour,
}

/// A formatted civil date and clock time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CivilStamp {
    pub date: String,
    pub time: String,
}

fn offset_hours(instant: DateTime<Utc>, zone: &str) -> i64 {
    if zone != DEFAULT_TIMEZONE {
        return 0;
    }
    match instant.month() {
        4..=11 => -4,
        _ => -5,
    }
}

/// Convert a UTC instant to the target zone's civil date and time.
pub fn to_local_civil(instant: DateTime<Utc>, zone: &str, style: ClockStyle) -> CivilStamp {
    let local = instant + Duration::hours(offset_hours(instant, zone));
    let date = local.format("%Y-%m-%d").to_string();
    let time = match style {
        ClockStyle::TwentyFourHour => local.format("%H:%M").to_string(),
        ClockStyle::TwelveHour => {
            let (is_pm, hour) = local.hour12();
            format!("{}:{:02} {}", hour, local.minute(), if is_pm { "PM" } else { "AM" })
        }
    };
    CivilStamp { date, time }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn october_uses_minus_four() {
        let s = to_local_civil(utc(2025, 10, 29, 23, 30), DEFAULT_TIMEZONE, ClockStyle::TwentyFourHour);
        assert_eq!(s.date, "2025-10-29");
        assert_eq!(s.time, "19:30");
    }

    #[test]
    fn conversion_can_cross_the_date_line() {
        let s = to_local_civil(utc(2025, 10, 30, 0, 30), DEFAULT_TIMEZONE, ClockStyle::TwentyFourHour);
        assert_eq!(s.date, "2025-10-29");
        assert_eq!(s.time, "20:30");
    }

    #[test]
    fn winter_months_use_minus_five() {
        let s = to_local_civil(utc(2026, 1, 15, 12, 0), DEFAULT_TIMEZONE, ClockStyle::TwentyFourHour);
        assert_eq!(s.time, "07:00");
        let s = to_local_civil(utc(2026, 3, 31, 12, 0), DEFAULT_TIMEZONE, ClockStyle::TwentyFourHour);
        assert_eq!(s.time, "07:00");
        // April flips to -4 regardless of the real transition date.
        let s = to_local_civil(utc(2026, 4, 1, 12, 0), DEFAULT_TIMEZONE, ClockStyle::TwentyFourHour);
        assert_eq!(s.time, "08:00");
    }

    #[test]
    fn unknown_zones_pass_through_unmodified() {
        let s = to_local_civil(utc(2025, 10, 29, 23, 30), "Europe/Berlin", ClockStyle::TwentyFourHour);
        assert_eq!(s.date, "2025-10-29");
        assert_eq!(s.time, "23:30");
    }

    #[test]
    fn twelve_hour_renders_midnight_as_twelve_am() {
        // 04:00Z in October is midnight local.
        let s = to_local_civil(utc(2025, 10, 29, 4, 0), DEFAULT_TIMEZONE, ClockStyle::TwelveHour);
        assert_eq!(s.time, "12:00 AM");
    }

    #[test]
    fn twelve_hour_afternoon_formatting() {
        let s = to_local_civil(utc(2025, 10, 30, 0, 30), DEFAULT_TIMEZONE, ClockStyle::TwelveHour);
        assert_eq!(s.time, "8:30 PM");
        let s = to_local_civil(utc(2025, 10, 29, 16, 5), DEFAULT_TIMEZONE, ClockStyle::TwelveHour);
        assert_eq!(s.time, "12:05 PM");
    }
}
