//! Date-time string predicate shared by compiled validators
//!
//! Accepts RFC 3339 date-times (`2024-02-29T23:59:60Z`, `2024-01-01 08:30:00.5+05:30`).
//! Calendar dates must exist; a leap second is accepted only when it falls on
//! 23:59 UTC.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

static DATE_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^([0-9]{4})-([0-9]{2})-([0-9]{2})[t ]([0-9]{2}):([0-9]{2}):([0-9]{2})(?:\.[0-9]+)?(z|([+-])([0-9]{2})(?::?([0-9]{2}))?)$",
    )
    .expect("date-time pattern is valid")
});

/// Check whether a string is a well-formed date-time
pub fn valid_date_time(s: &str) -> bool {
    let Some(caps) = DATE_TIME.captures(s) else {
        return false;
    };
    let field = |i: usize| -> i64 {
        caps.get(i)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0)
    };

    let (year, month, day) = (field(1), field(2), field(3));
    let (hour, minute, second) = (field(4), field(5), field(6));

    if NaiveDate::from_ymd_opt(year as i32, month as u32, day as u32).is_none() {
        return false;
    }
    if hour > 23 || minute > 59 || second > 60 {
        return false;
    }

    let (offset_hour, offset_minute) = (field(9), field(10));
    if offset_hour > 23 || offset_minute > 59 {
        return false;
    }
    if second < 60 {
        return true;
    }

    // Leap second: shift to UTC and require 23:59
    let sign = match caps.get(8).map(|m| m.as_str()) {
        Some("-") => -1,
        _ => 1,
    };
    let utc_minutes = hour * 60 + minute - sign * (offset_hour * 60 + offset_minute);
    utc_minutes.rem_euclid(24 * 60) == 23 * 60 + 59
}
