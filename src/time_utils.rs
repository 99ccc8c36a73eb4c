use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike, Utc, Weekday};

use crate::domain::market_data::Timestamp;

const NAIVE_FORMATS: [&str; 5] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse a timestamp string from the price history file.
///
/// Offsets are honoured; offset-less times are taken as wall-clock and stored
/// as UTC so that [`format_clock`] gives back the same text.
pub fn parse_timestamp(raw: &str) -> Option<Timestamp> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(Timestamp::from_millis(dt.timestamp_millis()));
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(Timestamp::from_millis(naive.and_utc().timestamp_millis()));
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Timestamp::from_millis(naive.and_utc().timestamp_millis()))
}

fn to_datetime(millis: f64) -> Option<DateTime<Utc>> {
    if !millis.is_finite() {
        return None;
    }
    DateTime::from_timestamp_millis(millis.trunc() as i64)
}

/// `HH:MM:SS` readout used by the time tooltip.
pub fn format_clock(millis: f64) -> String {
    match to_datetime(millis) {
        Some(dt) => dt.format("%H:%M:%S").to_string(),
        None => "--:--:--".to_string(),
    }
}

/// Axis label for a time tick, choosing the coarsest unit that still
/// distinguishes the instant (milliseconds up to years).
pub fn format_time_tick(millis: i64) -> String {
    let Some(dt) = DateTime::from_timestamp_millis(millis) else {
        return String::new();
    };
    let naive = dt.naive_utc();
    let sub_second = millis.rem_euclid(1000);

    if sub_second != 0 {
        format!(".{:03}", sub_second)
    } else if naive.second() != 0 {
        naive.format(":%S").to_string()
    } else if naive.minute() != 0 {
        naive.format("%I:%M").to_string()
    } else if naive.hour() != 0 {
        naive.format("%I %p").to_string()
    } else if naive.day() != 1 {
        if naive.weekday() != Weekday::Sun {
            naive.format("%a %d").to_string()
        } else {
            naive.format("%b %d").to_string()
        }
    } else if naive.month() != 1 {
        naive.format("%B").to_string()
    } else {
        naive.format("%Y").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn millis(raw: &str) -> i64 {
        parse_timestamp(raw).map(|t| t.value()).unwrap_or(i64::MIN)
    }

    #[test]
    fn parses_history_file_format() {
        assert_eq!(millis("1970-01-01 00:01:00"), 60_000);
        assert_eq!(millis("1970-01-01T00:00:01.250"), 1_250);
        assert_eq!(millis("1970-01-02"), 86_400_000);
        assert_eq!(millis("1970-01-01 01:30"), 5_400_000);
    }

    #[test]
    fn honours_explicit_offsets() {
        assert_eq!(millis("1970-01-01T01:00:00+01:00"), 0);
        assert_eq!(millis("1970-01-01T00:00:00Z"), 0);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("2024-13-40 10:00:00").is_none());
    }

    #[test]
    fn clock_round_trips_wall_time() {
        let ts = parse_timestamp("2024-03-05 14:07:09").map(|t| t.as_f64()).unwrap_or(f64::NAN);
        assert_eq!(format_clock(ts), "14:07:09");
        assert_eq!(format_clock(ts + 999.9), "14:07:09");
        assert_eq!(format_clock(f64::NAN), "--:--:--");
    }

    #[test]
    fn tick_labels_pick_the_right_unit() {
        assert_eq!(format_time_tick(millis("2024-03-05 14:07:09") + 26), ".026");
        assert_eq!(format_time_tick(millis("2024-03-05 14:07:09")), ":09");
        assert_eq!(format_time_tick(millis("2024-03-05 14:07:00")), "02:07");
        assert_eq!(format_time_tick(millis("2024-03-05 15:00:00")), "03 PM");
        // 2024-03-05 was a Tuesday, 2024-03-10 a Sunday
        assert_eq!(format_time_tick(millis("2024-03-05")), "Tue 05");
        assert_eq!(format_time_tick(millis("2024-03-10")), "Mar 10");
        assert_eq!(format_time_tick(millis("2024-03-01")), "March");
        assert_eq!(format_time_tick(millis("2024-01-01")), "2024");
    }
}
