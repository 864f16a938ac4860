use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::TaskError;

/// All due times live in India Standard Time.
pub const ZONE: Tz = chrono_tz::Asia::Kolkata;

const FORMAT_FULL: &str = "%Y-%m-%d %H:%M";
const FORMAT_DATE: &str = "%Y-%m-%d";
const FORMAT_TIME: &str = "%H:%M";

/// Current wall-clock time in the given zone.
pub fn now(zone: Tz) -> DateTime<Tz> {
    Utc::now().with_timezone(&zone)
}

/// Parses a due date/time, trying three shapes in order:
///
/// 1. `YYYY-MM-DD HH:MM` — taken as-is.
/// 2. `YYYY-MM-DD` — time defaults to 23:59.
/// 3. `HH:MM` — date defaults to today. No rollover to tomorrow when the
///    instant has already passed.
///
/// `now` supplies the current date for the time-only shape and the zone the
/// result is anchored in. Callers that want retry-until-valid loop at the
/// prompt; this function parses exactly once.
pub fn parse_due(input: &str, now: DateTime<Tz>) -> Result<DateTime<Tz>, TaskError> {
    let input = input.trim();
    let zone = now.timezone();

    if let Ok(dt) = NaiveDateTime::parse_from_str(input, FORMAT_FULL) {
        return in_zone(zone, dt, input);
    }
    if let Ok(date) = NaiveDate::parse_from_str(input, FORMAT_DATE) {
        let dt = date.and_hms_opt(23, 59, 0).unwrap();
        return in_zone(zone, dt, input);
    }
    if let Ok(time) = NaiveTime::parse_from_str(input, FORMAT_TIME) {
        let dt = now.date_naive().and_time(time);
        return in_zone(zone, dt, input);
    }

    Err(TaskError::InvalidDateTime(input.to_string()))
}

/// Renders a due time the way task listings show it, e.g.
/// `2025-06-01 09:30:00 IST`.
pub fn format_due(due_at: DateTime<Tz>) -> String {
    due_at.format("%Y-%m-%d %H:%M:%S %Z").to_string()
}

// IST has no DST folds, but the conversion is fallible in general.
fn in_zone(zone: Tz, dt: NaiveDateTime, raw: &str) -> Result<DateTime<Tz>, TaskError> {
    zone.from_local_datetime(&dt)
        .single()
        .ok_or_else(|| TaskError::InvalidDateTime(raw.to_string()))
}
