//! Conversion of ISO-8601 timestamps to local form-field and display strings.

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, TimeZone};

/// Shape of a `datetime-local` input value: `YYYY-MM-DDTHH:MM`
const LOCAL_INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Years that fit the four-digit `YYYY` field
const FORM_YEARS: std::ops::RangeInclusive<i32> = 0..=9999;

/// Naive formats accepted in addition to RFC 3339, most specific first
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Convert an ISO-8601 timestamp to `YYYY-MM-DDTHH:MM` in the local time zone.
///
/// Empty or absent input gives an empty string, and so does text that is not
/// a recognizable timestamp. So does an instant whose local year falls
/// outside 0..=9999, which has no four-digit form.
pub fn to_local_datetime_string(input: Option<&str>) -> String {
    to_datetime_string_in(input, &Local)
}

/// [`to_local_datetime_string`] against an explicit time zone.
pub fn to_datetime_string_in<Tz: TimeZone>(input: Option<&str>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    parse_in(input, tz)
        .filter(|dt| FORM_YEARS.contains(&dt.year()))
        .map(|dt| dt.format(LOCAL_INPUT_FORMAT).to_string())
        .unwrap_or_default()
}

/// Human-readable local time for listings, e.g. `Fri Mar 15 2024 19:00`.
/// Unparseable input is returned unchanged.
pub fn to_display_string(input: &str) -> String {
    match parse_in(Some(input), &Local) {
        Some(dt) => dt.format("%a %b %-d %Y %H:%M").to_string(),
        None => input.to_string(),
    }
}

/// Parse an ISO-8601 timestamp into `tz`.
///
/// - RFC 3339 (`Z` or numeric offset) is converted into `tz`
/// - a timestamp without offset is taken as already being in `tz`
/// - a bare date is midnight UTC
fn parse_in<Tz: TimeZone>(input: Option<&str>, tz: &Tz) -> Option<DateTime<Tz>> {
    let input = input.map(str::trim).filter(|s| !s.is_empty())?;

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(tz));
    }

    if let Some(naive) = NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
    {
        // Gaps from DST transitions resolve to nothing; ambiguous times take the earlier
        return tz.from_local_datetime(&naive).earliest();
    }

    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d").ok()?;
    let midnight = date.and_hms_opt(0, 0, 0)?.and_utc();
    Some(midnight.with_timezone(tz))
}
