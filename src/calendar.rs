//! The drink-day calendar rule and date-label helpers.
//!
//! A drink-day runs from 04:01 to 04:00 the next calendar day: drinks logged
//! between midnight and 4 a.m. count toward the evening that produced them.
//! All functions here are generic over [`chrono::TimeZone`] so production
//! code runs on [`chrono::Local`] while tests pin a fixed offset.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};

/// Local hour at which a new drink-day begins. Hour 4 exactly belongs to the
/// new day.
pub const DAY_ROLLOVER_HOUR: u32 = 4;

/// Map an absolute timestamp to its drink-day in the given zone.
///
/// Returns `None` only for timestamps outside chrono's representable range;
/// callers treat such events as skippable rather than erroring. Daylight-
/// saving transitions resolve to whatever the local calendar date says.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, TimeZone, Utc};
/// use nightcap::adjusted_day;
///
/// // 03:59:59 still belongs to the previous day...
/// let ts = Utc.with_ymd_and_hms(2024, 5, 2, 3, 59, 59).unwrap().timestamp_millis();
/// assert_eq!(adjusted_day(ts, &Utc), NaiveDate::from_ymd_opt(2024, 5, 1));
///
/// // ...and 04:00:00 starts the new one.
/// let ts = Utc.with_ymd_and_hms(2024, 5, 2, 4, 0, 0).unwrap().timestamp_millis();
/// assert_eq!(adjusted_day(ts, &Utc), NaiveDate::from_ymd_opt(2024, 5, 2));
/// ```
pub fn adjusted_day<Tz: TimeZone>(timestamp_ms: i64, tz: &Tz) -> Option<NaiveDate> {
    let utc = DateTime::<Utc>::from_timestamp_millis(timestamp_ms)?;
    let local = utc.with_timezone(tz);
    let date = local.date_naive();
    if local.hour() < DAY_ROLLOVER_HOUR {
        date.pred_opt()
    } else {
        Some(date)
    }
}

/// Format a drink-day as its `YYYY-MM-DD` label.
pub fn day_label(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Format a drink-day as its `YYYY-MM` month label.
pub fn month_label(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Convert a `YYYY-MM-DD` label to its URL form `YYYYMMDD`.
///
/// ```
/// assert_eq!(nightcap::date_for_url("2024-05-01"), "20240501");
/// ```
pub fn date_for_url(date: &str) -> String {
    date.chars().filter(|c| *c != '-').collect()
}

/// Convert a `YYYYMMDD` URL segment back to a `YYYY-MM-DD` label.
///
/// Returns `None` if the input is not exactly eight ASCII digits.
///
/// ```
/// assert_eq!(nightcap::parse_url_date("20240501").as_deref(), Some("2024-05-01"));
/// assert_eq!(nightcap::parse_url_date("2024-05"), None);
/// ```
pub fn parse_url_date(url_date: &str) -> Option<String> {
    if url_date.len() != 8 || !url_date.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(format!(
        "{}-{}-{}",
        &url_date[..4],
        &url_date[4..6],
        &url_date[6..8]
    ))
}

/// Parse a user-supplied datetime into a millisecond timestamp.
///
/// Accepts an RFC 3339 instant (`2024-05-01T20:30:00Z`, offset included) or a
/// naive `YYYY-MM-DDTHH:MM[:SS[.fff]]` string resolved in `tz`. A naive time
/// that does not exist in `tz` (spring-forward gap) yields `None`; an
/// ambiguous one (fall-back) resolves to the earlier instant.
pub(crate) fn parse_datetime<Tz: TimeZone>(input: &str, tz: &Tz) -> Option<i64> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.timestamp_millis());
    }
    let naive = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M"))
        .ok()?;
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.timestamp_millis())
}
