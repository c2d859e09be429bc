//! Derived views over the event store.
//!
//! Every function here is a pure fold over `(&[DrinkEvent], now, zone)` —
//! summaries are recomputed from raw events on each call and never persisted.
//! Recomputing trades O(n) reads for the guarantee that a cached tally can
//! never drift from the log; per-user event volume is small enough that the
//! trade is free in practice.

use crate::calendar::{adjusted_day, day_label};
use crate::event::DrinkEvent;
use chrono::{NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Trailing window covered by [`daily_summaries`] (and therefore by
/// [`monthly_summaries`]).
pub const SUMMARY_WINDOW_DAYS: i64 = 30;

const MS_PER_DAY: i64 = 86_400_000;

/// One drink-day's total, with the contributing events for detail views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    /// Drink-day label, `YYYY-MM-DD` under the 4 a.m. boundary rule.
    pub date: String,
    pub total_drinks: usize,
    /// Events belonging to this drink-day, in timestamp order.
    pub entries: Vec<DrinkEvent>,
}

/// One month's total, aggregated over the windowed daily summaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    /// `YYYY-MM`.
    pub month: String,
    pub total_drinks: usize,
}

/// Group the last 30 days of events by drink-day.
///
/// Events are windowed on their raw timestamp (`>= now − 30d`); days with no
/// events simply don't appear, so every summary has `total_drinks > 0`.
/// Sorted descending by date (newest first). Events with unrepresentable
/// timestamps are skipped.
pub fn daily_summaries<Tz: TimeZone>(
    events: &[DrinkEvent],
    now_ms: i64,
    tz: &Tz,
) -> Vec<DailySummary> {
    let cutoff = now_ms - SUMMARY_WINDOW_DAYS * MS_PER_DAY;
    let mut days: BTreeMap<NaiveDate, Vec<DrinkEvent>> = BTreeMap::new();

    for event in events {
        if event.timestamp < cutoff {
            continue;
        }
        let Some(day) = adjusted_day(event.timestamp, tz) else {
            continue;
        };
        days.entry(day).or_default().push(*event);
    }

    days.into_iter()
        .rev()
        .map(|(day, entries)| DailySummary {
            date: day_label(day),
            total_drinks: entries.len(),
            entries,
        })
        .collect()
}

/// Group daily summaries by their `YYYY-MM` prefix, newest month first.
///
/// Months aggregate the *windowed* daily summaries, so a month's total only
/// reflects its days inside the trailing 30-day window — older events shed
/// silently. That is the historical contract, kept rather than fixed;
/// `tests/summary_tests.rs` pins it.
pub fn monthly_summaries(daily: &[DailySummary]) -> Vec<MonthlySummary> {
    let mut months: BTreeMap<String, usize> = BTreeMap::new();

    for day in daily {
        let month = day.date.get(..7).unwrap_or(&day.date).to_string();
        *months.entry(month).or_insert(0) += day.total_drinks;
    }

    months
        .into_iter()
        .rev()
        .map(|(month, total_drinks)| MonthlySummary {
            month,
            total_drinks,
        })
        .collect()
}

/// Total for the drink-day containing `now`, 0 if no drinks yet today.
pub fn todays_count<Tz: TimeZone>(events: &[DrinkEvent], now_ms: i64, tz: &Tz) -> usize {
    let Some(today) = adjusted_day(now_ms, tz) else {
        return 0;
    };
    let label = day_label(today);
    daily_summaries(events, now_ms, tz)
        .into_iter()
        .find(|day| day.date == label)
        .map(|day| day.total_drinks)
        .unwrap_or(0)
}

/// All events whose drink-day equals `date` (`YYYY-MM-DD`), in timestamp
/// order.
///
/// Unlike the summaries this searches the full history — detail views can
/// reach days older than the 30-day window. An unparseable `date` yields an
/// empty vec.
pub fn entries_for_day<Tz: TimeZone>(events: &[DrinkEvent], date: &str, tz: &Tz) -> Vec<DrinkEvent> {
    let Ok(target) = NaiveDate::parse_from_str(date, "%Y-%m-%d") else {
        return Vec::new();
    };
    events
        .iter()
        .copied()
        .filter(|e| adjusted_day(e.timestamp, tz) == Some(target))
        .collect()
}
