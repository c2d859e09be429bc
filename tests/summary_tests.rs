mod common;

use common::{event_at, local_ms, tz};
use nightcap::{daily_summaries, entries_for_day, monthly_summaries, todays_count};

#[test]
fn test_empty_history_has_no_summaries() {
    let now = local_ms(2024, 5, 2, 22, 0, 0);
    assert!(daily_summaries(&[], now, &tz()).is_empty());
    assert!(monthly_summaries(&[]).is_empty());
    assert_eq!(todays_count(&[], now, &tz()), 0);
}

#[test]
fn test_three_drinks_one_evening() {
    let events = [
        event_at(2024, 5, 2, 20, 0, 0),
        event_at(2024, 5, 2, 20, 1, 0),
        event_at(2024, 5, 2, 20, 2, 0),
    ];
    let now = local_ms(2024, 5, 2, 22, 0, 0);

    let daily = daily_summaries(&events, now, &tz());
    assert_eq!(daily.len(), 1);
    assert_eq!(daily[0].date, "2024-05-02");
    assert_eq!(daily[0].total_drinks, 3);
    assert_eq!(daily[0].entries.len(), 3);

    assert_eq!(todays_count(&events, now, &tz()), 3);
}

#[test]
fn test_early_morning_drink_lands_on_previous_day() {
    let events = [event_at(2024, 6, 1, 3, 30, 0)];
    let now = local_ms(2024, 6, 1, 12, 0, 0);

    let daily = daily_summaries(&events, now, &tz());
    assert_eq!(daily.len(), 1);
    assert_eq!(daily[0].date, "2024-05-31");

    // It was "yesterday", so it does not count toward today
    assert_eq!(todays_count(&events, now, &tz()), 0);
}

#[test]
fn test_daily_summaries_sorted_newest_first() {
    let events = [
        event_at(2024, 5, 1, 21, 0, 0),
        event_at(2024, 5, 3, 21, 0, 0),
        event_at(2024, 5, 5, 21, 0, 0),
    ];
    let now = local_ms(2024, 5, 6, 12, 0, 0);

    let dates: Vec<_> = daily_summaries(&events, now, &tz())
        .into_iter()
        .map(|d| d.date)
        .collect();
    assert_eq!(dates, ["2024-05-05", "2024-05-03", "2024-05-01"]);
}

#[test]
fn test_events_older_than_window_are_excluded() {
    let events = [
        event_at(2024, 4, 1, 21, 0, 0), // 35 days before now
        event_at(2024, 5, 4, 21, 0, 0),
    ];
    let now = local_ms(2024, 5, 6, 12, 0, 0);

    let daily = daily_summaries(&events, now, &tz());
    assert_eq!(daily.len(), 1);
    assert_eq!(daily[0].date, "2024-05-04");
}

#[test]
fn test_monthly_totals_match_daily_totals() {
    let events = [
        event_at(2024, 4, 28, 21, 0, 0),
        event_at(2024, 4, 29, 21, 0, 0),
        event_at(2024, 4, 29, 23, 0, 0),
        event_at(2024, 5, 2, 21, 0, 0),
        event_at(2024, 5, 3, 21, 0, 0),
    ];
    let now = local_ms(2024, 5, 6, 12, 0, 0);

    let daily = daily_summaries(&events, now, &tz());
    let monthly = monthly_summaries(&daily);

    assert_eq!(monthly.len(), 2);
    assert_eq!(monthly[0].month, "2024-05");
    assert_eq!(monthly[1].month, "2024-04");

    for summary in &monthly {
        let from_daily: usize = daily
            .iter()
            .filter(|d| d.date.starts_with(&summary.month))
            .map(|d| d.total_drinks)
            .sum();
        assert_eq!(summary.total_drinks, from_daily);
    }
}

// Monthly summaries aggregate the windowed daily summaries, so a month's
// total silently sheds events older than 30 days. Historical contract —
// this test pins it.
#[test]
fn test_monthly_summaries_shed_events_older_than_window() {
    let events = [
        event_at(2024, 5, 6, 21, 0, 0),  // 40 days before now: shed
        event_at(2024, 5, 20, 21, 0, 0), // 26 days before now: kept
    ];
    let now = local_ms(2024, 6, 15, 12, 0, 0);

    let monthly = monthly_summaries(&daily_summaries(&events, now, &tz()));
    assert_eq!(monthly.len(), 1);
    assert_eq!(monthly[0].month, "2024-05");
    assert_eq!(monthly[0].total_drinks, 1);
}

#[test]
fn test_entries_for_day_ignores_the_window() {
    let events = [
        event_at(2024, 1, 10, 21, 0, 0), // far outside the 30-day window
        event_at(2024, 1, 11, 2, 30, 0), // 02:30 next morning, same drink-day
        event_at(2024, 5, 4, 21, 0, 0),
    ];

    let entries = entries_for_day(&events, "2024-01-10", &tz());
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0], events[0]);
    assert_eq!(entries[1], events[1]);
}

#[test]
fn test_entries_for_day_with_bad_date_is_empty() {
    let events = [event_at(2024, 5, 4, 21, 0, 0)];
    assert!(entries_for_day(&events, "not-a-date", &tz()).is_empty());
    assert!(entries_for_day(&events, "2024-13-40", &tz()).is_empty());
}

#[test]
fn test_drinks_past_midnight_count_toward_the_same_evening() {
    let events = [
        event_at(2024, 5, 2, 23, 30, 0),
        event_at(2024, 5, 3, 0, 45, 0),
        event_at(2024, 5, 3, 3, 15, 0),
    ];
    let now = local_ms(2024, 5, 3, 12, 0, 0);

    let daily = daily_summaries(&events, now, &tz());
    assert_eq!(daily.len(), 1);
    assert_eq!(daily[0].date, "2024-05-02");
    assert_eq!(daily[0].total_drinks, 3);
}
