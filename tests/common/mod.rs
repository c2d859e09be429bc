#![allow(dead_code)]

use chrono::{FixedOffset, TimeZone};
use nightcap::{DrinkEvent, DrinkTracker, MemoryStorage};

/// Fixed UTC+2 zone so calendar math is deterministic regardless of the
/// host's timezone.
pub fn tz() -> FixedOffset {
    FixedOffset::east_opt(2 * 3600).unwrap()
}

/// Millisecond timestamp for a wall-clock moment in the test zone.
pub fn local_ms(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> i64 {
    tz().with_ymd_and_hms(y, mo, d, h, mi, s)
        .unwrap()
        .timestamp_millis()
}

/// Event at a wall-clock moment in the test zone.
pub fn event_at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DrinkEvent {
    DrinkEvent::at(local_ms(y, mo, d, h, mi, s))
}

/// A ready tracker over empty in-memory storage, pinned to the test zone.
pub fn ready_tracker() -> DrinkTracker<MemoryStorage, FixedOffset> {
    let mut tracker = DrinkTracker::with_timezone(MemoryStorage::new(), tz());
    tracker.load();
    tracker
}
