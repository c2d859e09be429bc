use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A single logged drink.
///
/// The timestamp (milliseconds since the Unix epoch, UTC) is the event's only
/// attribute — one event is exactly one drink, and every count in the crate is
/// derived by counting events. Events are immutable once created; corrections
/// happen by inserting or removing events, never by editing one in place.
///
/// Earlier persisted revisions carried a redundant running `count` per entry.
/// That field is ignored on deserialization and never written back, so old
/// files normalize to the canonical `{"timestamp": <ms>}` shape on the next
/// save.
///
/// # Examples
///
/// ```
/// use nightcap::DrinkEvent;
///
/// let event = DrinkEvent::at(1_714_650_000_000);
/// assert_eq!(event.timestamp, 1_714_650_000_000);
///
/// // Stamped with the current time
/// let event = DrinkEvent::now();
/// assert!(event.timestamp > 0);
///
/// // Legacy entries with a `count` field still decode
/// let event: DrinkEvent =
///     serde_json::from_str(r#"{"timestamp": 1000, "count": 3}"#).unwrap();
/// assert_eq!(event.timestamp, 1000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DrinkEvent {
    /// Milliseconds since the Unix epoch, UTC.
    pub timestamp: i64,
}

impl DrinkEvent {
    /// Create an event stamped with the current time.
    pub fn now() -> Self {
        DrinkEvent {
            timestamp: Utc::now().timestamp_millis(),
        }
    }

    /// Create an event at an explicit millisecond timestamp (backdated entry).
    pub fn at(timestamp: i64) -> Self {
        DrinkEvent { timestamp }
    }
}
