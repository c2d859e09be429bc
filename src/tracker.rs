use crate::calendar::{self, adjusted_day, month_label};
use crate::event::DrinkEvent;
use crate::storage::StoragePort;
use crate::store::EventStore;
use crate::summary::{self, DailySummary, MonthlySummary};
use chrono::{Local, NaiveDate, TimeZone, Utc};

/// The drink-tracking engine: owns the event store, persists through a
/// [`StoragePort`], and serves the derived views.
///
/// A tracker starts **uninitialized**. Until [`load`](DrinkTracker::load) has
/// run, every mutation is rejected and nothing is written back — otherwise a
/// write racing the initial load could clobber the persisted history with an
/// empty in-memory store. Reads before `load` return safe defaults (zero
/// counts, empty vecs).
///
/// All failures cross this boundary as booleans or defaults, never as
/// errors: a broken storage backend degrades to an empty session-local
/// history with a warning in the log.
///
/// # Examples
///
/// ```
/// use nightcap::{DrinkTracker, MemoryStorage};
///
/// let mut tracker = DrinkTracker::new(MemoryStorage::new());
/// tracker.load();
///
/// assert!(tracker.increment(12));
/// assert!(tracker.increment(12));
/// assert!(tracker.decrement());
/// assert_eq!(tracker.count(), 1);
/// ```
pub struct DrinkTracker<S, Tz: TimeZone = Local> {
    storage: S,
    store: EventStore,
    tz: Tz,
    ready: bool,
}

impl<S: StoragePort> DrinkTracker<S, Local> {
    /// Create a tracker in the system's local zone. Call
    /// [`load`](DrinkTracker::load) before mutating.
    pub fn new(storage: S) -> Self {
        DrinkTracker::with_timezone(storage, Local)
    }
}

impl<S: StoragePort, Tz: TimeZone> DrinkTracker<S, Tz> {
    /// Create a tracker with an explicit zone (tests pin a
    /// [`chrono::FixedOffset`]).
    pub fn with_timezone(storage: S, tz: Tz) -> Self {
        DrinkTracker {
            storage,
            store: EventStore::new(),
            tz,
            ready: false,
        }
    }

    /// Load the persisted history and transition to ready.
    ///
    /// A storage failure (unreadable backend, malformed data) is logged and
    /// recovered with an empty history — the session still works, it just
    /// starts from zero.
    pub fn load(&mut self) {
        match self.storage.load() {
            Ok(events) => {
                log::debug!("loaded {} drink events", events.len());
                self.store = EventStore::from_events(events);
            }
            Err(err) => {
                log::warn!("loading drink history failed, starting empty: {err}");
                self.store = EventStore::new();
            }
        }
        self.ready = true;
    }

    /// Whether the initial load has completed.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Current drink count: the number of events in the store.
    pub fn count(&self) -> usize {
        self.store.len()
    }

    /// All events in timestamp order.
    pub fn events(&self) -> &[DrinkEvent] {
        self.store.events()
    }

    /// Log a drink at the current time.
    ///
    /// `_max_count` is a soft-limit hint kept for interface stability; it is
    /// deliberately not enforced, so this always succeeds once the tracker
    /// is ready.
    pub fn increment(&mut self, _max_count: usize) -> bool {
        if !self.guard_ready("increment") {
            return false;
        }
        self.store.append(DrinkEvent::now());
        self.persist();
        true
    }

    /// Remove the most recent drink. Returns `false` on an empty store.
    pub fn decrement(&mut self) -> bool {
        if !self.guard_ready("decrement") {
            return false;
        }
        match self.store.remove_last() {
            Some(_) => {
                self.persist();
                true
            }
            None => false,
        }
    }

    /// Log a missed drink at an explicit datetime.
    ///
    /// Accepts an RFC 3339 instant or a naive `YYYY-MM-DDTHH:MM[:SS]` string
    /// resolved in the tracker's zone. Returns `false` without mutating if
    /// the string is unparseable or the instant is strictly in the future;
    /// otherwise inserts the event in timestamp order.
    pub fn add_drink_at(&mut self, datetime: &str) -> bool {
        if !self.guard_ready("add_drink_at") {
            return false;
        }
        let Some(timestamp) = calendar::parse_datetime(datetime, &self.tz) else {
            return false;
        };
        if timestamp > Self::now_ms() {
            return false;
        }
        self.store.insert_sorted(DrinkEvent::at(timestamp));
        self.persist();
        true
    }

    /// Remove every drink whose drink-day equals `date` (`YYYY-MM-DD`).
    /// Returns how many events were removed. Unconditional and irreversible.
    pub fn delete_day(&mut self, date: &str) -> usize {
        if !self.guard_ready("delete_day") {
            return 0;
        }
        let Ok(target) = NaiveDate::parse_from_str(date, "%Y-%m-%d") else {
            return 0;
        };
        let tz = &self.tz;
        let removed = self
            .store
            .remove_where(|e| adjusted_day(e.timestamp, tz) == Some(target));
        if removed > 0 {
            self.persist();
        }
        removed
    }

    /// Remove every drink whose drink-day falls in `month` (`YYYY-MM`).
    /// Returns how many events were removed.
    pub fn delete_month(&mut self, month: &str) -> usize {
        if !self.guard_ready("delete_month") {
            return 0;
        }
        let tz = &self.tz;
        let removed = self.store.remove_where(|e| {
            adjusted_day(e.timestamp, tz).is_some_and(|day| month_label(day) == month)
        });
        if removed > 0 {
            self.persist();
        }
        removed
    }

    /// Daily totals for the trailing 30 days, newest first.
    pub fn daily_summaries(&self) -> Vec<DailySummary> {
        summary::daily_summaries(self.store.events(), Self::now_ms(), &self.tz)
    }

    /// Monthly totals aggregated over [`daily_summaries`](Self::daily_summaries),
    /// newest first (and therefore sharing its 30-day window).
    pub fn monthly_summaries(&self) -> Vec<MonthlySummary> {
        summary::monthly_summaries(&self.daily_summaries())
    }

    /// Drinks logged in the current drink-day.
    pub fn todays_count(&self) -> usize {
        summary::todays_count(self.store.events(), Self::now_ms(), &self.tz)
    }

    /// Full-history lookup of the events on one drink-day.
    pub fn entries_for_date(&self, date: &str) -> Vec<DrinkEvent> {
        summary::entries_for_day(self.store.events(), date, &self.tz)
    }

    fn now_ms() -> i64 {
        Utc::now().timestamp_millis()
    }

    fn guard_ready(&self, op: &str) -> bool {
        if !self.ready {
            log::warn!("{op} rejected: history not loaded yet");
        }
        self.ready
    }

    /// Write the full store through the port. A failed save is logged and
    /// dropped — the in-memory state stays authoritative for the session.
    fn persist(&mut self) {
        match self.storage.save(self.store.events()) {
            Ok(()) => log::debug!("persisted {} drink events", self.store.len()),
            Err(err) => {
                log::warn!("saving drink history failed, keeping in-memory state: {err}");
            }
        }
    }
}
