use crate::event::DrinkEvent;

/// The single source of truth: an ordered sequence of drink events.
///
/// Pure appends preserve insertion order (timestamps from a single session
/// are non-decreasing); a backdated insert re-sorts the whole sequence, so
/// the store is always non-decreasing in timestamp. The current drink count
/// is defined as [`len`](EventStore::len) — there is no cached tally to
/// drift out of sync.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventStore {
    events: Vec<DrinkEvent>,
}

impl EventStore {
    /// Create an empty store.
    pub fn new() -> Self {
        EventStore::default()
    }

    /// Build a store from loaded events, sorting defensively in case the
    /// persisted file was written out of order by an older revision.
    pub fn from_events(mut events: Vec<DrinkEvent>) -> Self {
        events.sort_by_key(|e| e.timestamp);
        EventStore { events }
    }

    /// All events in timestamp order.
    pub fn events(&self) -> &[DrinkEvent] {
        &self.events
    }

    /// Number of events — by definition, the current drink count.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Append an event at the end (increment path).
    pub fn append(&mut self, event: DrinkEvent) {
        self.events.push(event);
    }

    /// Remove and return the most recent event, or `None` if the store is
    /// empty (decrement path).
    pub fn remove_last(&mut self) -> Option<DrinkEvent> {
        self.events.pop()
    }

    /// Insert a backdated event and restore timestamp order (stable sort,
    /// so same-timestamp events keep their insertion order).
    pub fn insert_sorted(&mut self, event: DrinkEvent) {
        self.events.push(event);
        self.events.sort_by_key(|e| e.timestamp);
    }

    /// Remove every event matching the predicate, returning how many were
    /// removed (delete-by-day / delete-by-month paths).
    pub fn remove_where<F>(&mut self, mut pred: F) -> usize
    where
        F: FnMut(&DrinkEvent) -> bool,
    {
        let before = self.events.len();
        self.events.retain(|e| !pred(e));
        before - self.events.len()
    }
}
