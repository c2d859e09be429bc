mod calendar;
mod event;
mod storage;
mod store;
mod summary;
mod tracker;

pub use calendar::{DAY_ROLLOVER_HOUR, adjusted_day, date_for_url, day_label, parse_url_date};
pub use event::DrinkEvent;
pub use storage::{JsonFileStorage, MemoryStorage, StorageError, StoragePort};
pub use store::EventStore;
pub use summary::{
    DailySummary, MonthlySummary, SUMMARY_WINDOW_DAYS, daily_summaries, entries_for_day,
    monthly_summaries, todays_count,
};
pub use tracker::DrinkTracker;
