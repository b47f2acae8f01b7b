//! Month calendar grid and per-day completion aggregation.

mod month;

pub use month::{weekday_labels, CalendarMonth, CalendarView};
