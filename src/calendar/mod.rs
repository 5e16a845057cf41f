pub mod date_key;
pub mod event;
pub mod grid;

pub use date_key::DateKey;
pub use event::{Event, EventDraft, EventIdSource, ValidationError, DEFAULT_EVENT_TIME};
pub use grid::{DisplayMonth, days_in_month, first_weekday_of_month, navigate_month};
