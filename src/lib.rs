pub mod calendar;
pub mod input;
pub mod ui;
pub mod storage;
pub mod app;

pub use calendar::{DateKey, DisplayMonth, Event, EventDraft};
pub use app::{AppCommand, AppState, Mode};
pub use storage::{EventStore, KeyValueStore};
