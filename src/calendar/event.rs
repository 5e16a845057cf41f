use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calendar::DateKey;

pub const DEFAULT_EVENT_TIME: &str = "12:00";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: u64,
    pub title: String,
    pub time: String,
    pub description: String,
    pub date: DateTime<Utc>,
}

impl Event {
    pub fn date_key(&self) -> DateKey {
        DateKey::from_timestamp(&self.date)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Title is required")]
    MissingTitle,
    #[error("Invalid time '{0}'. Use HH:MM (24-hour).")]
    InvalidTime(String),
}

/// Fields captured by the event form, before an id and date are attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    pub title: String,
    pub time: String,
    pub description: String,
}

impl EventDraft {
    pub fn new(title: impl Into<String>, time: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            time: time.into(),
            description: description.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingTitle);
        }
        if !is_valid_time(&self.time) {
            return Err(ValidationError::InvalidTime(self.time.clone()));
        }
        Ok(())
    }

    /// Attaches `id` and anchors the event to `date` at midnight UTC, so the
    /// event's own date key always equals `DateKey::from_date(date)`.
    pub fn into_event(self, id: u64, date: NaiveDate) -> Event {
        Event {
            id,
            title: self.title.trim().to_string(),
            time: self.time,
            description: self.description,
            date: date.and_time(chrono::NaiveTime::MIN).and_utc(),
        }
    }
}

pub fn is_valid_time(input: &str) -> bool {
    static TIME_RE: OnceLock<Regex> = OnceLock::new();
    let pattern = TIME_RE.get_or_init(|| {
        Regex::new(r"^([01]\d|2[0-3]):[0-5]\d$").expect("invalid time regex")
    });
    pattern.is_match(input)
}

/// Hands out time-derived ids that never repeat or go backwards.
#[derive(Debug, Clone, Default)]
pub struct EventIdSource {
    last: u64,
}

impl EventIdSource {
    /// Starts above `floor`, typically the largest id already stored.
    pub fn starting_after(floor: u64) -> Self {
        Self { last: floor }
    }

    /// Returns `None` once `u64::MAX` has been handed out.
    pub fn next_id(&mut self) -> Option<u64> {
        let now = Utc::now().timestamp_millis().max(0) as u64;
        self.last = now.max(self.last.checked_add(1)?);
        Some(self.last)
    }
}
