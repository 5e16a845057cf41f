use chrono::NaiveDate;

use crate::app::AppState;
use crate::calendar::{days_in_month, first_weekday_of_month, DateKey, DisplayMonth};

pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

#[derive(Debug, Clone, PartialEq)]
pub struct MonthLayout {
    pub month: DisplayMonth,
    pub weeks: Vec<Week>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Week {
    pub days: Vec<DayCell>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayCell {
    pub date: Option<NaiveDate>,
    pub key: Option<DateKey>,
    pub event_count: usize,
    pub is_selected: bool,
    pub is_today: bool,
}

impl DayCell {
    pub fn empty() -> Self {
        Self {
            date: None,
            key: None,
            event_count: 0,
            is_selected: false,
            is_today: false,
        }
    }

    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            date: Some(date),
            key: Some(DateKey::from_date(date)),
            ..Self::empty()
        }
    }

    pub fn with_selected(mut self, selected: bool) -> Self {
        self.is_selected = selected;
        self
    }

    pub fn with_today(mut self, today: bool) -> Self {
        self.is_today = today;
        self
    }

    pub fn with_event_count(mut self, count: usize) -> Self {
        self.event_count = count;
        self
    }

    pub fn has_events(&self) -> bool {
        self.event_count > 0
    }
}

/// Sunday-first grid for the displayed month: blank cells before the 1st,
/// one cell per day, blanks padding the final week.
pub fn calculate_layout(state: &AppState) -> MonthLayout {
    let month = state.display_month;
    let leading = first_weekday_of_month(month.year(), month.month0()) as usize;
    let day_count = days_in_month(month.year(), month.month0());

    let mut cells: Vec<DayCell> = (0..leading).map(|_| DayCell::empty()).collect();

    for day in 1..=day_count {
        let Some(date) = month.day(day) else { continue };
        let event_count = state.events_for_date(date).len();
        cells.push(
            DayCell::for_date(date)
                .with_selected(date == state.selected_date)
                .with_today(date == state.today)
                .with_event_count(event_count),
        );
    }

    while cells.len() % 7 != 0 {
        cells.push(DayCell::empty());
    }

    let weeks = cells
        .chunks(7)
        .map(|days| Week { days: days.to_vec() })
        .collect();

    MonthLayout { month, weeks }
}
