//! Month-grid arithmetic. Months are zero-based throughout (0 = January).

use chrono::{Datelike, NaiveDate};

const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

/// The (year, month) pair currently shown in the grid. `month0` is always
/// in `0..12`; every constructor normalizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DisplayMonth {
    year: i32,
    month0: u32,
}

impl DisplayMonth {
    /// Builds a display month, carrying any `month0` past December into
    /// the following years.
    pub fn new(year: i32, month0: u32) -> Self {
        navigate_month(Self { year, month0: 0 }, month0.min(i32::MAX as u32) as i32)
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self { year: date.year(), month0: date.month0() }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month0(&self) -> u32 {
        self.month0
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        self.day(1)
    }

    pub fn day(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month0.checked_add(1)?, day)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        Self::containing(date) == *self
    }

    pub fn title(&self) -> String {
        format!("{} {}", MONTH_NAMES[self.month0 as usize % 12], self.year)
    }

    /// Signed number of months from `self` to `other`.
    pub fn months_until(&self, other: DisplayMonth) -> i64 {
        month_index(other) - month_index(*self)
    }
}

fn month_index(month: DisplayMonth) -> i64 {
    i64::from(month.year) * 12 + i64::from(month.month0)
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in the month: the day before the first of the next month.
pub fn days_in_month(year: i32, month0: u32) -> u32 {
    let target = DisplayMonth::new(year, month0);
    navigate_month(target, 1)
        .first_day()
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or_else(|| match target.month0 {
            1 if is_leap_year(target.year) => 29,
            1 => 28,
            3 | 5 | 8 | 10 => 30,
            _ => 31,
        })
}

/// Weekday of the first of the month, 0 = Sunday.
///
/// Years outside chrono's representable range report Sunday.
pub fn first_weekday_of_month(year: i32, month0: u32) -> u32 {
    DisplayMonth::new(year, month0)
        .first_day()
        .map(|first| first.weekday().num_days_from_sunday())
        .unwrap_or(0)
}

/// Steps `delta` months from `current`, rolling the year at the edges.
pub fn navigate_month(current: DisplayMonth, delta: i32) -> DisplayMonth {
    let index = month_index(current) + i64::from(delta);
    DisplayMonth {
        year: index.div_euclid(12) as i32,
        month0: index.rem_euclid(12) as u32,
    }
}
