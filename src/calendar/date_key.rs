use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

const KEY_FORMAT: &str = "%Y-%m-%d";

/// Canonical `YYYY-MM-DD` key joining grid cells to stored events.
///
/// Keys read back from a snapshot are taken verbatim, so a key is not
/// guaranteed to parse as a date.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateKey(String);

impl DateKey {
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.format(KEY_FORMAT).to_string())
    }

    /// Truncates a timestamp to its UTC calendar date.
    pub fn from_timestamp(timestamp: &DateTime<Utc>) -> Self {
        Self::from_date(timestamp.date_naive())
    }

    pub fn parse(input: &str) -> Option<Self> {
        NaiveDate::parse_from_str(input, KEY_FORMAT)
            .ok()
            .map(Self::from_date)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        Self::from_date(date)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};

    #[test]
    fn key_is_zero_padded() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(DateKey::from_date(date).as_str(), "2024-03-05");
    }

    #[test]
    fn time_of_day_does_not_change_key() {
        let morning = Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap();
        let night = Utc.with_ymd_and_hms(2024, 3, 15, 23, 59, 59).unwrap();

        assert_eq!(DateKey::from_timestamp(&morning), DateKey::from_timestamp(&night));
    }

    #[test]
    fn offset_timestamps_truncate_in_utc() {
        let offset = FixedOffset::east_opt(5 * 3600).unwrap();
        let local = offset.with_ymd_and_hms(2024, 3, 16, 2, 0, 0).unwrap();

        let key = DateKey::from_timestamp(&local.with_timezone(&Utc));

        assert_eq!(key.as_str(), "2024-03-15");
    }

    #[test]
    fn parse_accepts_only_real_dates() {
        assert_eq!(DateKey::parse("2024-01-07").map(|k| k.to_string()), Some("2024-01-07".to_string()));
        assert_eq!(DateKey::parse("2024-02-30"), None);
        assert_eq!(DateKey::parse("tomorrow"), None);
    }

    #[test]
    fn serializes_as_plain_string() {
        let key = DateKey::parse("2024-03-15").unwrap();
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"2024-03-15\"");
    }
}
