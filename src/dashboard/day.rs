//! Calendar-day keys and day matching

use std::fmt;

use chrono::{Days, Local, NaiveDate, Utc};

use crate::error::{Error, Result};
use crate::resources::{Meal, Notification, StepRecord, Workout};

/// A calendar day in `YYYY-MM-DD` form.
///
/// A record falls on a day when the first 10 characters of its timestamp
/// equal the key exactly; no timezone conversion is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DayKey {
    date: NaiveDate,
    key: String,
}

impl DayKey {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            date,
            key: date.format("%Y-%m-%d").to_string(),
        }
    }

    /// Parse a `YYYY-MM-DD` string
    pub fn parse(input: &str) -> Result<Self> {
        NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
            .map(Self::from_date)
            .map_err(|_| Error::validation("date", format!("{:?} is not a YYYY-MM-DD date", input)))
    }

    /// Today on the device's local clock
    pub fn today() -> Self {
        Self::from_date(Local::now().date_naive())
    }

    /// Today in UTC
    pub fn today_utc() -> Self {
        Self::from_date(Utc::now().date_naive())
    }

    pub fn as_str(&self) -> &str {
        &self.key
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// The day `n` days earlier
    pub fn days_before(&self, n: u64) -> Self {
        let date = self.date.checked_sub_days(Days::new(n)).unwrap_or(NaiveDate::MIN);
        Self::from_date(date)
    }

    /// Whether a timestamp's date portion is this day
    pub fn matches(&self, timestamp: &str) -> bool {
        date_part(timestamp) == Some(self.as_str())
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

/// The first 10 characters of a timestamp, if it has that many
pub fn date_part(timestamp: &str) -> Option<&str> {
    timestamp.get(..10)
}

/// Records carrying the timestamp used for day matching
pub trait Timestamped {
    fn timestamp(&self) -> Option<&str>;

    fn falls_on(&self, day: &DayKey) -> bool {
        self.timestamp().is_some_and(|t| day.matches(t))
    }
}

impl Timestamped for Meal {
    fn timestamp(&self) -> Option<&str> {
        self.created_at.as_deref()
    }
}

impl Timestamped for Workout {
    fn timestamp(&self) -> Option<&str> {
        self.date.as_deref().or(self.created_at.as_deref())
    }
}

impl Timestamped for StepRecord {
    fn timestamp(&self) -> Option<&str> {
        self.recorded_at.as_deref()
    }
}

impl Timestamped for Notification {
    fn timestamp(&self) -> Option<&str> {
        self.created_at.as_deref()
    }
}

/// The records that fall on `day`
pub fn on_day<'a, T: Timestamped>(
    records: &'a [T],
    day: &'a DayKey,
) -> impl Iterator<Item = &'a T> + 'a {
    records.iter().filter(move |r| r.falls_on(day))
}
