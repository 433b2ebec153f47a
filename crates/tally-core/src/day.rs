//! Calendar-day keys.
//!
//! Habit statistics are keyed by local calendar day, never by time of day.
//! [`DayKey`] wraps a [`NaiveDate`] and fixes the textual encoding to
//! `YYYY-MM-DD`, which sorts lexically in date order.

use std::fmt;
use std::str::FromStr;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Error type for day-key parsing failures.
#[derive(Debug, thiserror::Error)]
#[error("invalid day {input:?} (expected YYYY-MM-DD)")]
pub struct DayKeyError {
    /// The string that failed to parse.
    pub input: String,
}

/// A calendar day in the fixed `YYYY-MM-DD` encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayKey(NaiveDate);

impl DayKey {
    /// The fixed textual encoding.
    pub const FORMAT: &'static str = "%Y-%m-%d";

    /// Wraps a calendar date.
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// The caller's current local calendar day.
    pub fn today_local() -> Self {
        Self(Local::now().date_naive())
    }

    /// Parses a `YYYY-MM-DD` string.
    pub fn parse(s: &str) -> Result<Self, DayKeyError> {
        NaiveDate::parse_from_str(s, Self::FORMAT)
            .map(Self)
            .map_err(|_| DayKeyError {
                input: s.to_string(),
            })
    }

    /// The previous calendar day. Saturates at the calendar edge.
    pub fn pred(self) -> Self {
        Self(self.0.pred_opt().unwrap_or(NaiveDate::MIN))
    }

    /// The next calendar day. Saturates at the calendar edge.
    pub fn succ(self) -> Self {
        Self(self.0.succ_opt().unwrap_or(NaiveDate::MAX))
    }

    /// The `len` days ending at `self` (inclusive), oldest first.
    pub fn trailing_window(self, len: u32) -> Vec<DayKey> {
        let mut days = Vec::with_capacity(len as usize);
        let mut cursor = self;
        for _ in 0..len {
            days.push(cursor);
            cursor = cursor.pred();
        }
        days.reverse();
        days
    }

    /// The underlying calendar date.
    pub fn date(self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

impl FromStr for DayKey {
    type Err = DayKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<NaiveDate> for DayKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl Serialize for DayKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DayKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
