//! Date-plus-sequence configuration version tokens (`YYYY.M.D-N`).

use std::fmt;

use chrono::{Datelike, NaiveDate};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigVersion {
    date: String,
    sequence: u32,
}

impl ConfigVersion {
    /// Parses a token leniently.
    ///
    /// The token is split on the first `-`. A missing or non-numeric sequence
    /// counts as 0, and the date part is kept verbatim.
    pub fn parse(token: &str) -> Self {
        let token = token.trim();
        match token.split_once('-') {
            Some((date, sequence)) => Self {
                date: date.to_string(),
                sequence: sequence.trim().parse().unwrap_or(0),
            },
            None => Self {
                date: token.to_string(),
                sequence: 0,
            },
        }
    }

    /// First version of `date`.
    pub fn first_of(date: NaiveDate) -> Self {
        Self {
            date: date_stamp(date),
            sequence: 1,
        }
    }

    /// Version following `self` when rendering on `today`.
    ///
    /// Same day increments the sequence; any other day restarts it at 1.
    #[must_use]
    pub fn next(&self, today: NaiveDate) -> Self {
        let stamp = date_stamp(today);
        if self.date != stamp {
            return Self::first_of(today);
        }
        Self {
            date: stamp,
            sequence: self.sequence.saturating_add(1),
        }
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn sequence(&self) -> u32 {
        self.sequence
    }
}

impl fmt::Display for ConfigVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.date, self.sequence)
    }
}

/// Formats a date without zero padding, e.g. `2026.1.29`.
pub fn date_stamp(date: NaiveDate) -> String {
    format!("{}.{}.{}", date.year(), date.month(), date.day())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn same_day_increments_sequence() {
        let current = ConfigVersion::parse("2026.1.29-3");
        assert_eq!(current.next(day(2026, 1, 29)).to_string(), "2026.1.29-4");
    }

    #[test]
    fn other_day_resets_sequence() {
        let current = ConfigVersion::parse("2026.1.29-3");
        assert_eq!(current.next(day(2026, 1, 30)).to_string(), "2026.1.30-1");
    }

    #[test]
    fn malformed_sequence_counts_as_zero() {
        let today = day(2026, 1, 29);
        assert_eq!(
            ConfigVersion::parse("2026.1.29-x").next(today).to_string(),
            "2026.1.29-1"
        );
        assert_eq!(
            ConfigVersion::parse("2026.1.29").next(today).to_string(),
            "2026.1.29-1"
        );
        assert_eq!(ConfigVersion::parse("").next(today).to_string(), "2026.1.29-1");
    }

    #[test]
    fn date_stamp_is_not_zero_padded() {
        assert_eq!(date_stamp(day(2026, 10, 7)), "2026.10.7");
        assert_eq!(ConfigVersion::first_of(day(2026, 2, 3)).to_string(), "2026.2.3-1");
    }

    #[test]
    fn split_happens_on_first_dash() {
        let version = ConfigVersion::parse("2026.1.29-2-rc");
        assert_eq!(version.date(), "2026.1.29");
        assert_eq!(version.sequence(), 0);
    }
}
