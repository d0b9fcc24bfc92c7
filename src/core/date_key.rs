//! Conversion between wire dates (`YYYY-MM-DD`) and chart date keys (`DD.MM.YY`).
//!
//! Date keys carry a two-digit year. Every calendar value reconstructed from a
//! key is placed in the 2000s: `01.06.99` is 1 June 2099, never 1999.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ChartError, ChartResult};

const CENTURY_BASE: i32 = 2000;

/// Canonical `DD.MM.YY` day label used as the join key between series and index.
///
/// Ordering is calendar ordering of the reconstructed 2000s date.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DateKey {
    label: String,
    date: NaiveDate,
}

impl DateKey {
    /// Parses an already formatted `DD.MM.YY` label.
    pub fn parse(label: &str) -> ChartResult<Self> {
        let bytes = label.as_bytes();
        if bytes.len() != 8 || !matches_layout(bytes, &[2, 5], b'.') {
            return Err(ChartError::date_key(label));
        }

        let day = parse_digits(&label[0..2]);
        let month = parse_digits(&label[3..5]);
        let year = parse_digits(&label[6..8]);
        Self::from_parts(day, month, year).ok_or_else(|| ChartError::date_key(label))
    }

    fn from_parts(day: u32, month: u32, two_digit_year: u32) -> Option<Self> {
        let date = NaiveDate::from_ymd_opt(CENTURY_BASE + two_digit_year as i32, month, day)?;
        Some(Self {
            label: format!("{day:02}.{month:02}.{two_digit_year:02}"),
            date,
        })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.label
    }

    /// Calendar value of this key, assuming the 2000s.
    #[must_use]
    pub fn to_comparable(&self) -> NaiveDate {
        self.date
    }
}

impl Ord for DateKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.date
            .cmp(&other.date)
            .then_with(|| self.label.cmp(&other.label))
    }
}

impl PartialOrd for DateKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

impl AsRef<str> for DateKey {
    fn as_ref(&self) -> &str {
        &self.label
    }
}

impl FromStr for DateKey {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.label)
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Self::parse(&label).map_err(serde::de::Error::custom)
    }
}

/// Converts a wire `YYYY-MM-DD` date into its display key.
pub fn to_display_key(iso_date: &str) -> ChartResult<DateKey> {
    let bytes = iso_date.as_bytes();
    if bytes.len() != 10 || !matches_layout(bytes, &[4, 7], b'-') {
        return Err(ChartError::iso_date(iso_date));
    }

    let year = parse_digits(&iso_date[0..4]) as i32;
    let month = parse_digits(&iso_date[5..7]);
    let day = parse_digits(&iso_date[8..10]);
    let date =
        NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| ChartError::iso_date(iso_date))?;
    Ok(key_for_date(date))
}

/// Reverses [`to_display_key`] up to the century, which is always the 2000s.
#[must_use]
pub fn to_comparable(key: &DateKey) -> NaiveDate {
    key.to_comparable()
}

/// Key for an arbitrary calendar date.
#[must_use]
pub fn key_for_date(date: NaiveDate) -> DateKey {
    let two_digit_year = date.year().rem_euclid(100) as u32;
    // 29.02 of any leap year is also valid in the matching 2000s year.
    DateKey::from_parts(date.day(), date.month(), two_digit_year).unwrap_or_else(|| DateKey {
        label: format!(
            "{:02}.{:02}.{two_digit_year:02}",
            date.day(),
            date.month()
        ),
        date,
    })
}

/// Key of the current local date, used to mark "today" on the chart.
#[must_use]
pub fn today_key() -> DateKey {
    key_for_date(Local::now().date_naive())
}

fn matches_layout(bytes: &[u8], separator_positions: &[usize], separator: u8) -> bool {
    bytes.iter().enumerate().all(|(index, byte)| {
        if separator_positions.contains(&index) {
            *byte == separator
        } else {
            byte.is_ascii_digit()
        }
    })
}

// Callers validate the layout first, so every byte is an ASCII digit.
fn parse_digits(digits: &str) -> u32 {
    digits
        .bytes()
        .fold(0, |acc, byte| acc * 10 + u32::from(byte - b'0'))
}
