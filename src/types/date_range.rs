//! Inclusive calendar date ranges as exchanged with the NASA POWER API.
//!
//! POWER encodes both range bounds as 8-digit `YYYYMMDD` strings; internally a
//! range is a pair of [`NaiveDate`]s with `start <= end` enforced at
//! construction.

use chrono::{Datelike, NaiveDate, Utc};
use thiserror::Error;

/// Date format used by the POWER daily point API for `start` and `end`.
const POWER_DATE_FORMAT: &str = "%Y%m%d";

#[derive(Debug, Error)]
pub enum DateRangeError {
    #[error("Failed to parse '{value}' as a YYYYMMDD date")]
    Parse {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Date range start {start} is after end {end}")]
    StartAfterEnd { start: NaiveDate, end: NaiveDate },
}

/// An inclusive range of calendar dates.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use powercast::DateRange;
///
/// let start = NaiveDate::from_ymd_opt(2023, 8, 25).unwrap();
/// let end = NaiveDate::from_ymd_opt(2025, 8, 25).unwrap();
/// let range = DateRange::new(start, end).unwrap();
/// assert_eq!(range.as_power_start(), "20230825");
/// assert_eq!(range.as_power_end(), "20250825");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Creates a range from two inclusive bounds.
    ///
    /// # Errors
    ///
    /// Returns [`DateRangeError::StartAfterEnd`] if `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateRangeError> {
        if start > end {
            return Err(DateRangeError::StartAfterEnd { start, end });
        }
        Ok(Self { start, end })
    }

    /// Parses a range from the POWER `YYYYMMDD` wire form.
    ///
    /// # Errors
    ///
    /// Returns [`DateRangeError::Parse`] for a bound that is not an 8-digit
    /// date, or [`DateRangeError::StartAfterEnd`] for an inverted range.
    pub fn from_power(start: &str, end: &str) -> Result<Self, DateRangeError> {
        let parse = |value: &str| {
            NaiveDate::parse_from_str(value, POWER_DATE_FORMAT).map_err(|source| {
                DateRangeError::Parse {
                    value: value.to_string(),
                    source,
                }
            })
        };
        Self::new(parse(start)?, parse(end)?)
    }

    /// The default observation window: today and `years` years back.
    ///
    /// A Feb 29 start that lands in a non-leap year is clamped to Feb 28.
    pub fn last_years(years: i32) -> Self {
        let today = Utc::now().date_naive();
        let start_year = today.year() - years;
        let start = today
            .with_year(start_year)
            .or_else(|| NaiveDate::from_ymd_opt(start_year, 2, 28))
            .unwrap_or(today);
        Self {
            start: start.min(today),
            end: today,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of calendar days covered, counting both bounds.
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    pub fn as_power_start(&self) -> String {
        self.start.format(POWER_DATE_FORMAT).to_string()
    }

    pub fn as_power_end(&self) -> String {
        self.end.format(POWER_DATE_FORMAT).to_string()
    }
}
