//! The observation table: one row per calendar date, one nullable column per
//! POWER parameter, backed by a Polars [`DataFrame`].

use chrono::{Duration, NaiveDate};
use polars::prelude::*;
use serde::Serialize;

/// Name of the date column every non-empty table carries.
pub(crate) const DATE_COLUMN: &str = "date";

fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1970, 1, 1).unwrap()
}

/// Converts a `NaiveDate` to the days-since-epoch representation Polars uses
/// for `DataType::Date`.
pub(crate) fn date_to_days(date: NaiveDate) -> i32 {
    (date - epoch()).num_days() as i32
}

/// Inverse of [`date_to_days`].
pub(crate) fn days_to_date(days: i32) -> NaiveDate {
    epoch() + Duration::days(days as i64)
}

/// One observed value of a single parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// A dense, date-ascending series of one parameter; absent values are dropped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObservationSeries {
    /// POWER code of the projected parameter.
    pub parameter: String,
    pub points: Vec<SeriesPoint>,
}

impl ObservationSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }
}

/// One display row of the table: a date and the values of every parameter
/// column, aligned with [`ObservationTable::parameters`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObservationRow {
    pub date: NaiveDate,
    pub values: Vec<Option<f64>>,
}

/// A wrapper around a Polars `DataFrame` holding daily point observations.
///
/// Invariants (established by the parser): a `date` column of
/// `DataType::Date`, sorted ascending without duplicates, holding the union of
/// every parameter's reported dates; one nullable `f64` column per parameter,
/// null where that parameter did not report.
///
/// Instances are produced by [`crate::ObservationFetcher`] or
/// [`crate::parse_observations`].
#[derive(Debug, Clone)]
pub struct ObservationTable {
    /// The underlying Polars DataFrame.
    pub frame: DataFrame,
}

impl ObservationTable {
    /// Wraps a frame assumed to satisfy the invariants above.
    pub fn new(frame: DataFrame) -> Self {
        Self { frame }
    }

    /// A table with no rows and no columns, the "provider returned nothing"
    /// value.
    pub fn empty() -> Self {
        Self {
            frame: DataFrame::empty(),
        }
    }

    /// Number of date rows.
    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    /// Parameter column names in frame order, the date column excluded.
    pub fn parameters(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .filter(|name| name != DATE_COLUMN)
            .collect()
    }

    /// All dates in the table, ascending.
    pub fn dates(&self) -> Vec<NaiveDate> {
        let Ok(dates) = self.date_column() else {
            return Vec::new();
        };
        dates.into_iter().flatten().map(days_to_date).collect()
    }

    /// Projects one parameter down to a dense series, dropping absent values.
    ///
    /// An empty table or an unknown parameter yields an empty series; that is
    /// a normal "no data" outcome, not an error.
    pub fn series(&self, parameter: &str) -> ObservationSeries {
        let points = self
            .observed(parameter)
            .into_iter()
            .filter_map(|(date, value)| value.map(|value| SeriesPoint { date, value }))
            .collect();
        ObservationSeries {
            parameter: parameter.to_string(),
            points,
        }
    }

    /// Every table date paired with the parameter's value, absent entries
    /// preserved as `None`. Empty if the parameter is not a column.
    pub fn observed(&self, parameter: &str) -> Vec<(NaiveDate, Option<f64>)> {
        let Ok(dates) = self.date_column() else {
            return Vec::new();
        };
        let Ok(values) = self.value_column(parameter) else {
            return Vec::new();
        };
        dates
            .into_iter()
            .zip(values)
            .filter_map(|(days, value)| days.map(|days| (days_to_date(days), value)))
            .collect()
    }

    /// Display rows: per date, the values of every parameter column in
    /// [`Self::parameters`] order.
    pub fn rows(&self) -> Vec<ObservationRow> {
        let Ok(dates) = self.date_column() else {
            return Vec::new();
        };
        let columns: Vec<_> = self
            .parameters()
            .iter()
            .filter_map(|name| self.value_column(name).ok())
            .collect();
        dates
            .into_iter()
            .enumerate()
            .filter_map(|(row, days)| {
                days.map(|days| ObservationRow {
                    date: days_to_date(days),
                    values: columns.iter().map(|column| column.get(row)).collect(),
                })
            })
            .collect()
    }

    fn date_column(&self) -> PolarsResult<&DateChunked> {
        self.frame.column(DATE_COLUMN)?.date()
    }

    fn value_column(&self, parameter: &str) -> PolarsResult<&Float64Chunked> {
        self.frame.column(parameter)?.f64()
    }
}
