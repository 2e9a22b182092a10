//! Chart-ready records combining history and forecast for one parameter.

use chrono::NaiveDate;
use serde::Serialize;

/// One date of the merged history/forecast sequence.
///
/// A history-only date has `center`/`lower`/`upper` as `None`; a future-only
/// date has `observed` as `None`; a date inside the fitted span carries both.
/// `observed` may also be `None` for a table date where the parameter did not
/// report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MergedRecord {
    pub date: NaiveDate,
    pub observed: Option<f64>,
    pub center: Option<f64>,
    pub lower: Option<f64>,
    pub upper: Option<f64>,
}

impl MergedRecord {
    pub(crate) fn history_only(date: NaiveDate, observed: Option<f64>) -> Self {
        Self {
            date,
            observed,
            center: None,
            lower: None,
            upper: None,
        }
    }
}
