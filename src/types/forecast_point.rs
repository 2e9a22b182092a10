//! Forecast output records.

use chrono::NaiveDate;
use serde::Serialize;

/// One forecast day: central estimate plus uncertainty bounds.
///
/// `lower <= center <= upper` holds by construction; the interval is built
/// from a non-negative half-width around the center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub center: f64,
    pub lower: f64,
    pub upper: f64,
}

impl ForecastPoint {
    /// Builds a point from a center and an interval half-width. A negative
    /// half-width is treated as zero so the bound ordering cannot be violated.
    pub fn with_interval(date: NaiveDate, center: f64, half_width: f64) -> Self {
        let half_width = half_width.max(0.0);
        Self {
            date,
            center,
            lower: center - half_width,
            upper: center + half_width,
        }
    }
}
