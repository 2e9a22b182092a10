//! Forecast generation over an observation series.
//!
//! The engine gates on a minimum sample size, fits the additive model, and
//! emits one [`ForecastPoint`] per calendar day over the whole historical span
//! plus the requested horizon, so the output always covers history and future
//! together.

use crate::forecast::error::ForecastError;
use crate::forecast::model::AdditiveModel;
use crate::types::forecast_point::ForecastPoint;
use crate::types::observation_table::ObservationSeries;
use chrono::NaiveDate;

/// Minimum number of series points required before a model is fitted.
pub const MIN_FIT_POINTS: usize = 20;

/// Interval width multiplier (roughly a 95% band around the center).
const INTERVAL_Z: f64 = 1.96;

/// Forecast horizon and seasonal component switches.
#[derive(Debug, Clone)]
pub struct ForecastOptions {
    /// Future calendar days beyond the last observation. Default 30.
    pub horizon_days: u32,
    pub daily_seasonality: bool,
    pub weekly_seasonality: bool,
    pub yearly_seasonality: bool,
}

impl Default for ForecastOptions {
    fn default() -> Self {
        Self {
            horizon_days: 30,
            daily_seasonality: true,
            weekly_seasonality: true,
            yearly_seasonality: true,
        }
    }
}

/// Fits the additive model and predicts one point per day over
/// `[first observed date, last observed date + horizon]`, gap-free.
///
/// A series with fewer than [`MIN_FIT_POINTS`] points yields `Ok(empty)` —
/// a normal "insufficient data" outcome the caller must distinguish from a
/// failed fit.
///
/// # Errors
///
/// Returns [`ForecastError::ModelFit`] when the model cannot be fitted to the
/// supplied series.
pub fn forecast_series(
    series: &ObservationSeries,
    options: &ForecastOptions,
) -> Result<Vec<ForecastPoint>, ForecastError> {
    if series.len() < MIN_FIT_POINTS {
        return Ok(Vec::new());
    }

    let mut usable: Vec<(NaiveDate, f64)> = series
        .points
        .iter()
        .filter(|point| point.value.is_finite())
        .map(|point| (point.date, point.value))
        .collect();
    usable.sort_by_key(|(date, _)| *date);
    let Some(&(first, _)) = usable.first() else {
        return Ok(Vec::new());
    };
    let (last, _) = usable[usable.len() - 1];

    let times: Vec<f64> = usable
        .iter()
        .map(|(date, _)| (*date - first).num_days() as f64)
        .collect();
    let values: Vec<f64> = usable.iter().map(|(_, value)| *value).collect();
    let model = AdditiveModel::fit(&times, &values, options)?;

    let history_days = (last - first).num_days();
    let history_span = history_days.max(1) as f64;
    let total_days = (history_days + i64::from(options.horizon_days) + 1) as usize;

    let mut points = Vec::with_capacity(total_days);
    for (offset, date) in first.iter_days().take(total_days).enumerate() {
        let t = offset as f64;
        // Intervals widen monotonically past the last observation.
        let widen = if t > history_days as f64 {
            (1.0 + (t - history_days as f64) / history_span).sqrt()
        } else {
            1.0
        };
        let half_width = INTERVAL_Z * model.sigma() * widen;
        points.push(ForecastPoint::with_interval(date, model.predict(t), half_width));
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::observation_table::SeriesPoint;
    use chrono::Duration;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn series_of(values: impl IntoIterator<Item = (NaiveDate, f64)>) -> ObservationSeries {
        ObservationSeries {
            parameter: "GWETPROF".to_string(),
            points: values
                .into_iter()
                .map(|(date, value)| SeriesPoint { date, value })
                .collect(),
        }
    }

    fn daily_series(start: NaiveDate, count: usize) -> ObservationSeries {
        series_of(
            start
                .iter_days()
                .take(count)
                .enumerate()
                .map(|(i, d)| (d, 5.0 + 0.01 * i as f64)),
        )
    }

    #[test]
    fn below_minimum_sample_size_yields_empty() {
        let series = daily_series(date(2024, 1, 1), MIN_FIT_POINTS - 1);
        let points = forecast_series(&series, &ForecastOptions::default()).unwrap();
        assert!(points.is_empty());
    }

    #[test]
    fn at_minimum_sample_size_yields_a_forecast() {
        let series = daily_series(date(2024, 1, 1), MIN_FIT_POINTS);
        let points = forecast_series(&series, &ForecastOptions::default()).unwrap();
        assert!(!points.is_empty());
    }

    #[test]
    fn covers_history_plus_horizon_with_no_gaps() {
        // ~24 months of daily data with three missing days.
        let start = date(2023, 8, 25);
        let end = date(2025, 8, 24);
        let gaps = [date(2024, 1, 10), date(2024, 6, 2), date(2025, 3, 3)];
        let series = series_of(
            start
                .iter_days()
                .take_while(|d| *d <= end)
                .filter(|d| !gaps.contains(d))
                .map(|d| (d, 1.0)),
        );

        let options = ForecastOptions::default();
        let points = forecast_series(&series, &options).unwrap();

        let days_in_range = (end - start).num_days() + 1;
        assert_eq!(points.len() as i64, days_in_range + 30);
        assert_eq!(points[0].date, start);
        assert_eq!(points.last().unwrap().date, end + Duration::days(30));
        for pair in points.windows(2) {
            assert_eq!(pair[1].date - pair[0].date, Duration::days(1));
        }
    }

    #[test]
    fn bounds_always_surround_the_center() {
        let start = date(2024, 1, 1);
        // Deterministic noise so sigma is positive.
        let series = series_of(
            start
                .iter_days()
                .take(120)
                .enumerate()
                .map(|(i, d)| (d, 3.0 + if i % 2 == 0 { 0.4 } else { -0.4 })),
        );
        let points = forecast_series(&series, &ForecastOptions::default()).unwrap();
        for point in &points {
            assert!(point.lower <= point.center, "{:?}", point);
            assert!(point.center <= point.upper, "{:?}", point);
        }
    }

    #[test]
    fn intervals_widen_monotonically_past_history() {
        let start = date(2024, 1, 1);
        let series = series_of(
            start
                .iter_days()
                .take(90)
                .enumerate()
                .map(|(i, d)| (d, 2.0 + if i % 3 == 0 { 0.3 } else { -0.15 })),
        );
        let last_observed = date(2024, 1, 1) + Duration::days(89);
        let points = forecast_series(&series, &ForecastOptions::default()).unwrap();

        let mut previous_width: Option<f64> = None;
        for point in points.iter().filter(|p| p.date > last_observed) {
            let width = point.upper - point.lower;
            if let Some(previous) = previous_width {
                assert!(width >= previous - 1e-9);
            }
            previous_width = Some(width);
        }
        assert!(previous_width.is_some());
    }

    #[test]
    fn unsorted_input_is_handled() {
        let start = date(2024, 1, 1);
        let mut points: Vec<(NaiveDate, f64)> = start
            .iter_days()
            .take(30)
            .enumerate()
            .map(|(i, d)| (d, 1.0 + 0.1 * i as f64))
            .collect();
        points.reverse();
        let forecast = forecast_series(&series_of(points), &ForecastOptions::default()).unwrap();
        assert_eq!(forecast.first().unwrap().date, start);
        assert_eq!(forecast.len(), 30 + 30);
    }

    #[test]
    fn horizon_is_respected() {
        let series = daily_series(date(2024, 1, 1), 40);
        let options = ForecastOptions {
            horizon_days: 7,
            ..ForecastOptions::default()
        };
        let points = forecast_series(&series, &options).unwrap();
        assert_eq!(points.len(), 40 + 7);
    }
}
