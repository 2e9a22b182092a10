//! Additive trend + seasonal model fitted by ridge-regularised least squares.
//!
//! The design matrix is an intercept, a linear trend over the span of the
//! series, and Fourier pairs for each enabled seasonal component. The normal
//! equations are solved by Cholesky; the small ridge term keeps the system
//! positive definite even when components are collinear (a daily component at
//! daily sampling degenerates to constants).

use crate::forecast::engine::ForecastOptions;
use crate::forecast::error::ForecastError;
use nalgebra::{DMatrix, DVector};
use std::f64::consts::TAU;

const RIDGE: f64 = 1e-6;

const DAILY_PERIOD: f64 = 1.0;
const WEEKLY_PERIOD: f64 = 7.0;
const YEARLY_PERIOD: f64 = 365.25;

const DAILY_ORDER: usize = 2;
const WEEKLY_ORDER: usize = 3;
const YEARLY_ORDER: usize = 4;

/// A fitted additive model over times measured in days since the first
/// observation.
pub(crate) struct AdditiveModel {
    coefficients: DVector<f64>,
    sigma: f64,
    /// Enabled seasonal components as (period in days, Fourier order).
    components: Vec<(f64, usize)>,
    span: f64,
}

impl AdditiveModel {
    /// Fits the model to `(times, values)` pairs; `times[i]` is the day offset
    /// of observation `i` from the first observation.
    pub(crate) fn fit(
        times: &[f64],
        values: &[f64],
        options: &ForecastOptions,
    ) -> Result<Self, ForecastError> {
        let span = times.last().copied().unwrap_or(0.0).max(1.0);
        let mut components = Vec::new();
        if options.daily_seasonality {
            components.push((DAILY_PERIOD, DAILY_ORDER));
        }
        if options.weekly_seasonality {
            components.push((WEEKLY_PERIOD, WEEKLY_ORDER));
        }
        if options.yearly_seasonality {
            components.push((YEARLY_PERIOD, YEARLY_ORDER));
        }

        let rows = times.len();
        let width = feature_width(&components);
        let mut design = DMatrix::zeros(rows, width);
        for (row, &t) in times.iter().enumerate() {
            for (col, feature) in features(t, span, &components).into_iter().enumerate() {
                design[(row, col)] = feature;
            }
        }
        let observations = DVector::from_column_slice(values);

        let mut normal = design.transpose() * &design;
        for i in 0..width {
            normal[(i, i)] += RIDGE;
        }
        let decomposition = normal.cholesky().ok_or_else(|| {
            ForecastError::ModelFit("normal equations are not positive definite".to_string())
        })?;
        let coefficients = decomposition.solve(&(design.transpose() * &observations));

        let residuals = &design * &coefficients - &observations;
        let dof = rows.saturating_sub(width).max(1) as f64;
        let sigma = (residuals.norm_squared() / dof).sqrt();

        Ok(Self {
            coefficients,
            sigma,
            components,
            span,
        })
    }

    /// Central estimate at day offset `t` (may lie beyond the fitted span).
    pub(crate) fn predict(&self, t: f64) -> f64 {
        features(t, self.span, &self.components)
            .into_iter()
            .zip(self.coefficients.iter())
            .map(|(feature, coefficient)| feature * coefficient)
            .sum()
    }

    /// Residual standard deviation of the fit.
    pub(crate) fn sigma(&self) -> f64 {
        self.sigma
    }
}

fn feature_width(components: &[(f64, usize)]) -> usize {
    2 + components.iter().map(|(_, order)| 2 * order).sum::<usize>()
}

fn features(t: f64, span: f64, components: &[(f64, usize)]) -> Vec<f64> {
    let mut row = Vec::with_capacity(feature_width(components));
    row.push(1.0);
    row.push(t / span);
    for &(period, order) in components {
        for k in 1..=order {
            let angle = TAU * k as f64 * t / period;
            row.push(angle.sin());
            row.push(angle.cos());
        }
    }
    row
}
