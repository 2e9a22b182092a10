use thiserror::Error;

#[derive(Debug, Error)]
pub enum ForecastError {
    /// The additive model could not be fitted to the supplied series. Distinct
    /// from the empty "insufficient data" outcome, which is not an error.
    #[error("Failed to fit forecast model: {0}")]
    ModelFit(String),
}
