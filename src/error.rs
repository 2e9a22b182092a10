use crate::forecast::error::ForecastError;
use crate::geocode::error::GeocodeError;
use crate::observations::error::ObservationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PowercastError {
    #[error(transparent)]
    Observation(#[from] ObservationError),

    #[error(transparent)]
    Forecast(#[from] ForecastError),

    #[error(transparent)]
    Geocode(#[from] GeocodeError),

    #[error("Failed to build HTTP client")]
    HttpClient(#[source] reqwest::Error),
}
