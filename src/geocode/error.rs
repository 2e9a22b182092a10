use std::num::ParseFloatError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to decode response body from {0}")]
    BodyDecode(String, #[source] reqwest::Error),

    #[error("Provider returned unparseable coordinate '{value}'")]
    CoordinateParse {
        value: String,
        #[source]
        source: ParseFloatError,
    },

    /// Forward geocoding found nothing; recoverable at the caller. Reverse
    /// geocoding never produces this, it falls back to a coordinate label.
    #[error("Location not found: '{0}'")]
    NotFound(String),
}
