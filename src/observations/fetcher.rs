//! Fetches and parses POWER daily point observations.

use crate::observations::error::ObservationError;
use crate::observations::parser::{parse_observations, PowerResponse};
use crate::observations::url::power_url_with_base;
use crate::powercast::LatLon;
use crate::types::date_range::DateRange;
use crate::types::observation_table::ObservationTable;
use crate::types::parameter::ParameterSet;
use log::{info, warn};
use reqwest::Client;

/// Single-shot observation fetcher: build URL, one bounded GET, parse.
///
/// Owned by [`crate::Powercast`]; the timeout is configured on the shared
/// `reqwest::Client`. No retries and no caching: every call repeats the full
/// fetch.
pub struct ObservationFetcher {
    client: Client,
    base_url: String,
}

impl ObservationFetcher {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Fetches the observation table for a coordinate, range and parameter set.
    ///
    /// # Errors
    ///
    /// Returns [`ObservationError::NetworkRequest`] for transport failures,
    /// [`ObservationError::HttpStatus`] for non-success statuses (the status
    /// is preserved verbatim for the caller to present), and
    /// [`ObservationError::BodyDecode`] / parse errors for bad payloads.
    pub async fn fetch(
        &self,
        coordinate: LatLon,
        range: &DateRange,
        parameters: &ParameterSet,
    ) -> Result<ObservationTable, ObservationError> {
        let url = power_url_with_base(&self.base_url, coordinate, range, parameters);
        info!("Fetching observations from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ObservationError::NetworkRequest(url.clone(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(if let Some(status) = e.status() {
                    ObservationError::HttpStatus {
                        url,
                        status,
                        source: e,
                    }
                } else {
                    ObservationError::NetworkRequest(url, e)
                });
            }
        };

        let payload: PowerResponse = response
            .json()
            .await
            .map_err(|e| ObservationError::BodyDecode(url, e))?;
        parse_observations(payload)
    }
}
