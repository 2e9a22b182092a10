//! The main entry point for fetching POWER observations, forecasting a
//! parameter and geocoding locations. Construct a [`Powercast`] client and use
//! its builder methods; the pure pipeline stages are also exported free-standing
//! for callers that bring their own data.

use crate::error::PowercastError;
use crate::forecast::engine::{forecast_series, ForecastOptions};
use crate::forecast::merge::merge_history_and_forecast;
use crate::geocode::geocoder::{Geocoder, NOMINATIM_BASE_URL};
use crate::observations::fetcher::ObservationFetcher;
use crate::observations::url::POWER_BASE_URL;
use crate::types::date_range::DateRange;
use crate::types::geocode_result::GeocodeResult;
use crate::types::merged_record::MergedRecord;
use crate::types::observation_table::ObservationTable;
use crate::types::parameter::ParameterSet;
use bon::bon;
use reqwest::Client;
use std::time::Duration;

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second
/// (index 1). Both values are represented as `f64`.
///
/// # Examples
///
/// ```
/// use powercast::LatLon;
///
/// let toronto = LatLon(43.6532, -79.3832);
/// assert_eq!(toronto.0, 43.6532); // Latitude
/// assert_eq!(toronto.1, -79.3832); // Longitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon(pub f64, pub f64);

/// Explicit client configuration; nothing is read from the environment.
#[derive(Debug, Clone)]
pub struct PowercastConfig {
    /// Client identifier sent to the geocoding provider and used as the HTTP
    /// user agent.
    pub user_agent: String,
    /// Per-request timeout of both providers.
    pub timeout: Duration,
    pub power_base_url: String,
    pub geocode_base_url: String,
}

impl Default for PowercastConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("powercast/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(60),
            power_base_url: POWER_BASE_URL.to_string(),
            geocode_base_url: NOMINATIM_BASE_URL.to_string(),
        }
    }
}

/// The main client for fetching observations, forecasting and geocoding.
///
/// Holds the single `reqwest::Client` shared by both providers; that
/// connection pool is the only state, so one `Powercast` may be used from
/// concurrent tasks without coordination. There is no caching and no retry:
/// every call is a single bounded-timeout attempt.
///
/// # Examples
///
/// ```no_run
/// # use powercast::{DateRange, LatLon, ParameterSet, Powercast, PowercastError};
/// # #[tokio::main]
/// # async fn main() -> Result<(), PowercastError> {
/// let client = Powercast::new()?;
/// let table = client
///     .observations()
///     .coordinate(LatLon(43.6532, -79.3832))
///     .range(DateRange::last_years(2))
///     .call()
///     .await?;
/// println!("{} days of observations", table.height());
/// # Ok(())
/// # }
/// ```
pub struct Powercast {
    fetcher: ObservationFetcher,
    geocoder: Geocoder,
}

#[bon]
impl Powercast {
    /// Creates a client with [`PowercastConfig::default`].
    ///
    /// # Errors
    ///
    /// Returns [`PowercastError::HttpClient`] if the HTTP client cannot be
    /// constructed.
    pub fn new() -> Result<Self, PowercastError> {
        Self::with_config(PowercastConfig::default())
    }

    /// Creates a client with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PowercastError::HttpClient`] if the HTTP client cannot be
    /// constructed.
    pub fn with_config(config: PowercastConfig) -> Result<Self, PowercastError> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()
            .map_err(PowercastError::HttpClient)?;
        Ok(Self {
            fetcher: ObservationFetcher::new(client.clone(), config.power_base_url),
            geocoder: Geocoder::new(client, config.geocode_base_url, config.user_agent),
        })
    }

    /// Fetches the daily observation table for a coordinate and date range.
    ///
    /// # Arguments
    ///
    /// * `.coordinate(LatLon)`: **Required.** The point of interest.
    /// * `.range(DateRange)`: **Required.** Inclusive observation window.
    /// * `.parameters(ParameterSet)`: Optional. Defaults to the standard
    ///   bundle (soil wetness, precipitation, temperature, wind speed).
    ///
    /// # Errors
    ///
    /// Returns [`PowercastError::Observation`] for transport, status and
    /// payload failures; the provider's status or message is preserved
    /// verbatim.
    #[builder]
    pub async fn observations(
        &self,
        coordinate: LatLon,
        range: DateRange,
        parameters: Option<ParameterSet>,
    ) -> Result<ObservationTable, PowercastError> {
        let parameters = parameters.unwrap_or_default();
        Ok(self.fetcher.fetch(coordinate, &range, &parameters).await?)
    }

    /// Runs the whole forecast pipeline for one parameter: fetch observations
    /// (the parameter plus its standard companions), extract the series, fit
    /// the additive model and merge history with the forecast for charting.
    ///
    /// An empty result means the fetched series had too few points to fit a
    /// model and the table itself was empty; with data but no fit, the records
    /// carry observations only.
    ///
    /// # Arguments
    ///
    /// * `.coordinate(LatLon)`: **Required.**
    /// * `.range(DateRange)`: **Required.** Historical window to fit on.
    /// * `.parameter(&str)`: **Required.** POWER code of the charted parameter.
    /// * `.horizon_days(u32)`: Optional. Future days to predict, default 30.
    /// * `.daily_seasonality(bool)` / `.weekly_seasonality(bool)` /
    ///   `.yearly_seasonality(bool)`: Optional. All default to enabled.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use powercast::{DateRange, LatLon, Powercast, PowercastError};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), PowercastError> {
    /// let client = Powercast::new()?;
    /// let records = client
    ///     .merged_forecast()
    ///     .coordinate(LatLon(43.6532, -79.3832))
    ///     .range(DateRange::last_years(2))
    ///     .parameter("GWETPROF")
    ///     .horizon_days(30)
    ///     .call()
    ///     .await?;
    /// for record in records.iter().rev().take(5) {
    ///     println!("{}: {:?} / {:?}", record.date, record.observed, record.center);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`PowercastError::Observation`] for fetch failures and
    /// [`PowercastError::Forecast`] if the model cannot be fitted.
    #[builder]
    pub async fn merged_forecast(
        &self,
        coordinate: LatLon,
        range: DateRange,
        parameter: &str,
        horizon_days: Option<u32>,
        daily_seasonality: Option<bool>,
        weekly_seasonality: Option<bool>,
        yearly_seasonality: Option<bool>,
    ) -> Result<Vec<MergedRecord>, PowercastError> {
        let parameters = ParameterSet::new(parameter).with_companions();
        let table = self.fetcher.fetch(coordinate, &range, &parameters).await?;

        let defaults = ForecastOptions::default();
        let options = ForecastOptions {
            horizon_days: horizon_days.unwrap_or(defaults.horizon_days),
            daily_seasonality: daily_seasonality.unwrap_or(defaults.daily_seasonality),
            weekly_seasonality: weekly_seasonality.unwrap_or(defaults.weekly_seasonality),
            yearly_seasonality: yearly_seasonality.unwrap_or(defaults.yearly_seasonality),
        };
        let series = table.series(parameter);
        let forecast = forecast_series(&series, &options)?;
        Ok(merge_history_and_forecast(&table, parameter, &forecast))
    }

    /// Resolves a free-text location query or raw `"lat, lon"` input.
    ///
    /// # Errors
    ///
    /// Returns [`PowercastError::Geocode`] — notably
    /// [`crate::GeocodeError::NotFound`] when the provider has no match.
    pub async fn geocode(&self, query: &str) -> Result<GeocodeResult, PowercastError> {
        Ok(self.geocoder.resolve(query).await?)
    }

    /// Resolves a coordinate to a display label, falling back to a
    /// six-decimal coordinate label when the provider has no result.
    ///
    /// # Errors
    ///
    /// Returns [`PowercastError::Geocode`] for transport-level failures only.
    pub async fn reverse_geocode(&self, coordinate: LatLon) -> Result<String, PowercastError> {
        Ok(self.geocoder.resolve_reverse(coordinate).await?)
    }
}
