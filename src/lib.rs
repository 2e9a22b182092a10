mod error;
mod forecast;
mod geocode;
mod observations;
mod powercast;
#[cfg(test)]
mod test_support;
mod types;

pub use error::PowercastError;
pub use powercast::*;

pub use forecast::engine::{forecast_series, ForecastOptions, MIN_FIT_POINTS};
pub use forecast::error::ForecastError;
pub use forecast::merge::merge_history_and_forecast;

pub use geocode::error::GeocodeError;
pub use geocode::geocoder::{Geocoder, NOMINATIM_BASE_URL};

pub use observations::error::ObservationError;
pub use observations::fetcher::ObservationFetcher;
pub use observations::parser::{parse_observations, PowerResponse, POWER_FILL_VALUE};
pub use observations::url::{power_url, POWER_BASE_URL};

pub use types::date_range::{DateRange, DateRangeError};
pub use types::forecast_point::ForecastPoint;
pub use types::geocode_result::GeocodeResult;
pub use types::merged_record::MergedRecord;
pub use types::observation_table::{
    ObservationRow, ObservationSeries, ObservationTable, SeriesPoint,
};
pub use types::parameter::{
    ParameterSet, PRECIPITATION, SOIL_WETNESS, TEMPERATURE, WIND_SPEED,
};
