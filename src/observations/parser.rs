//! Reshapes the POWER JSON payload into an [`ObservationTable`].
//!
//! POWER returns `properties.parameter.<CODE>.<YYYYMMDD> -> value`. Each
//! parameter becomes one column; the per-parameter date maps are outer-joined
//! on date so the table rows are the union of every parameter's dates.

use crate::observations::error::ObservationError;
use crate::types::observation_table::{date_to_days, ObservationTable, DATE_COLUMN};
use chrono::NaiveDate;
use log::warn;
use polars::prelude::*;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Sentinel POWER substitutes for a missing measurement.
pub const POWER_FILL_VALUE: f64 = -999.0;

/// Date key format of the per-parameter maps.
const DATE_KEY_FORMAT: &str = "%Y%m%d";

/// Deserialized POWER daily point response.
///
/// Only `properties.parameter` is interesting; the entries stay loosely typed
/// because POWER mixes the per-date maps with scalar metadata under the same
/// object on some error paths.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PowerResponse {
    #[serde(default)]
    properties: PowerProperties,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct PowerProperties {
    #[serde(default)]
    parameter: Map<String, Value>,
}

/// Converts a POWER response into an observation table.
///
/// Parameters whose entry is not a date map are skipped with a warning, not
/// an error. A date key that does not parse as `YYYYMMDD` fails the whole
/// response. A payload with no parameter maps at all yields an empty table.
///
/// # Errors
///
/// Returns [`ObservationError::DateParse`] for a malformed date key and
/// [`ObservationError::DataFrame`] if assembling or joining the frames fails.
pub fn parse_observations(response: PowerResponse) -> Result<ObservationTable, ObservationError> {
    let mut frames = Vec::new();
    for (parameter, entries) in &response.properties.parameter {
        let Some(series) = entries.as_object() else {
            warn!("Skipping parameter '{parameter}': entry is not a date map");
            continue;
        };
        frames.push(parameter_frame(parameter, series)?);
    }

    if frames.is_empty() {
        return Ok(ObservationTable::empty());
    }

    let mut joined = frames.remove(0).lazy();
    for frame in frames {
        joined = joined.join(
            frame.lazy(),
            [col(DATE_COLUMN)],
            [col(DATE_COLUMN)],
            JoinArgs::new(JoinType::Full).with_coalesce(JoinCoalesce::CoalesceColumns),
        );
    }
    let frame = joined
        .sort([DATE_COLUMN], SortMultipleOptions::default())
        .collect()?;
    Ok(ObservationTable::new(frame))
}

/// Builds the two-column (date, value) frame for a single parameter.
fn parameter_frame(
    parameter: &str,
    series: &Map<String, Value>,
) -> Result<DataFrame, ObservationError> {
    let mut days = Vec::with_capacity(series.len());
    let mut values = Vec::with_capacity(series.len());
    for (key, raw) in series {
        let date = NaiveDate::parse_from_str(key, DATE_KEY_FORMAT).map_err(|source| {
            ObservationError::DateParse {
                parameter: parameter.to_string(),
                key: key.clone(),
                source,
            }
        })?;
        days.push(date_to_days(date));
        values.push(observed_value(raw));
    }
    let frame = DataFrame::new(vec![
        Column::new(DATE_COLUMN.into(), days).cast(&DataType::Date)?,
        Column::new(parameter.into(), values),
    ])?;
    Ok(frame)
}

/// Missing-value policy: the POWER fill sentinel, non-finite numbers, and
/// non-numeric JSON values are all absent.
fn observed_value(raw: &Value) -> Option<f64> {
    let value = raw.as_f64()?;
    if !value.is_finite() || value == POWER_FILL_VALUE {
        return None;
    }
    Some(value)
}
