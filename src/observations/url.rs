//! Pure URL construction for the NASA POWER daily point API.

use crate::powercast::LatLon;
use crate::types::date_range::DateRange;
use crate::types::parameter::ParameterSet;

/// Base endpoint of the POWER daily point API.
pub const POWER_BASE_URL: &str = "https://power.larc.nasa.gov/api/temporal/daily/point";

/// POWER community identifier for agroclimatology data.
const POWER_COMMUNITY: &str = "ag";

/// Builds the daily point request URL.
///
/// Pure, no I/O. The `parameters` field keeps the [`ParameterSet`] insertion
/// order so identical inputs always produce the identical URL.
///
/// # Examples
///
/// ```
/// use powercast::{power_url, DateRange, LatLon, ParameterSet};
///
/// let url = power_url(
///     LatLon(43.6532, -79.3832),
///     &DateRange::from_power("20230825", "20250825").unwrap(),
///     &ParameterSet::new("GWETPROF").and("PRECTOTCORR"),
/// );
/// assert_eq!(
///     url,
///     "https://power.larc.nasa.gov/api/temporal/daily/point\
///      ?parameters=GWETPROF,PRECTOTCORR&community=ag\
///      &longitude=-79.3832&latitude=43.6532\
///      &start=20230825&end=20250825&format=JSON"
/// );
/// ```
pub fn power_url(coordinate: LatLon, range: &DateRange, parameters: &ParameterSet) -> String {
    power_url_with_base(POWER_BASE_URL, coordinate, range, parameters)
}

/// Same as [`power_url`] against an explicit base endpoint.
pub(crate) fn power_url_with_base(
    base: &str,
    coordinate: LatLon,
    range: &DateRange,
    parameters: &ParameterSet,
) -> String {
    let LatLon(latitude, longitude) = coordinate;
    format!(
        "{base}?parameters={parameters}&community={POWER_COMMUNITY}\
         &longitude={longitude}&latitude={latitude}\
         &start={start}&end={end}&format=JSON",
        parameters = parameters.join(),
        start = range.as_power_start(),
        end = range.as_power_end(),
    )
}
