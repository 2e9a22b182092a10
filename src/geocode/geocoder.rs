//! Forward and reverse geocoding against a Nominatim-compatible endpoint.

use crate::geocode::error::GeocodeError;
use crate::powercast::LatLon;
use crate::types::geocode_result::GeocodeResult;
use log::info;
use reqwest::header::USER_AGENT;
use reqwest::Client;
use serde::Deserialize;

/// Default Nominatim endpoint.
pub const NOMINATIM_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// One result of a Nominatim `search` call. Nominatim encodes coordinates as
/// JSON strings.
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    display_name: String,
}

/// A Nominatim `reverse` response; `display_name` is missing when nothing is
/// found at the coordinate.
#[derive(Debug, Default, Deserialize)]
struct NominatimReverse {
    display_name: Option<String>,
}

/// Resolves free-text queries and coordinates to display labels.
///
/// The user agent (Nominatim requires one identifying the client) and the base
/// URL are explicit constructor arguments; nothing is read from globals.
pub struct Geocoder {
    client: Client,
    base_url: String,
    user_agent: String,
}

impl Geocoder {
    pub fn new(client: Client, base_url: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            user_agent: user_agent.into(),
        }
    }

    /// Resolves a free-text query or a raw `"lat, lon"` pair.
    ///
    /// A query matching the strict coordinate form is answered directly with a
    /// six-decimal label and no external call. Anything else goes to the
    /// provider; an empty result set is [`GeocodeError::NotFound`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use powercast::Geocoder;
    /// # #[tokio::main]
    /// # async fn main() {
    /// let geocoder = Geocoder::new(
    ///     reqwest::Client::new(),
    ///     "https://nominatim.openstreetmap.org",
    ///     "powercast-example",
    /// );
    /// // Raw coordinates never touch the network.
    /// let result = geocoder.resolve("43.6532, -79.3832").await.unwrap();
    /// assert_eq!(result.label, "43.653200, -79.383200");
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// [`GeocodeError::NotFound`] when the provider has no match; transport,
    /// status and payload errors otherwise.
    pub async fn resolve(&self, query: &str) -> Result<GeocodeResult, GeocodeError> {
        if let Some((latitude, longitude)) = parse_coordinate_pair(query) {
            return Ok(GeocodeResult {
                latitude,
                longitude,
                label: coordinate_label(latitude, longitude),
            });
        }

        let url = format!(
            "{}/search?q={}&format=jsonv2&limit=1&addressdetails=1&accept-language=en",
            self.base_url,
            urlencoding::encode(query)
        );
        info!("Geocoding query via {}", url);
        let places: Vec<NominatimPlace> = self.get_json(url).await?;
        let Some(place) = places.into_iter().next() else {
            return Err(GeocodeError::NotFound(query.to_string()));
        };

        let latitude = parse_provider_coordinate(&place.lat)?;
        let longitude = parse_provider_coordinate(&place.lon)?;
        Ok(GeocodeResult {
            latitude,
            longitude,
            label: place.display_name,
        })
    }

    /// Resolves a coordinate to a display label.
    ///
    /// "No result" degrades to a six-decimal coordinate label instead of an
    /// error; only transport-level failures propagate.
    ///
    /// # Errors
    ///
    /// Transport, status and payload errors of the provider call.
    pub async fn resolve_reverse(&self, coordinate: LatLon) -> Result<String, GeocodeError> {
        let LatLon(latitude, longitude) = coordinate;
        let url = format!(
            "{}/reverse?lat={latitude}&lon={longitude}&format=jsonv2&accept-language=en",
            self.base_url
        );
        info!("Reverse geocoding via {}", url);
        let reverse: NominatimReverse = self.get_json(url).await?;
        Ok(reverse
            .display_name
            .unwrap_or_else(|| coordinate_label(latitude, longitude)))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: String) -> Result<T, GeocodeError> {
        let response = self
            .client
            .get(&url)
            .header(USER_AGENT, self.user_agent.as_str())
            .send()
            .await
            .map_err(|e| GeocodeError::NetworkRequest(url.clone(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                return Err(if let Some(status) = e.status() {
                    GeocodeError::HttpStatus {
                        url,
                        status,
                        source: e,
                    }
                } else {
                    GeocodeError::NetworkRequest(url, e)
                });
            }
        };

        response
            .json()
            .await
            .map_err(|e| GeocodeError::BodyDecode(url, e))
    }
}

fn coordinate_label(latitude: f64, longitude: f64) -> String {
    format!("{latitude:.6}, {longitude:.6}")
}

fn parse_provider_coordinate(value: &str) -> Result<f64, GeocodeError> {
    value.parse().map_err(|source| GeocodeError::CoordinateParse {
        value: value.to_string(),
        source,
    })
}

/// Matches a strict `"lat, lon"` pair: optional surrounding whitespace, an
/// optional leading minus and a plain decimal number on each side. Exponents,
/// `inf`/`nan` and stray characters do not match.
fn parse_coordinate_pair(query: &str) -> Option<(f64, f64)> {
    let (lat, lon) = query.split_once(',')?;
    Some((
        parse_plain_decimal(lat.trim())?,
        parse_plain_decimal(lon.trim())?,
    ))
}

fn parse_plain_decimal(text: &str) -> Option<f64> {
    let unsigned = text.strip_prefix('-').unwrap_or(text);
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };
    let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(integer) {
        return None;
    }
    if let Some(fraction) = fraction {
        if !all_digits(fraction) {
            return None;
        }
    }
    text.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StubServer;

    fn geocoder(base_url: &str) -> Geocoder {
        Geocoder::new(Client::new(), base_url, "powercast-tests")
    }

    #[test]
    fn plain_decimal_accepts_the_strict_grammar_only() {
        assert_eq!(parse_plain_decimal("43"), Some(43.0));
        assert_eq!(parse_plain_decimal("-79.3832"), Some(-79.3832));
        assert_eq!(parse_plain_decimal("0.5"), Some(0.5));

        for rejected in ["", "-", "1.", ".5", "--1", "1e5", "inf", "nan", "1 2", "+1"] {
            assert_eq!(parse_plain_decimal(rejected), None, "{rejected:?}");
        }
    }

    #[test]
    fn coordinate_pair_requires_exactly_two_numbers() {
        assert_eq!(
            parse_coordinate_pair("  43.6532 , -79.3832  "),
            Some((43.6532, -79.3832))
        );
        assert_eq!(parse_coordinate_pair("Toronto"), None);
        assert_eq!(parse_coordinate_pair("1,2,3"), None);
        assert_eq!(parse_coordinate_pair("43.6, west"), None);
        assert_eq!(parse_coordinate_pair(""), None);
    }

    #[tokio::test]
    async fn raw_coordinates_resolve_without_an_external_call() {
        // The base URL is unroutable; a network attempt would error.
        let geocoder = geocoder("http://127.0.0.1:9");
        let result = geocoder.resolve("43.6532, -79.3832").await.unwrap();
        assert_eq!(result.latitude, 43.6532);
        assert_eq!(result.longitude, -79.3832);
        assert_eq!(result.label, "43.653200, -79.383200");
    }

    #[tokio::test]
    async fn empty_provider_result_is_not_found() {
        let stub = StubServer::spawn("200 OK", "[]".to_string()).await;
        let err = geocoder(stub.base_url()).resolve("").await.unwrap_err();
        assert!(matches!(err, GeocodeError::NotFound(_)));
    }

    #[tokio::test]
    async fn forward_lookup_uses_the_provider_result() {
        let body = r#"[{"lat": "52.5200066", "lon": "13.404954", "display_name": "Berlin, Germany"}]"#;
        let stub = StubServer::spawn("200 OK", body.to_string()).await;
        let result = geocoder(stub.base_url()).resolve("Berlin").await.unwrap();
        assert_eq!(result.latitude, 52.5200066);
        assert_eq!(result.longitude, 13.404954);
        assert_eq!(result.label, "Berlin, Germany");
    }

    #[tokio::test]
    async fn reverse_no_result_degrades_to_a_coordinate_label() {
        let stub = StubServer::spawn("200 OK", r#"{"error": "Unable to geocode"}"#.to_string()).await;
        let label = geocoder(stub.base_url())
            .resolve_reverse(LatLon(0.0, 160.0))
            .await
            .unwrap();
        assert_eq!(label, "0.000000, 160.000000");
    }

    #[tokio::test]
    async fn reverse_lookup_returns_the_provider_label() {
        let body = r#"{"display_name": "Toronto, Ontario, Canada"}"#;
        let stub = StubServer::spawn("200 OK", body.to_string()).await;
        let label = geocoder(stub.base_url())
            .resolve_reverse(LatLon(43.6532, -79.3832))
            .await
            .unwrap();
        assert_eq!(label, "Toronto, Ontario, Canada");
    }

    #[tokio::test]
    async fn reverse_transport_failure_still_errors() {
        let err = geocoder("http://127.0.0.1:9")
            .resolve_reverse(LatLon(1.0, 2.0))
            .await
            .unwrap_err();
        assert!(matches!(err, GeocodeError::NetworkRequest(..)));
    }

    #[tokio::test]
    async fn provider_status_errors_are_preserved() {
        let stub = StubServer::spawn("429 Too Many Requests", "[]".to_string()).await;
        let err = geocoder(stub.base_url()).resolve("Berlin").await.unwrap_err();
        match err {
            GeocodeError::HttpStatus { status, .. } => {
                assert_eq!(status, reqwest::StatusCode::TOO_MANY_REQUESTS);
            }
            other => panic!("expected HttpStatus, got {other:?}"),
        }
    }
}
