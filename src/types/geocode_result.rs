//! Result of a forward geocoding lookup.

use serde::Serialize;

/// A resolved location: coordinate plus a human-readable display label.
///
/// Ephemeral; the crate never persists these.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeocodeResult {
    pub latitude: f64,
    pub longitude: f64,
    pub label: String,
}
