//! POWER parameter codes and ordered parameter sets.

use std::fmt;

/// Profile soil wetness (0-1, surface to bedrock).
pub const SOIL_WETNESS: &str = "GWETPROF";
/// Bias-corrected total precipitation (mm/day).
pub const PRECIPITATION: &str = "PRECTOTCORR";
/// Temperature at 2 meters (C).
pub const TEMPERATURE: &str = "T2M";
/// Wind speed at 10 meters (m/s).
pub const WIND_SPEED: &str = "WS10M";

/// Parameters fetched alongside a charted parameter so the observation table
/// always carries the standard companions.
const COMPANION_PARAMETERS: [&str; 3] = [PRECIPITATION, TEMPERATURE, WIND_SPEED];

/// An ordered, non-empty set of POWER parameter codes.
///
/// Insertion order is preserved; it determines the order of the `parameters`
/// query field and of display columns, nothing else. Duplicates are dropped on
/// insert.
///
/// # Examples
///
/// ```
/// use powercast::ParameterSet;
///
/// let params = ParameterSet::new("GWETPROF").with_companions();
/// assert_eq!(params.join(), "GWETPROF,PRECTOTCORR,T2M,WS10M");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSet {
    codes: Vec<String>,
}

impl ParameterSet {
    /// Creates a set containing a single parameter code.
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            codes: vec![code.into()],
        }
    }

    /// Returns a set with `code` appended, unless already present.
    pub fn and(mut self, code: impl Into<String>) -> Self {
        let code = code.into();
        if !self.codes.contains(&code) {
            self.codes.push(code);
        }
        self
    }

    /// Returns a set extended with the standard companion parameters
    /// (precipitation, temperature, wind speed).
    pub fn with_companions(self) -> Self {
        COMPANION_PARAMETERS
            .into_iter()
            .fold(self, |set, code| set.and(code))
    }

    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    /// Comma-joined codes in insertion order, as POWER expects them.
    pub fn join(&self) -> String {
        self.codes.join(",")
    }
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self::new(SOIL_WETNESS).with_companions()
    }
}

impl fmt::Display for ParameterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.join())
    }
}
