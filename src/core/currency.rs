use serde::{Deserialize, Serialize};
use std::fmt;

/// Currencies whose USD spot rate is conventionally quoted as
/// USD-per-unit (e.g. 1.49 dollars per pound sterling). Every other
/// currency paired against USD is quoted as units-per-USD
/// (e.g. 103.2 yen per dollar).
const USD_PER_UNIT_QUOTED: [&str; 4] = ["GBP", "EUR", "AUD", "NZD"];

/// ISO 4217-style currency code.
///
/// Codes are normalized to uppercase at construction, so `"gbp"` and
/// `"GBP"` compare equal once wrapped.
///
/// # Examples
///
/// ```
/// use fx_scenario_engine::core::currency::CurrencyCode;
///
/// let gbp = CurrencyCode::new("gbp");
/// assert_eq!(gbp.as_str(), "GBP");
/// assert_ne!(gbp, CurrencyCode::new("JPY"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().to_ascii_uppercase())
    }

    /// The home currency used throughout the engine as the default domestic.
    pub fn usd() -> Self {
        Self("USD".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_usd(&self) -> bool {
        self.0 == "USD"
    }

    /// Whether this currency's USD pair is quoted as USD-per-unit.
    ///
    /// The table is a fixed market convention: GBP, EUR, AUD and NZD
    /// trade as dollars per unit; everything else against USD trades
    /// as units per dollar.
    pub fn usd_quoted_per_unit(&self) -> bool {
        USD_PER_UNIT_QUOTED.contains(&self.0.as_str())
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CurrencyCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
