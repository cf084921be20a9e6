use crate::core::currency::CurrencyCode;
use crate::pricing::{FxOptionPricer, FxOptionTerms, OptionType};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors arising from valuing a single position.
///
/// Every path that divides by spot or strike, or feeds them to the
/// pricer's logarithm, requires a strictly positive value. A zero or
/// negative input surfaces here instead of propagating inf/NaN into
/// the scenario totals.
#[derive(Debug, Error)]
pub enum PricingError {
    #[error("spot rate {spot} for {currency} is not positive; cannot price under this quote convention")]
    NonPositiveSpot { currency: CurrencyCode, spot: f64 },
    #[error("strike {strike} for {currency} option is not positive; cannot invert quote units")]
    NonPositiveStrike { currency: CurrencyCode, strike: f64 },
}

/// A spot holding in a foreign currency.
///
/// `quantity` is the number of units of `foreign` held; negative means
/// short. Value is always reported in `domestic` units.
///
/// # Examples
///
/// ```
/// use fx_scenario_engine::core::position::SpotPosition;
///
/// let long_gbp = SpotPosition::new(1000.0, "gbp");
/// assert_eq!(long_gbp.foreign().as_str(), "GBP");
/// assert_eq!(long_gbp.domestic().as_str(), "USD");
/// assert_eq!(long_gbp.price(1.25).unwrap(), 1250.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpotPosition {
    quantity: f64,
    foreign: CurrencyCode,
    domestic: CurrencyCode,
}

impl SpotPosition {
    /// Create a position against the default USD domestic.
    pub fn new(quantity: f64, foreign: impl Into<CurrencyCode>) -> Self {
        Self {
            quantity,
            foreign: foreign.into(),
            domestic: CurrencyCode::usd(),
        }
    }

    /// Override the domestic (payment) currency.
    pub fn with_domestic(mut self, domestic: impl Into<CurrencyCode>) -> Self {
        self.domestic = domestic.into();
        self
    }

    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    pub fn foreign(&self) -> &CurrencyCode {
        &self.foreign
    }

    pub fn domestic(&self) -> &CurrencyCode {
        &self.domestic
    }

    /// The currency whose quantity the market spot rate is quoted in.
    ///
    /// USD pairs follow the fixed convention table (see
    /// [`CurrencyCode::usd_quoted_per_unit`]); non-USD domestic pairs are
    /// treated as quoted in the domestic currency.
    pub fn quoting_convention(&self) -> &CurrencyCode {
        if self.domestic.is_usd() && !self.foreign.usd_quoted_per_unit() {
            &self.foreign
        } else {
            &self.domestic
        }
    }

    /// Value of the holding in domestic units at the given market spot.
    ///
    /// When the quote is domestic-per-foreign the value is
    /// `quantity * spot`; when the quote is foreign-per-domestic the spot
    /// must be inverted, so it has to be strictly positive.
    pub fn price(&self, spot: f64) -> Result<f64, PricingError> {
        if self.quoting_convention() == &self.domestic {
            Ok(self.quantity * spot)
        } else if spot > 0.0 {
            Ok(self.quantity / spot)
        } else {
            Err(PricingError::NonPositiveSpot {
                currency: self.foreign.clone(),
                spot,
            })
        }
    }
}

impl fmt::Display for SpotPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} {}", self.quantity, self.foreign)
    }
}

/// A European option contract on a foreign currency.
///
/// `strike` is expressed in the same units as the market spot rate for
/// the pair. `quantity` counts units of foreign currency under option;
/// negative means a short (written) contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionPosition {
    quantity: f64,
    option_type: OptionType,
    strike: f64,
    expiration: NaiveDate,
    foreign: CurrencyCode,
    domestic: CurrencyCode,
}

impl OptionPosition {
    pub fn new(
        quantity: f64,
        option_type: OptionType,
        strike: f64,
        expiration: NaiveDate,
        foreign: impl Into<CurrencyCode>,
    ) -> Self {
        Self {
            quantity,
            option_type,
            strike,
            expiration,
            foreign: foreign.into(),
            domestic: CurrencyCode::usd(),
        }
    }

    pub fn with_domestic(mut self, domestic: impl Into<CurrencyCode>) -> Self {
        self.domestic = domestic.into();
        self
    }

    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    pub fn strike(&self) -> f64 {
        self.strike
    }

    pub fn expiration(&self) -> NaiveDate {
        self.expiration
    }

    pub fn foreign(&self) -> &CurrencyCode {
        &self.foreign
    }

    pub fn domestic(&self) -> &CurrencyCode {
        &self.domestic
    }

    /// Same rule as [`SpotPosition::quoting_convention`].
    pub fn quoting_convention(&self) -> &CurrencyCode {
        if self.domestic.is_usd() && !self.foreign.usd_quoted_per_unit() {
            &self.foreign
        } else {
            &self.domestic
        }
    }

    /// Value of the contract in domestic units.
    ///
    /// A zero volatility or a contract at/past expiration has no value in
    /// this single-step model and prices to exactly `0.0`. Otherwise the
    /// spot and strike are inverted together whenever the quote convention
    /// differs from the domestic currency, so the external pricer always
    /// sees domestic-per-foreign units.
    pub fn price(
        &self,
        spot: f64,
        valuation_date: NaiveDate,
        volatility: f64,
        domestic_rate: f64,
        foreign_rate: f64,
        pricer: &dyn FxOptionPricer,
    ) -> Result<f64, PricingError> {
        if volatility == 0.0 || valuation_date >= self.expiration {
            return Ok(0.0);
        }

        if spot <= 0.0 {
            return Err(PricingError::NonPositiveSpot {
                currency: self.foreign.clone(),
                spot,
            });
        }
        if self.strike <= 0.0 {
            return Err(PricingError::NonPositiveStrike {
                currency: self.foreign.clone(),
                strike: self.strike,
            });
        }

        let invert = self.quoting_convention() != &self.domestic;
        let (strike, spot) = if invert {
            (1.0 / self.strike, 1.0 / spot)
        } else {
            (self.strike, spot)
        };

        let unit_price = pricer.unit_price(&FxOptionTerms {
            option_type: self.option_type,
            strike,
            expiration: self.expiration,
            valuation_date,
            spot,
            volatility,
            domestic_rate,
            foreign_rate,
        });

        Ok(self.quantity * unit_price)
    }
}

impl fmt::Display for OptionPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.2} {} {} @ {} exp {}",
            self.quantity, self.foreign, self.option_type, self.strike, self.expiration
        )
    }
}

/// A portfolio entry: either a spot holding or an option contract.
///
/// The tagged enum replaces subclass polymorphism; both variants expose
/// the same currency metadata and a uniform `price` entry point so the
/// scenario layer can treat them interchangeably.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Spot(SpotPosition),
    Option(OptionPosition),
}

impl Position {
    pub fn quantity(&self) -> f64 {
        match self {
            Position::Spot(p) => p.quantity(),
            Position::Option(p) => p.quantity(),
        }
    }

    pub fn foreign(&self) -> &CurrencyCode {
        match self {
            Position::Spot(p) => p.foreign(),
            Position::Option(p) => p.foreign(),
        }
    }

    pub fn domestic(&self) -> &CurrencyCode {
        match self {
            Position::Spot(p) => p.domestic(),
            Position::Option(p) => p.domestic(),
        }
    }

    pub fn quoting_convention(&self) -> &CurrencyCode {
        match self {
            Position::Spot(p) => p.quoting_convention(),
            Position::Option(p) => p.quoting_convention(),
        }
    }

    /// Value in domestic units under the given market inputs.
    ///
    /// Spot positions ignore the volatility, rates and valuation date;
    /// the parameters exist so both variants are substitutable in the
    /// portfolio valuation loop.
    pub fn price(
        &self,
        spot: f64,
        valuation_date: NaiveDate,
        volatility: f64,
        domestic_rate: f64,
        foreign_rate: f64,
        pricer: &dyn FxOptionPricer,
    ) -> Result<f64, PricingError> {
        match self {
            Position::Spot(p) => p.price(spot),
            Position::Option(p) => p.price(
                spot,
                valuation_date,
                volatility,
                domestic_rate,
                foreign_rate,
                pricer,
            ),
        }
    }
}

impl From<SpotPosition> for Position {
    fn from(p: SpotPosition) -> Self {
        Position::Spot(p)
    }
}

impl From<OptionPosition> for Position {
    fn from(p: OptionPosition) -> Self {
        Position::Option(p)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Spot(p) => p.fmt(f),
            Position::Option(p) => p.fmt(f),
        }
    }
}
