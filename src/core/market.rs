use crate::core::currency::CurrencyCode;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Which per-currency input a lookup was after.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarketDataKind {
    Spot,
    Volatility,
    InterestRate,
}

impl fmt::Display for MarketDataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarketDataKind::Spot => write!(f, "spot rate"),
            MarketDataKind::Volatility => write!(f, "volatility"),
            MarketDataKind::InterestRate => write!(f, "interest rate"),
        }
    }
}

/// A position references a currency absent from the market data maps.
///
/// Fatal wherever it surfaces; the engine never defaults missing data.
#[derive(Debug, Error)]
#[error("missing {kind} for currency {currency}")]
pub struct MissingCurrencyData {
    pub currency: CurrencyCode,
    pub kind: MarketDataKind,
}

/// Per-currency market inputs for one valuation date.
///
/// `spots` are quoted in standard market conventions versus USD,
/// `volatilities` and `rates` are annualized. The `rates` map must carry
/// a USD entry for any portfolio with USD-domestic positions; the
/// scenario layer enforces completeness eagerly at construction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarketData {
    pub spots: HashMap<CurrencyCode, f64>,
    pub volatilities: HashMap<CurrencyCode, f64>,
    pub rates: HashMap<CurrencyCode, f64>,
}

impl MarketData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spot(&self, currency: &CurrencyCode) -> Result<f64, MissingCurrencyData> {
        self.spots
            .get(currency)
            .copied()
            .ok_or_else(|| MissingCurrencyData {
                currency: currency.clone(),
                kind: MarketDataKind::Spot,
            })
    }

    pub fn volatility(&self, currency: &CurrencyCode) -> Result<f64, MissingCurrencyData> {
        self.volatilities
            .get(currency)
            .copied()
            .ok_or_else(|| MissingCurrencyData {
                currency: currency.clone(),
                kind: MarketDataKind::Volatility,
            })
    }

    pub fn rate(&self, currency: &CurrencyCode) -> Result<f64, MissingCurrencyData> {
        self.rates
            .get(currency)
            .copied()
            .ok_or_else(|| MissingCurrencyData {
                currency: currency.clone(),
                kind: MarketDataKind::InterestRate,
            })
    }
}
