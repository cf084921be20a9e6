use crate::core::currency::CurrencyCode;
use crate::core::market::{MarketData, MarketDataKind, MissingCurrencyData};
use crate::core::position::{Position, PricingError};
use crate::pricing::{FxOptionPricer, GarmanKohlhagen};
use crate::scenario::moves::MoveVector;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Errors arising from scenario valuation.
///
/// All of these indicate a data or configuration defect, not a transient
/// condition, and abort the enclosing computation immediately.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error(transparent)]
    Market(#[from] MissingCurrencyData),
    #[error(transparent)]
    Pricing(#[from] PricingError),
    #[error("no move specified for currency {0}")]
    MissingMove(CurrencyCode),
    #[error("scenario grid is empty; nothing to enumerate")]
    EmptyGrid,
}

/// Profit of one scenario, broken down by currency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfitBreakdown {
    /// Profit in domestic (USD) units per foreign currency.
    pub by_currency: HashMap<CurrencyCode, f64>,
    /// Sum over all currencies.
    pub total: f64,
}

/// A portfolio frozen together with its market data and valuation date.
///
/// The valuation date is snapshotted once at construction and never
/// re-read from the wall clock, so repeated `profit` calls on the same
/// scenario are reproducible. Market data completeness is validated
/// eagerly: every position's foreign currency must carry a spot, a
/// volatility and a rate, and every domestic currency a rate, or
/// construction fails.
pub struct PortfolioScenario {
    positions: Vec<Position>,
    market: MarketData,
    valuation_date: NaiveDate,
    pricer: Box<dyn FxOptionPricer>,
}

impl PortfolioScenario {
    /// Build a scenario priced with the default Garman-Kohlhagen pricer.
    pub fn new(
        positions: Vec<Position>,
        market: MarketData,
        valuation_date: NaiveDate,
    ) -> Result<Self, ScenarioError> {
        Self::with_pricer(positions, market, valuation_date, Box::new(GarmanKohlhagen))
    }

    /// Build a scenario with an injected option pricer.
    pub fn with_pricer(
        positions: Vec<Position>,
        market: MarketData,
        valuation_date: NaiveDate,
        pricer: Box<dyn FxOptionPricer>,
    ) -> Result<Self, ScenarioError> {
        for position in &positions {
            market.spot(position.foreign())?;
            market.volatility(position.foreign())?;
            market.rate(position.foreign())?;
            market.rate(position.domestic())?;
        }
        Ok(Self {
            positions,
            market,
            valuation_date,
            pricer,
        })
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn market(&self) -> &MarketData {
        &self.market
    }

    pub fn valuation_date(&self) -> NaiveDate {
        self.valuation_date
    }

    /// The distinct foreign currencies held, sorted for deterministic
    /// enumeration order.
    pub fn currencies(&self) -> Vec<CurrencyCode> {
        let mut currencies: Vec<CurrencyCode> = self
            .positions
            .iter()
            .map(|p| p.foreign().clone())
            .collect();
        currencies.sort();
        currencies.dedup();
        currencies
    }

    /// Value every position under the given spots, bucketed by foreign
    /// currency. Positions in the same currency sum together.
    ///
    /// The valuation date is the construction-time date shifted by
    /// `date_offset` (zero for today, one day for the overnight leg).
    pub fn compute_valuation(
        &self,
        spots: &HashMap<CurrencyCode, f64>,
        date_offset: Duration,
    ) -> Result<HashMap<CurrencyCode, f64>, ScenarioError> {
        let valuation_date = self.valuation_date + date_offset;
        let mut buckets: HashMap<CurrencyCode, f64> = HashMap::new();

        for position in &self.positions {
            let currency = position.foreign();
            let spot = spots
                .get(currency)
                .copied()
                .ok_or_else(|| MissingCurrencyData {
                    currency: currency.clone(),
                    kind: MarketDataKind::Spot,
                })?;
            let volatility = self.market.volatility(currency)?;
            let foreign_rate = self.market.rate(currency)?;
            let domestic_rate = self.market.rate(position.domestic())?;

            let value = position.price(
                spot,
                valuation_date,
                volatility,
                domestic_rate,
                foreign_rate,
                self.pricer.as_ref(),
            )?;
            *buckets.entry(currency.clone()).or_insert(0.0) += value;
        }

        Ok(buckets)
    }

    /// Overnight profit in domestic units under the given moves.
    ///
    /// Revalues the portfolio today at current spots, then tomorrow with
    /// each currency's spot shocked by `moves[currency]` standard
    /// deviations (`spot * (1 + move * volatility)`). A currency held in
    /// the portfolio but absent from `moves` is an error, never a silent
    /// zero-move default.
    pub fn profit(&self, moves: &MoveVector) -> Result<ProfitBreakdown, ScenarioError> {
        let today = self.compute_valuation(&self.market.spots, Duration::zero())?;

        let mut shocked: HashMap<CurrencyCode, f64> = HashMap::new();
        for position in &self.positions {
            let currency = position.foreign();
            if shocked.contains_key(currency) {
                continue;
            }
            let spot = self.market.spot(currency)?;
            let volatility = self.market.volatility(currency)?;
            let sigmas = moves
                .get(currency)
                .ok_or_else(|| ScenarioError::MissingMove(currency.clone()))?;
            shocked.insert(currency.clone(), spot * (1.0 + sigmas as f64 * volatility));
        }

        let tomorrow = self.compute_valuation(&shocked, Duration::days(1))?;

        let mut by_currency = HashMap::new();
        let mut total = 0.0;
        for (currency, value_tomorrow) in &tomorrow {
            let value_today = today.get(currency).copied().unwrap_or(0.0);
            let pnl = value_tomorrow - value_today;
            total += pnl;
            by_currency.insert(currency.clone(), pnl);
        }

        Ok(ProfitBreakdown { by_currency, total })
    }
}

impl fmt::Debug for PortfolioScenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PortfolioScenario")
            .field("positions", &self.positions)
            .field("market", &self.market)
            .field("valuation_date", &self.valuation_date)
            .finish_non_exhaustive()
    }
}
