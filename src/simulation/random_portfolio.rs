//! Random currency dataset generation.
//!
//! Produces plausible per-currency rows to exercise the scenario search
//! at configurable currency counts, for benchmarks and stress tests.

use crate::loader::CurrencyRecord;
use rand::Rng;

/// Currency codes drawn from when generating a dataset.
const CURRENCY_POOL: [&str; 10] = [
    "GBP", "EUR", "AUD", "NZD", "JPY", "CHF", "CAD", "MXN", "SEK", "NOK",
];

/// Configuration for generating a random currency dataset.
#[derive(Debug, Clone)]
pub struct PortfolioConfig {
    /// Number of non-USD currencies (capped at the pool size).
    pub currency_count: usize,
    /// Absolute size bound for the spot position, in foreign units.
    pub max_spot_position: f64,
    /// Absolute size bound for each option position, in foreign units.
    pub max_option_position: f64,
    /// Annualized volatility range.
    pub volatility_range: (f64, f64),
    /// Annualized interest rate range.
    pub rate_range: (f64, f64),
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            currency_count: 5,
            max_spot_position: 10_000_000.0,
            max_option_position: 5_000_000.0,
            volatility_range: (0.05, 0.2),
            rate_range: (-0.01, 0.05),
        }
    }
}

/// Generate a random currency dataset, USD rate row included.
pub fn generate_random_records(config: &PortfolioConfig) -> Vec<CurrencyRecord> {
    let mut rng = rand::thread_rng();
    let count = config.currency_count.min(CURRENCY_POOL.len());

    let mut records = vec![CurrencyRecord {
        currency: "USD".to_string(),
        spot: 1.0,
        volatility: 0.0,
        rate: rng.gen_range(config.rate_range.0..config.rate_range.1),
        spot_position: 0.0,
        call_position: 0.0,
        put_position: 0.0,
    }];

    for code in CURRENCY_POOL.iter().take(count) {
        // Spot scale depends on the quote convention: yen-like pairs
        // trade near 100, dollar-per-unit pairs near 1.
        let spot = if ["GBP", "EUR", "AUD", "NZD"].contains(code) {
            rng.gen_range(0.5..2.0)
        } else {
            rng.gen_range(0.8..150.0)
        };
        records.push(CurrencyRecord {
            currency: (*code).to_string(),
            spot,
            volatility: rng.gen_range(config.volatility_range.0..config.volatility_range.1),
            rate: rng.gen_range(config.rate_range.0..config.rate_range.1),
            spot_position: rng.gen_range(-config.max_spot_position..config.max_spot_position),
            call_position: rng.gen_range(-config.max_option_position..config.max_option_position),
            put_position: rng.gen_range(-config.max_option_position..config.max_option_position),
        });
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::build_portfolio;
    use chrono::NaiveDate;

    #[test]
    fn test_generates_requested_currency_count() {
        let config = PortfolioConfig {
            currency_count: 3,
            ..Default::default()
        };
        let records = generate_random_records(&config);
        // USD row plus 3 currencies.
        assert_eq!(records.len(), 4);
        assert_eq!(records[0].currency, "USD");
    }

    #[test]
    fn test_generated_records_build_a_valid_portfolio() {
        let records = generate_random_records(&PortfolioConfig::default());
        let loaded =
            build_portfolio(&records, NaiveDate::from_ymd_opt(2026, 8, 7).unwrap()).unwrap();
        assert_eq!(loaded.positions.len(), 15);
        assert!(loaded.market.spots.values().all(|s| *s > 0.0));
    }

    #[test]
    fn test_count_capped_at_pool_size() {
        let config = PortfolioConfig {
            currency_count: 50,
            ..Default::default()
        };
        let records = generate_random_records(&config);
        assert_eq!(records.len(), CURRENCY_POOL.len() + 1);
    }
}
