//! Currency dataset loading.
//!
//! Reads the per-currency CSV layout used by the report driver: one row
//! per currency carrying the spot rate, annualized volatility and rate,
//! and the desk's spot/call/put position sizes. The USD row contributes
//! only its interest rate; every other row expands into a spot position
//! plus a call and a put struck at the current spot, expiring 90 days
//! after the valuation date.

use crate::core::currency::CurrencyCode;
use crate::core::market::MarketData;
use crate::core::position::{OptionPosition, Position, SpotPosition};
use crate::pricing::OptionType;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

/// Days until the option positions in a dataset expire.
const OPTION_EXPIRY_DAYS: i64 = 90;

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("failed to open {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse currency data: {0}")]
    Csv(#[from] csv::Error),
    #[error("currency data must include a USD interest rate")]
    MissingUsdRate,
}

/// One row of a currency dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyRecord {
    pub currency: String,
    #[serde(rename = "spot exchange rate")]
    pub spot: f64,
    #[serde(rename = "3-month volatility (annualized)")]
    pub volatility: f64,
    #[serde(rename = "3-month interest rate (annualized)")]
    pub rate: f64,
    #[serde(rename = "spot position")]
    pub spot_position: f64,
    #[serde(rename = "call option position")]
    pub call_position: f64,
    #[serde(rename = "put option position")]
    pub put_position: f64,
}

/// A dataset expanded into engine inputs.
#[derive(Debug, Clone)]
pub struct LoadedPortfolio {
    pub positions: Vec<Position>,
    pub market: MarketData,
}

/// Parse currency records from any CSV source.
pub fn records_from_reader<R: Read>(reader: R) -> Result<Vec<CurrencyRecord>, LoaderError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();
    for row in csv_reader.deserialize() {
        records.push(row?);
    }
    Ok(records)
}

/// Parse currency records from a CSV file.
pub fn load_currency_data(path: &Path) -> Result<Vec<CurrencyRecord>, LoaderError> {
    let file = File::open(path).map_err(|source| LoaderError::Io {
        path: path.display().to_string(),
        source,
    })?;
    records_from_reader(file)
}

/// Expand records into positions and market data.
///
/// Non-USD rows become a spot position plus a call and a put struck at
/// the row's current spot, both expiring 90 days after `valuation_date`.
pub fn build_portfolio(
    records: &[CurrencyRecord],
    valuation_date: NaiveDate,
) -> Result<LoadedPortfolio, LoaderError> {
    let expiration = valuation_date + Duration::days(OPTION_EXPIRY_DAYS);
    let mut positions = Vec::new();
    let mut market = MarketData::new();

    for record in records {
        let currency = CurrencyCode::new(&record.currency);
        market.rates.insert(currency.clone(), record.rate);
        if currency.is_usd() {
            continue;
        }
        market.spots.insert(currency.clone(), record.spot);
        market
            .volatilities
            .insert(currency.clone(), record.volatility);

        positions.push(SpotPosition::new(record.spot_position, currency.clone()).into());
        positions.push(
            OptionPosition::new(
                record.call_position,
                OptionType::Call,
                record.spot,
                expiration,
                currency.clone(),
            )
            .into(),
        );
        positions.push(
            OptionPosition::new(
                record.put_position,
                OptionType::Put,
                record.spot,
                expiration,
                currency,
            )
            .into(),
        );
    }

    if !market.rates.contains_key(&CurrencyCode::usd()) {
        return Err(LoaderError::MissingUsdRate);
    }

    log::info!(
        "loaded {} positions across {} currencies",
        positions.len(),
        market.spots.len()
    );
    Ok(LoadedPortfolio { positions, market })
}

/// Load a CSV dataset and expand it in one step.
pub fn load_portfolio(
    path: &Path,
    valuation_date: NaiveDate,
) -> Result<LoadedPortfolio, LoaderError> {
    let records = load_currency_data(path)?;
    build_portfolio(&records, valuation_date)
}

/// Write currency records as CSV, with the canonical column headers.
pub fn write_currency_data<W: std::io::Write>(
    writer: W,
    records: &[CurrencyRecord],
) -> Result<(), LoaderError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
currency,spot exchange rate,3-month volatility (annualized),3-month interest rate (annualized),spot position,call option position,put option position
USD,1.0,0.0,0.02,0,0,0
GBP,1.5,0.1,0.03,100,-100000,50000
JPY,100.0,0.1,0.0,10000,0,0
";

    fn valuation_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2019, 4, 1).unwrap()
    }

    #[test]
    fn test_records_from_reader() {
        let records = records_from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[1].currency, "GBP");
        assert_eq!(records[1].spot, 1.5);
        assert_eq!(records[1].call_position, -100_000.0);
    }

    #[test]
    fn test_build_portfolio_expands_three_positions_per_currency() {
        let records = records_from_reader(SAMPLE.as_bytes()).unwrap();
        let loaded = build_portfolio(&records, valuation_date()).unwrap();

        // 2 non-USD currencies, 3 positions each.
        assert_eq!(loaded.positions.len(), 6);
        assert_eq!(loaded.market.spots.len(), 2);
        assert_eq!(loaded.market.rates.len(), 3);

        let gbp = CurrencyCode::new("GBP");
        let options: Vec<&OptionPosition> = loaded
            .positions
            .iter()
            .filter_map(|p| match p {
                Position::Option(o) if o.foreign() == &gbp => Some(o),
                _ => None,
            })
            .collect();
        assert_eq!(options.len(), 2);
        for option in options {
            // Struck at the current spot, 90 days out.
            assert_eq!(option.strike(), 1.5);
            assert_eq!(
                option.expiration(),
                valuation_date() + Duration::days(90)
            );
        }
    }

    #[test]
    fn test_usd_row_contributes_rate_only() {
        let records = records_from_reader(SAMPLE.as_bytes()).unwrap();
        let loaded = build_portfolio(&records, valuation_date()).unwrap();
        let usd = CurrencyCode::usd();
        assert_eq!(loaded.market.rates[&usd], 0.02);
        assert!(!loaded.market.spots.contains_key(&usd));
        assert!(loaded.positions.iter().all(|p| !p.foreign().is_usd()));
    }

    #[test]
    fn test_missing_usd_rate_is_error() {
        let no_usd = "\
currency,spot exchange rate,3-month volatility (annualized),3-month interest rate (annualized),spot position,call option position,put option position
GBP,1.5,0.1,0.03,100,0,0
";
        let records = records_from_reader(no_usd.as_bytes()).unwrap();
        assert!(matches!(
            build_portfolio(&records, valuation_date()),
            Err(LoaderError::MissingUsdRate)
        ));
    }

    #[test]
    fn test_csv_round_trip() {
        let records = records_from_reader(SAMPLE.as_bytes()).unwrap();
        let mut buffer = Vec::new();
        write_currency_data(&mut buffer, &records).unwrap();
        let back = records_from_reader(buffer.as_slice()).unwrap();
        assert_eq!(back, records);
    }

    #[test]
    fn test_lowercase_currency_codes_normalize() {
        let lower = "\
currency,spot exchange rate,3-month volatility (annualized),3-month interest rate (annualized),spot position,call option position,put option position
usd,1.0,0.0,0.02,0,0,0
gbp,1.5,0.1,0.03,100,0,0
";
        let records = records_from_reader(lower.as_bytes()).unwrap();
        let loaded = build_portfolio(&records, valuation_date()).unwrap();
        assert!(loaded.market.rates.contains_key(&CurrencyCode::usd()));
        assert_eq!(loaded.positions[0].foreign().as_str(), "GBP");
    }
}
