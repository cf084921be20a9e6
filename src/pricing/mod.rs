//! Option pricing interface.
//!
//! The scenario engine treats the closed-form option pricer as an external
//! collaborator behind the [`FxOptionPricer`] trait. The crate ships
//! [`GarmanKohlhagen`] as the default implementation; any deterministic,
//! side-effect-free pricer with the same unit conventions can be swapped in.

pub mod garman_kohlhagen;

pub use garman_kohlhagen::GarmanKohlhagen;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Call or put, referring to the foreign-currency units of the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    Call,
    Put,
}

/// Raised when an option type tag in input data is not one of
/// `call`, `c`, `put`, `p` (case-insensitive).
#[derive(Debug, Error)]
#[error("unrecognized call/put tag: {0:?}")]
pub struct ParseOptionTypeError(pub String);

impl FromStr for OptionType {
    type Err = ParseOptionTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "call" | "c" => Ok(OptionType::Call),
            "put" | "p" => Ok(OptionType::Put),
            _ => Err(ParseOptionTypeError(s.to_string())),
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "call"),
            OptionType::Put => write!(f, "put"),
        }
    }
}

/// Inputs to a single unit-option valuation.
///
/// `spot` and `strike` are expressed in quoting-currency units per unit of
/// underlying; callers are responsible for inverting both together when the
/// market quote convention differs from the payment currency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FxOptionTerms {
    pub option_type: OptionType,
    pub strike: f64,
    pub expiration: NaiveDate,
    pub valuation_date: NaiveDate,
    pub spot: f64,
    pub volatility: f64,
    pub domestic_rate: f64,
    pub foreign_rate: f64,
}

/// A deterministic, side-effect-free unit option pricer.
///
/// Returns the value of one unit of underlying in quoting-currency units.
/// Implementations may assume the caller has already screened degenerate
/// inputs (zero volatility, expired contracts, non-positive spot/strike).
pub trait FxOptionPricer: Send + Sync {
    fn unit_price(&self, terms: &FxOptionTerms) -> f64;
}

/// Standard normal probability density.
pub fn normal_pdf(x: f64) -> f64 {
    const INV_SQRT_2PI: f64 = 0.398_942_280_401_432_7;
    INV_SQRT_2PI * (-0.5 * x * x).exp()
}

/// Standard normal cumulative distribution.
///
/// Abramowitz & Stegun 7.1.26 polynomial approximation, absolute error
/// below 7.5e-8 over the whole real line.
pub fn normal_cdf(x: f64) -> f64 {
    let z = x.abs();
    let t = 1.0 / (1.0 + 0.231_641_9 * z);
    let poly = t
        * (0.319_381_530
            + t * (-0.356_563_782
                + t * (1.781_477_937 + t * (-1.821_255_978 + t * 1.330_274_429))));
    let approx = 1.0 - normal_pdf(z) * poly;
    if x >= 0.0 {
        approx
    } else {
        1.0 - approx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_parse_option_type() {
        assert_eq!("call".parse::<OptionType>().unwrap(), OptionType::Call);
        assert_eq!("C".parse::<OptionType>().unwrap(), OptionType::Call);
        assert_eq!("Put".parse::<OptionType>().unwrap(), OptionType::Put);
        assert_eq!("p".parse::<OptionType>().unwrap(), OptionType::Put);
    }

    #[test]
    fn test_parse_option_type_rejects_garbage() {
        assert!("straddle".parse::<OptionType>().is_err());
        assert!("".parse::<OptionType>().is_err());
    }

    #[test]
    fn test_normal_cdf_reference_values() {
        assert_abs_diff_eq!(normal_cdf(0.0), 0.5, epsilon = 1e-7);
        assert_abs_diff_eq!(normal_cdf(1.96), 0.975_002, epsilon = 1e-4);
        assert_abs_diff_eq!(normal_cdf(-1.96), 0.024_998, epsilon = 1e-4);
        assert_abs_diff_eq!(normal_cdf(4.0), 0.999_968, epsilon = 1e-4);
    }

    #[test]
    fn test_normal_cdf_symmetry() {
        for x in [0.1, 0.5, 1.0, 2.5] {
            assert_abs_diff_eq!(normal_cdf(x) + normal_cdf(-x), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_normal_pdf_peak() {
        assert_abs_diff_eq!(normal_pdf(0.0), 0.398_942_280_401_432_7, epsilon = 1e-15);
        assert!(normal_pdf(1.0) < normal_pdf(0.0));
    }
}
