use crate::pricing::{normal_cdf, FxOptionPricer, FxOptionTerms, OptionType};

/// Closed-form Garman-Kohlhagen pricer for European FX options.
///
/// Black-Scholes adapted to currency pairs: the foreign interest rate
/// plays the role of a continuous dividend yield. Year fractions use
/// ACT/365.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use fx_scenario_engine::pricing::{
///     FxOptionPricer, FxOptionTerms, GarmanKohlhagen, OptionType,
/// };
///
/// let pricer = GarmanKohlhagen::new();
/// let terms = FxOptionTerms {
///     option_type: OptionType::Call,
///     strike: 152.0,
///     expiration: NaiveDate::from_ymd_opt(2019, 7, 1).unwrap(),
///     valuation_date: NaiveDate::from_ymd_opt(2019, 4, 1).unwrap(),
///     spot: 150.0,
///     volatility: 0.13,
///     domestic_rate: 0.03,
///     foreign_rate: 0.04,
/// };
/// let price = pricer.unit_price(&terms);
/// assert!((price - 2.811).abs() < 0.001);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GarmanKohlhagen;

impl GarmanKohlhagen {
    pub fn new() -> Self {
        Self
    }
}

fn intrinsic(option_type: OptionType, spot: f64, strike: f64) -> f64 {
    match option_type {
        OptionType::Call => (spot - strike).max(0.0),
        OptionType::Put => (strike - spot).max(0.0),
    }
}

impl FxOptionPricer for GarmanKohlhagen {
    fn unit_price(&self, terms: &FxOptionTerms) -> f64 {
        let days = (terms.expiration - terms.valuation_date).num_days();
        let tau = days as f64 / 365.0;

        if tau <= 0.0 || terms.volatility <= 0.0 {
            return intrinsic(terms.option_type, terms.spot, terms.strike);
        }

        let sig_sqrt_t = terms.volatility * tau.sqrt();
        let d1 = ((terms.spot / terms.strike).ln()
            + (terms.domestic_rate - terms.foreign_rate
                + 0.5 * terms.volatility * terms.volatility)
                * tau)
            / sig_sqrt_t;
        let d2 = d1 - sig_sqrt_t;

        let df_domestic = (-terms.domestic_rate * tau).exp();
        let df_foreign = (-terms.foreign_rate * tau).exp();

        match terms.option_type {
            OptionType::Call => {
                terms.spot * df_foreign * normal_cdf(d1)
                    - terms.strike * df_domestic * normal_cdf(d2)
            }
            OptionType::Put => {
                terms.strike * df_domestic * normal_cdf(-d2)
                    - terms.spot * df_foreign * normal_cdf(-d1)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use chrono::NaiveDate;

    fn terms(option_type: OptionType, strike: f64, spot: f64) -> FxOptionTerms {
        FxOptionTerms {
            option_type,
            strike,
            expiration: NaiveDate::from_ymd_opt(2019, 7, 1).unwrap(),
            valuation_date: NaiveDate::from_ymd_opt(2019, 4, 1).unwrap(),
            spot,
            volatility: 0.13,
            domestic_rate: 0.03,
            foreign_rate: 0.04,
        }
    }

    #[test]
    fn test_call_reference_value() {
        // 91-day NZD/USD call, struck above spot.
        let price = GarmanKohlhagen::new().unit_price(&terms(OptionType::Call, 152.0, 150.0));
        assert_relative_eq!(price, 2.811_039_776_425_708_6, epsilon = 1e-9);
    }

    #[test]
    fn test_put_reference_value() {
        let price = GarmanKohlhagen::new().unit_price(&terms(OptionType::Put, 152.0, 150.0));
        assert_relative_eq!(price, 5.166_860_275_362_509, epsilon = 1e-9);
    }

    #[test]
    fn test_put_call_parity() {
        // C - P = S * df_f - K * df_d
        let call = GarmanKohlhagen::new().unit_price(&terms(OptionType::Call, 152.0, 150.0));
        let put = GarmanKohlhagen::new().unit_price(&terms(OptionType::Put, 152.0, 150.0));
        let tau = 91.0 / 365.0;
        let forward_gap = 150.0 * (-0.04f64 * tau).exp() - 152.0 * (-0.03f64 * tau).exp();
        assert_abs_diff_eq!(call - put, forward_gap, epsilon = 1e-9);
    }

    #[test]
    fn test_expired_option_is_intrinsic() {
        let mut t = terms(OptionType::Call, 100.0, 110.0);
        t.expiration = t.valuation_date;
        assert_abs_diff_eq!(GarmanKohlhagen::new().unit_price(&t), 10.0);

        t.option_type = OptionType::Put;
        assert_abs_diff_eq!(GarmanKohlhagen::new().unit_price(&t), 0.0);
    }

    #[test]
    fn test_zero_volatility_is_intrinsic() {
        let mut t = terms(OptionType::Put, 100.0, 90.0);
        t.volatility = 0.0;
        assert_abs_diff_eq!(GarmanKohlhagen::new().unit_price(&t), 10.0);
    }

    #[test]
    fn test_deep_itm_call_approaches_forward_value() {
        let t = terms(OptionType::Call, 1.0, 150.0);
        let price = GarmanKohlhagen::new().unit_price(&t);
        let tau = 91.0 / 365.0;
        let forward_gap = 150.0 * (-0.04f64 * tau).exp() - 1.0 * (-0.03f64 * tau).exp();
        assert_relative_eq!(price, forward_gap, epsilon = 1e-6);
    }
}
