//! Position pricing under both quote conventions.
//!
//! Shows how the engine values spot holdings and option contracts,
//! including the strike/spot inversion for units-per-USD pairs.

use chrono::{Duration, NaiveDate};
use fx_scenario_engine::prelude::*;

fn main() {
    let valuation_date = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
    let pricer = GarmanKohlhagen::new();

    // GBP quotes dollars-per-pound: value multiplies by spot.
    let gbp = SpotPosition::new(1_000.0, "GBP");
    println!(
        "{gbp}  (quoted in {})  = {:.2} USD at spot 1.25",
        gbp.quoting_convention(),
        gbp.price(1.25).unwrap()
    );

    // JPY quotes yen-per-dollar: value divides by spot.
    let jpy = SpotPosition::new(25_000.0, "JPY");
    println!(
        "{jpy}  (quoted in {})  = {:.2} USD at spot 100.0",
        jpy.quoting_convention(),
        jpy.price(100.0).unwrap()
    );
    println!();

    // A 90-day at-the-money JPY put: strike and spot invert together
    // before the closed-form pricer sees them.
    let put = OptionPosition::new(
        10_000.0,
        OptionType::Put,
        108.0,
        valuation_date + Duration::days(90),
        "JPY",
    );
    let value = put
        .price(108.38, valuation_date, 0.0638, 0.0232, -0.00655, &pricer)
        .unwrap();
    println!("{put}");
    println!("  value = {value:.6} USD");

    // The same contract with zero volatility has no value in this model.
    let degenerate = put
        .price(108.38, valuation_date, 0.0, 0.0232, -0.00655, &pricer)
        .unwrap();
    println!("  value at zero volatility = {degenerate:.1} USD");
}
