//! Worst-case overnight scenario search over a small mixed book.
//!
//! Builds a two-currency portfolio with a short call overlay, runs the
//! full move grid, and prints the worst-loss report.

use chrono::{Duration, NaiveDate};
use fx_scenario_engine::prelude::*;

fn main() {
    let valuation_date = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();

    let mut market = MarketData::new();
    market.spots.insert(CurrencyCode::new("GBP"), 1.5);
    market.spots.insert(CurrencyCode::new("JPY"), 100.0);
    market.volatilities.insert(CurrencyCode::new("GBP"), 0.1);
    market.volatilities.insert(CurrencyCode::new("JPY"), 0.1);
    market.rates.insert(CurrencyCode::new("GBP"), 0.03);
    market.rates.insert(CurrencyCode::new("JPY"), 0.0);
    market.rates.insert(CurrencyCode::usd(), 0.02);

    let positions: Vec<Position> = vec![
        SpotPosition::new(5_000_000.0, "GBP").into(),
        SpotPosition::new(250_000_000.0, "JPY").into(),
        OptionPosition::new(
            -2_000_000.0,
            OptionType::Call,
            1.55,
            valuation_date + Duration::days(90),
            "GBP",
        )
        .into(),
    ];

    println!("Portfolio:");
    for position in &positions {
        println!("  {position}");
    }
    println!();

    let scenario = PortfolioScenario::new(positions, market, valuation_date)
        .expect("market data covers every position");
    let grid = MoveGrid::with_default_choices(scenario.currencies());

    println!(
        "Searching {} scenarios over {} currencies...\n",
        grid.len(),
        grid.currencies().len()
    );

    let worst = ScenarioSearch::find_worst(&scenario, &grid).expect("search succeeds");
    println!("{worst}");
}
