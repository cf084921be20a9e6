use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fx_scenario_engine::loader::build_portfolio;
use fx_scenario_engine::scenario::moves::MoveGrid;
use fx_scenario_engine::scenario::portfolio::PortfolioScenario;
use fx_scenario_engine::scenario::search::ScenarioSearch;
use fx_scenario_engine::simulation::random_portfolio::{
    generate_random_records, PortfolioConfig,
};

fn build_scenario(currency_count: usize) -> PortfolioScenario {
    let config = PortfolioConfig {
        currency_count,
        ..Default::default()
    };
    let records = generate_random_records(&config);
    let valuation_date = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
    let loaded = build_portfolio(&records, valuation_date).unwrap();
    PortfolioScenario::new(loaded.positions, loaded.market, valuation_date).unwrap()
}

fn bench_search_3_currencies(c: &mut Criterion) {
    let scenario = build_scenario(3);
    let grid = MoveGrid::with_default_choices(scenario.currencies());

    c.bench_function("search_3_currencies_125_scenarios", |b| {
        b.iter(|| ScenarioSearch::find_worst(black_box(&scenario), black_box(&grid)))
    });
}

fn bench_search_5_currencies(c: &mut Criterion) {
    let scenario = build_scenario(5);
    let grid = MoveGrid::with_default_choices(scenario.currencies());

    c.bench_function("search_5_currencies_3125_scenarios", |b| {
        b.iter(|| ScenarioSearch::find_worst(black_box(&scenario), black_box(&grid)))
    });
}

fn bench_search_5_currencies_parallel(c: &mut Criterion) {
    let scenario = build_scenario(5);
    let grid = MoveGrid::with_default_choices(scenario.currencies());

    c.bench_function("search_5_currencies_3125_scenarios_parallel", |b| {
        b.iter(|| ScenarioSearch::find_worst_parallel(black_box(&scenario), black_box(&grid)))
    });
}

criterion_group!(
    benches,
    bench_search_3_currencies,
    bench_search_5_currencies,
    bench_search_5_currencies_parallel
);
criterion_main!(benches);
