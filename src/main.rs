//! fx-scenario-engine CLI
//!
//! Run the worst-case overnight scenario search from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Report the worst-loss scenario for a currency dataset
//! fx-scenario-engine report --input pf_test1_currency_data.csv
//!
//! # Output as JSON, pin the valuation date
//! fx-scenario-engine report --input data.csv --format json --date 2026-08-07
//!
//! # Generate a random dataset for testing
//! fx-scenario-engine generate --currencies 5 --output test.csv
//! ```

use chrono::{Local, NaiveDate};
use fx_scenario_engine::loader::{load_portfolio, write_currency_data};
use fx_scenario_engine::scenario::moves::MoveGrid;
use fx_scenario_engine::scenario::portfolio::PortfolioScenario;
use fx_scenario_engine::scenario::search::ScenarioSearch;
use fx_scenario_engine::simulation::random_portfolio::{
    generate_random_records, PortfolioConfig,
};
use std::fs::File;
use std::path::Path;
use std::process;

fn print_usage() {
    eprintln!(
        r#"fx-scenario-engine — FX portfolio worst-case overnight scenario search

USAGE:
    fx-scenario-engine <COMMAND> [OPTIONS]

COMMANDS:
    report      Find and report the worst-loss scenario for a dataset
    generate    Generate a random currency dataset (for testing)
    help        Show this message

OPTIONS (report):
    --input <FILE>      Path to the currency data CSV
    --format <FORMAT>   Output format: text (default) or json
    --date <DATE>       Valuation date YYYY-MM-DD (default: today)
    --moves <LIST>      Comma-separated move choices (default: -3,-1,0,1,3)
    --parallel          Evaluate the scenario grid across CPU cores

OPTIONS (generate):
    --currencies <N>    Number of non-USD currencies (default: 5)
    --output <FILE>     Write to file instead of stdout

EXAMPLES:
    fx-scenario-engine report --input pf_test1_currency_data.csv
    fx-scenario-engine report --input data.csv --format json --parallel
    fx-scenario-engine generate --currencies 5 --output test.csv"#
    );
}

fn parse_move_choices(list: &str) -> Vec<i32> {
    list.split(',')
        .map(|part| {
            part.trim().parse().unwrap_or_else(|_| {
                eprintln!("Invalid move choice: {part}");
                process::exit(1);
            })
        })
        .collect()
}

fn cmd_report(args: &[String]) {
    let mut input_path = None;
    let mut format = "text".to_string();
    let mut valuation_date = Local::now().date_naive();
    let mut move_choices: Option<Vec<i32>> = None;
    let mut parallel = false;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                i += 1;
                input_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--input requires a file path");
                    process::exit(1);
                }));
            }
            "--format" => {
                i += 1;
                format = args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--format requires 'text' or 'json'");
                    process::exit(1);
                });
            }
            "--date" => {
                i += 1;
                let raw = args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--date requires YYYY-MM-DD");
                    process::exit(1);
                });
                valuation_date = NaiveDate::parse_from_str(&raw, "%Y-%m-%d").unwrap_or_else(|e| {
                    eprintln!("Invalid date '{raw}': {e}");
                    process::exit(1);
                });
            }
            "--moves" => {
                i += 1;
                let raw = args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--moves requires a comma-separated list");
                    process::exit(1);
                });
                move_choices = Some(parse_move_choices(&raw));
            }
            "--parallel" => {
                parallel = true;
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let path = input_path.unwrap_or_else(|| {
        eprintln!("Error: --input <FILE> is required");
        process::exit(1);
    });

    let loaded = load_portfolio(Path::new(&path), valuation_date).unwrap_or_else(|e| {
        eprintln!("Error loading '{path}': {e}");
        process::exit(1);
    });

    let scenario = PortfolioScenario::new(loaded.positions, loaded.market, valuation_date)
        .unwrap_or_else(|e| {
            eprintln!("Error building scenario: {e}");
            process::exit(1);
        });

    let grid = match move_choices {
        Some(choices) => MoveGrid::new(scenario.currencies(), choices),
        None => MoveGrid::with_default_choices(scenario.currencies()),
    };

    let result = if parallel {
        ScenarioSearch::find_worst_parallel(&scenario, &grid)
    } else {
        ScenarioSearch::find_worst(&scenario, &grid)
    };
    let worst = result.unwrap_or_else(|e| {
        eprintln!("Scenario search failed: {e}");
        process::exit(1);
    });

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&worst).unwrap());
    } else {
        println!("{worst}");
    }
}

fn cmd_generate(args: &[String]) {
    let mut currencies = 5usize;
    let mut output_path: Option<String> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--currencies" => {
                i += 1;
                currencies = args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--currencies requires a number");
                    process::exit(1);
                });
            }
            "--output" => {
                i += 1;
                output_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--output requires a file path");
                    process::exit(1);
                }));
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let config = PortfolioConfig {
        currency_count: currencies,
        ..Default::default()
    };
    let records = generate_random_records(&config);

    if let Some(path) = output_path {
        let file = File::create(&path).unwrap_or_else(|e| {
            eprintln!("Error creating '{path}': {e}");
            process::exit(1);
        });
        write_currency_data(file, &records).unwrap_or_else(|e| {
            eprintln!("Error writing '{path}': {e}");
            process::exit(1);
        });
        eprintln!("Generated {} currency rows → {}", records.len(), path);
    } else {
        let mut buffer = Vec::new();
        write_currency_data(&mut buffer, &records).unwrap_or_else(|e| {
            eprintln!("Error writing dataset: {e}");
            process::exit(1);
        });
        print!("{}", String::from_utf8_lossy(&buffer));
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "report" => cmd_report(rest),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {command}");
            print_usage();
            process::exit(1);
        }
    }
}
