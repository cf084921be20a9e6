use crate::core::currency::CurrencyCode;
use crate::scenario::moves::{MoveGrid, MoveVector};
use crate::scenario::portfolio::{PortfolioScenario, ProfitBreakdown, ScenarioError};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// The selected worst-loss scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    /// Total profit in USD (negative = loss).
    pub total: f64,
    /// Sum of absolute move magnitudes for the selected scenario.
    pub severity: u32,
    /// Profit per foreign currency.
    pub by_currency: HashMap<CurrencyCode, f64>,
    /// The move vector that produced this outcome.
    pub moves: MoveVector,
}

/// One evaluated grid point, carrying its enumeration index so that
/// full ties resolve deterministically regardless of evaluation order.
struct Candidate {
    total: f64,
    severity: u32,
    index: usize,
    breakdown: ProfitBreakdown,
    moves: MoveVector,
}

impl Candidate {
    fn into_result(self) -> ScenarioResult {
        ScenarioResult {
            total: self.total,
            severity: self.severity,
            by_currency: self.breakdown.by_currency,
            moves: self.moves,
        }
    }
}

/// Lexicographic worst-case ordering: most negative total first, then
/// the least extreme move vector, then the lowest grid index.
///
/// `f64::total_cmp` keeps the reduction a total order even if a NaN
/// slips through, so the min is well-defined over any evaluation order.
fn worse_of(a: Candidate, b: Candidate) -> Candidate {
    let ordering = a
        .total
        .total_cmp(&b.total)
        .then_with(|| a.severity.cmp(&b.severity))
        .then_with(|| a.index.cmp(&b.index));
    if ordering.is_le() {
        a
    } else {
        b
    }
}

fn evaluate(
    scenario: &PortfolioScenario,
    grid: &MoveGrid,
    index: usize,
) -> Result<Candidate, ScenarioError> {
    let moves = grid.vector_at(index);
    let severity = moves.severity();
    let breakdown = scenario.profit(&moves)?;
    Ok(Candidate {
        total: breakdown.total,
        severity,
        index,
        breakdown,
        moves,
    })
}

/// Exhaustive worst-case search over a move grid.
///
/// Scores every move combination by `(total profit, severity)` and picks
/// the lexicographic minimum: the biggest loss, ties broken in favor of
/// the less extreme joint shock. A single failing evaluation aborts the
/// whole search; scenario evaluation is deterministic, so a failure is a
/// data defect and retrying or skipping would only mask it.
pub struct ScenarioSearch;

impl ScenarioSearch {
    /// Sequential search over the full grid.
    pub fn find_worst(
        scenario: &PortfolioScenario,
        grid: &MoveGrid,
    ) -> Result<ScenarioResult, ScenarioError> {
        log::debug!(
            "enumerating {} scenarios over {} currencies",
            grid.len(),
            grid.currencies().len()
        );

        let mut worst: Option<Candidate> = None;
        for index in 0..grid.len() {
            let candidate = evaluate(scenario, grid, index)?;
            worst = Some(match worst {
                None => candidate,
                Some(current) => worse_of(current, candidate),
            });
        }
        worst.map(Candidate::into_result).ok_or(ScenarioError::EmptyGrid)
    }

    /// Parallel search over the grid's index space.
    ///
    /// Each grid point is an independent pure evaluation; the reduction
    /// is the same total-order minimum as the sequential search, so both
    /// entry points select the identical scenario.
    pub fn find_worst_parallel(
        scenario: &PortfolioScenario,
        grid: &MoveGrid,
    ) -> Result<ScenarioResult, ScenarioError> {
        log::debug!(
            "enumerating {} scenarios over {} currencies in parallel",
            grid.len(),
            grid.currencies().len()
        );

        let worst = (0..grid.len())
            .into_par_iter()
            .map(|index| evaluate(scenario, grid, index))
            .try_reduce_with(|a, b| Ok(worse_of(a, b)));

        match worst {
            None => Err(ScenarioError::EmptyGrid),
            Some(candidate) => candidate.map(Candidate::into_result),
        }
    }
}

impl fmt::Display for ScenarioResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let loss = -self.total;
        if loss < 1_000_000_000.0 {
            writeln!(
                f,
                "Worst overnight scenario: loss of ${:.2} mln",
                loss / 1_000_000.0
            )?;
        } else {
            writeln!(
                f,
                "Worst overnight scenario: loss of ${:.2} bln",
                loss / 1_000_000_000.0
            )?;
        }
        writeln!(f, "Severity: {} std devs", self.severity)?;

        let mut lines: Vec<(&CurrencyCode, f64)> =
            self.by_currency.iter().map(|(c, &p)| (c, p)).collect();
        lines.sort_by(|a, b| a.1.total_cmp(&b.1));
        for (currency, profit) in lines {
            let sigmas = self.moves.get(currency).unwrap_or(0);
            writeln!(
                f,
                "  {}  {:+} std dev  profit {:.2} USD",
                currency, sigmas, profit
            )?;
        }
        Ok(())
    }
}
