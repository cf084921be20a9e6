use crate::core::currency::CurrencyCode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The standard discretized shock sizes, in standard deviations.
pub const DEFAULT_MOVE_CHOICES: [i32; 5] = [-3, -1, 0, 1, 3];

/// Per-currency shock sizes for one scenario, in whole standard deviations.
///
/// Backed by an ordered map so display and serialization are
/// deterministic.
///
/// # Examples
///
/// ```
/// use fx_scenario_engine::scenario::moves::MoveVector;
///
/// let moves: MoveVector = [("GBP", -3), ("JPY", 1)]
///     .into_iter()
///     .map(|(c, m)| (c.into(), m))
///     .collect();
/// assert_eq!(moves.severity(), 4);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoveVector(BTreeMap<CurrencyCode, i32>);

impl MoveVector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, currency: CurrencyCode, sigmas: i32) {
        self.0.insert(currency, sigmas);
    }

    pub fn get(&self, currency: &CurrencyCode) -> Option<i32> {
        self.0.get(currency).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CurrencyCode, i32)> {
        self.0.iter().map(|(c, &m)| (c, m))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Joint-shock extremeness: the sum of absolute move magnitudes.
    ///
    /// Larger severity means a less plausible simultaneous shock; the
    /// worst-case search prefers the smaller severity among equal losses.
    pub fn severity(&self) -> u32 {
        self.0.values().map(|m| m.unsigned_abs()).sum()
    }
}

impl FromIterator<(CurrencyCode, i32)> for MoveVector {
    fn from_iter<T: IntoIterator<Item = (CurrencyCode, i32)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for MoveVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (currency, sigmas) in &self.0 {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{}:{:+}", currency, sigmas)?;
            first = false;
        }
        Ok(())
    }
}

/// Lazy enumerator of every move combination over a currency list.
///
/// Conceptually the Cartesian product of `choices` over `currencies`,
/// addressed by a mixed-radix index so enumeration is restartable and
/// the index space can be split across workers. The last currency
/// varies fastest.
#[derive(Debug, Clone)]
pub struct MoveGrid {
    currencies: Vec<CurrencyCode>,
    choices: Vec<i32>,
}

impl MoveGrid {
    pub fn new(currencies: Vec<CurrencyCode>, choices: Vec<i32>) -> Self {
        Self {
            currencies,
            choices,
        }
    }

    pub fn with_default_choices(currencies: Vec<CurrencyCode>) -> Self {
        Self::new(currencies, DEFAULT_MOVE_CHOICES.to_vec())
    }

    pub fn currencies(&self) -> &[CurrencyCode] {
        &self.currencies
    }

    pub fn choices(&self) -> &[i32] {
        &self.choices
    }

    /// Number of scenarios in the grid: `|choices| ^ |currencies|`.
    ///
    /// A grid over zero currencies holds exactly one empty vector; a grid
    /// with currencies but no choices is empty.
    pub fn len(&self) -> usize {
        self.choices.len().pow(self.currencies.len() as u32)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Decode the move vector at a given grid index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    pub fn vector_at(&self, index: usize) -> MoveVector {
        assert!(index < self.len(), "grid index {index} out of range");
        let base = self.choices.len();
        let mut moves = MoveVector::new();
        let mut remainder = index;
        for currency in self.currencies.iter().rev() {
            moves.set(currency.clone(), self.choices[remainder % base]);
            remainder /= base;
        }
        moves
    }

    pub fn iter(&self) -> MoveGridIter<'_> {
        MoveGridIter {
            grid: self,
            next: 0,
            len: self.len(),
        }
    }
}

/// Iterator over a [`MoveGrid`], yielding move vectors in index order.
#[derive(Debug, Clone)]
pub struct MoveGridIter<'a> {
    grid: &'a MoveGrid,
    next: usize,
    len: usize,
}

impl Iterator for MoveGridIter<'_> {
    type Item = MoveVector;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.len {
            return None;
        }
        let vector = self.grid.vector_at(self.next);
        self.next += 1;
        Some(vector)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for MoveGridIter<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn currencies(codes: &[&str]) -> Vec<CurrencyCode> {
        codes.iter().map(|c| CurrencyCode::new(*c)).collect()
    }

    #[test]
    fn test_severity_sums_absolute_values() {
        let moves: MoveVector = [("A", 3), ("B", -2), ("C", 0), ("D", 1)]
            .into_iter()
            .map(|(c, m)| (CurrencyCode::new(c), m))
            .collect();
        assert_eq!(moves.severity(), 6);
    }

    #[test]
    fn test_severity_zero_vector() {
        let moves: MoveVector = currencies(&["GBP", "JPY"])
            .into_iter()
            .map(|c| (c, 0))
            .collect();
        assert_eq!(moves.severity(), 0);
    }

    #[test]
    fn test_severity_all_max_magnitude() {
        let moves: MoveVector = currencies(&["A", "B", "C", "D"])
            .into_iter()
            .map(|c| (c, -3))
            .collect();
        assert_eq!(moves.severity(), 12);
    }

    #[test]
    fn test_grid_size() {
        let grid = MoveGrid::with_default_choices(currencies(&["GBP", "JPY", "EUR"]));
        assert_eq!(grid.len(), 125);

        let five = MoveGrid::with_default_choices(currencies(&["A", "B", "C", "D", "E"]));
        assert_eq!(five.len(), 3125);
    }

    #[test]
    fn test_grid_over_no_currencies_is_single_empty_vector() {
        let grid = MoveGrid::with_default_choices(vec![]);
        assert_eq!(grid.len(), 1);
        let all: Vec<_> = grid.iter().collect();
        assert_eq!(all.len(), 1);
        assert!(all[0].is_empty());
    }

    #[test]
    fn test_grid_with_no_choices_is_empty() {
        let grid = MoveGrid::new(currencies(&["GBP"]), vec![]);
        assert_eq!(grid.len(), 0);
        assert!(grid.iter().next().is_none());
    }

    #[test]
    fn test_grid_enumerates_all_distinct_combinations() {
        let grid = MoveGrid::new(currencies(&["GBP", "JPY"]), vec![-1, 0, 1]);
        let all: Vec<_> = grid.iter().collect();
        assert_eq!(all.len(), 9);

        let mut unique = all.clone();
        unique.sort_by_key(|m| format!("{m}"));
        unique.dedup();
        assert_eq!(unique.len(), 9);

        for moves in &all {
            assert_eq!(moves.len(), 2);
        }
    }

    #[test]
    fn test_vector_at_last_currency_varies_fastest() {
        let grid = MoveGrid::new(currencies(&["GBP", "JPY"]), vec![-1, 0, 1]);
        let gbp = CurrencyCode::new("GBP");
        let jpy = CurrencyCode::new("JPY");

        let first = grid.vector_at(0);
        assert_eq!(first.get(&gbp), Some(-1));
        assert_eq!(first.get(&jpy), Some(-1));

        let second = grid.vector_at(1);
        assert_eq!(second.get(&gbp), Some(-1));
        assert_eq!(second.get(&jpy), Some(0));

        let fourth = grid.vector_at(3);
        assert_eq!(fourth.get(&gbp), Some(0));
        assert_eq!(fourth.get(&jpy), Some(-1));
    }

    #[test]
    fn test_iter_matches_vector_at() {
        let grid = MoveGrid::with_default_choices(currencies(&["GBP", "JPY"]));
        for (index, moves) in grid.iter().enumerate() {
            assert_eq!(moves, grid.vector_at(index));
        }
    }

    #[test]
    fn test_display_is_ordered() {
        let moves: MoveVector = [("JPY", 1), ("GBP", -3)]
            .into_iter()
            .map(|(c, m)| (CurrencyCode::new(c), m))
            .collect();
        assert_eq!(format!("{moves}"), "GBP:-3 JPY:+1");
    }
}
