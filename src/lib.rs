//! # fx-scenario-engine
//!
//! FX portfolio valuation and worst-case overnight scenario search.
//!
//! Given a book of spot and option positions in foreign currencies, the
//! engine revalues the portfolio under every combination of discretized
//! next-day spot moves and reports the scenario with the largest loss,
//! ties broken in favor of the less extreme joint shock.
//!
//! ## Architecture
//!
//! - **core** — Foundational types: currency codes and quote conventions,
//!   spot and option positions, market data maps
//! - **pricing** — The option pricer seam and the default closed-form
//!   Garman-Kohlhagen implementation
//! - **scenario** — Move vectors and their lazy Cartesian grid, portfolio
//!   revaluation, the worst-case search
//! - **loader** — CSV currency dataset loading
//! - **simulation** — Random dataset generation for stress testing

pub mod core;
pub mod loader;
pub mod pricing;
pub mod scenario;
pub mod simulation;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::core::currency::CurrencyCode;
    pub use crate::core::market::MarketData;
    pub use crate::core::position::{OptionPosition, Position, SpotPosition};
    pub use crate::loader::{build_portfolio, load_portfolio, CurrencyRecord};
    pub use crate::pricing::{FxOptionPricer, GarmanKohlhagen, OptionType};
    pub use crate::scenario::moves::{MoveGrid, MoveVector, DEFAULT_MOVE_CHOICES};
    pub use crate::scenario::portfolio::{PortfolioScenario, ProfitBreakdown, ScenarioError};
    pub use crate::scenario::search::{ScenarioResult, ScenarioSearch};
}
