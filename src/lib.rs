//! Cumulative performance of a fixed-weight portfolio against a benchmark,
//! held buy-and-hold or rebalanced to target weights on a calendar cadence.

pub mod annualize;
pub mod assets;
pub mod compounder;
pub mod config;
pub mod error;
pub mod loader;
pub mod logging;
pub mod portfolio;
pub mod rebalance;
pub mod report;
pub mod runner;
pub mod series;
pub mod weights;

pub use annualize::{compute_annual_return, AnnualReturn};
pub use assets::{Asset, AssetRole};
pub use compounder::{compound, compute_cumulative_path, weighted_returns, CumulativePath};
pub use error::{PerfError, Result};
pub use portfolio::{Portfolio, PortfolioBuilder, Strategy};
pub use rebalance::{compute_rebalanced_returns, rebalance_boundaries, Cadence};
pub use report::PerformanceReport;
pub use series::{ReturnSeries, ScalarSeries};
pub use weights::{NormalizedWeights, WeightVector};
