use tracing::info;

use crate::annualize::compute_annual_return;
use crate::assets::Asset;
use crate::compounder::{compound, compute_cumulative_path, CumulativePath};
use crate::error::Result;
use crate::rebalance::{compute_rebalanced_returns, Cadence};
use crate::report::PerformanceReport;
use crate::series::ReturnSeries;
use crate::weights::{NormalizedWeights, WeightVector};

/// A fixed-weight basket compared against a benchmark index.
///
/// Holds configuration only; every path is recomputed from the returns passed in.
#[derive(Debug, Clone)]
pub struct Portfolio {
    pub name: String,
    pub constituents: Vec<Asset>,
    pub benchmark: Asset,
    /// Label for the benchmark row of a report
    pub benchmark_name: String,
    pub target_weights: WeightVector,
}

impl Portfolio {
    pub fn builder() -> PortfolioBuilder {
        PortfolioBuilder::new()
    }

    pub fn normalized_weights(&self) -> Result<NormalizedWeights> {
        self.target_weights.normalize()
    }

    /// Value path of the basket under `strategy`.
    pub fn cumulative_path(&self, returns: &ReturnSeries, strategy: Strategy) -> Result<CumulativePath> {
        match strategy {
            Strategy::BuyAndHold => compute_cumulative_path(returns, &self.normalized_weights()?),
            Strategy::Rebalanced(cadence) => {
                let rebalanced = compute_rebalanced_returns(returns, &self.target_weights, cadence)?;
                Ok(compound(&rebalanced))
            }
        }
    }

    pub fn benchmark_path(&self, benchmark_returns: &ReturnSeries) -> Result<CumulativePath> {
        let returns = benchmark_returns.benchmark(&self.benchmark.symbol)?;
        Ok(compound(&returns))
    }

    pub fn evaluate(
        &self,
        returns: &ReturnSeries,
        benchmark_returns: &ReturnSeries,
        strategy: Strategy,
    ) -> Result<PerformanceReport> {
        let portfolio_path = self.cumulative_path(returns, strategy)?;
        let portfolio_annual = compute_annual_return(&portfolio_path)?;
        let benchmark_path = self.benchmark_path(benchmark_returns)?;
        let benchmark_annual = compute_annual_return(&benchmark_path)?;

        let report = PerformanceReport {
            portfolio_name: format!("{} ({})", self.name, strategy),
            portfolio_path,
            portfolio_annual,
            benchmark_symbol: self.benchmark.symbol.clone(),
            benchmark_name: self.benchmark_name.clone(),
            benchmark_path,
            benchmark_annual,
        };
        info!(
            portfolio = %report.portfolio_name,
            annual = %report.portfolio_annual,
            benchmark = %report.benchmark_annual,
            "evaluated portfolio"
        );
        Ok(report)
    }
}

pub struct PortfolioBuilder {
    name: String,
    weights: Vec<(String, f64)>,
    benchmark: String,
    benchmark_name: Option<String>,
}

impl Default for PortfolioBuilder {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            weights: Vec::new(),
            benchmark: DEFAULT_BENCHMARK.to_string(),
            benchmark_name: None,
        }
    }
}

impl PortfolioBuilder {
    pub fn new() -> PortfolioBuilder {
        PortfolioBuilder::default()
    }

    /// Validates the weights and builds the portfolio.
    pub fn build(self) -> Result<Portfolio> {
        let target_weights = WeightVector::new(self.weights)?;
        target_weights.normalize()?;
        let constituents = target_weights.symbols().map(Asset::constituent).collect();
        let benchmark_name = self.benchmark_name.unwrap_or_else(|| self.benchmark.clone());
        Ok(Portfolio {
            name: self.name,
            constituents,
            benchmark: Asset::benchmark(&self.benchmark),
            benchmark_name,
            target_weights,
        })
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn add_asset(mut self, ticker: &str, raw_weight: f64) -> Self {
        self.weights.push((ticker.to_string(), raw_weight));
        self
    }

    pub fn benchmark(mut self, ticker: &str) -> Self {
        self.benchmark = ticker.to_string();
        self
    }

    /// Display name for the benchmark, e.g. "NIFTY 50" for `^NSEI`. Defaults to the ticker.
    pub fn benchmark_name(mut self, name: &str) -> Self {
        self.benchmark_name = Some(name.to_string());
        self
    }
}

/// How target weights are held over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    BuyAndHold,
    Rebalanced(Cadence),
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::BuyAndHold => write!(f, "No Rebalancing"),
            Strategy::Rebalanced(cadence) => write!(f, "Rebalanced {}", cadence),
        }
    }
}

const DEFAULT_NAME: &str = "MVO Portfolio";
pub const DEFAULT_BENCHMARK: &str = "^NSEI";
