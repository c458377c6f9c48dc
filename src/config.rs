//! TOML configuration for the comparison binary.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::portfolio::{Portfolio, Strategy, DEFAULT_BENCHMARK};
use crate::rebalance::Cadence;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Log level filter, overridden by `RUST_LOG`
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_benchmark")]
    pub benchmark: String,
    /// Benchmark label in reports, the ticker when unset
    #[serde(default)]
    pub benchmark_name: Option<String>,
    /// Name of the date column in both return files
    #[serde(default = "default_date_column")]
    pub date_column: String,
    /// Rebalancing cadence codes to evaluate besides buy-and-hold
    #[serde(default = "default_cadences")]
    pub cadences: Vec<String>,
    pub data: DataConfig,
    pub weights: Vec<WeightEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    pub portfolio_returns: PathBuf,
    pub benchmark_returns: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightEntry {
    pub symbol: String,
    pub weight: f64,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_name() -> String {
    "MVO Portfolio".to_string()
}

fn default_benchmark() -> String {
    DEFAULT_BENCHMARK.to_string()
}

fn default_date_column() -> String {
    "Date".to_string()
}

fn default_cadences() -> Vec<String> {
    Cadence::ALL.iter().map(|c| c.code().to_string()).collect()
}

impl Config {
    /// Loads a config file. Relative data paths resolve against the file's directory.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let mut config = Self::from_toml(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        if let Some(dir) = path.parent() {
            config.data.portfolio_returns = dir.join(&config.data.portfolio_returns);
            config.data.benchmark_returns = dir.join(&config.data.benchmark_returns);
        }
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn portfolio(&self) -> Result<Portfolio> {
        let builder = self
            .weights
            .iter()
            .fold(Portfolio::builder(), |builder, entry| {
                builder.add_asset(&entry.symbol, entry.weight)
            });
        let builder = builder.name(&self.name).benchmark(&self.benchmark);
        let builder = match &self.benchmark_name {
            Some(name) => builder.benchmark_name(name),
            None => builder,
        };
        Ok(builder.build()?)
    }

    /// Buy-and-hold followed by one rebalanced strategy per configured cadence.
    pub fn strategies(&self) -> Result<Vec<Strategy>> {
        let mut strategies = vec![Strategy::BuyAndHold];
        for code in &self.cadences {
            let cadence: Cadence = code.parse()?;
            strategies.push(Strategy::Rebalanced(cadence));
        }
        Ok(strategies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
benchmark = "^NSEI"
benchmark_name = "NIFTY 50"
cadences = ["M", "2Q"]

[data]
portfolio_returns = "selected_stock_returns.csv"
benchmark_returns = "nifty_returns.csv"

[[weights]]
symbol = "HINDUNILVR.NS"
weight = 0.2

[[weights]]
symbol = "INFY.NS"
weight = 0.0949
"#;

    #[test]
    fn test_parse_with_defaults() {
        let config = Config::from_toml(SAMPLE).unwrap();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.date_column, "Date");
        assert_eq!(config.weights.len(), 2);
        assert_eq!(config.weights[0].symbol, "HINDUNILVR.NS");
    }

    #[test]
    fn test_strategies() {
        let config = Config::from_toml(SAMPLE).unwrap();
        assert_eq!(
            config.strategies().unwrap(),
            vec![
                Strategy::BuyAndHold,
                Strategy::Rebalanced(Cadence::Monthly),
                Strategy::Rebalanced(Cadence::SemiAnnual),
            ]
        );
    }

    #[test]
    fn test_unknown_cadence() {
        let mut config = Config::from_toml(SAMPLE).unwrap();
        config.cadences.push("W".to_string());
        assert!(config.strategies().is_err());
    }

    #[test]
    fn test_portfolio_from_config() {
        let portfolio = Config::from_toml(SAMPLE).unwrap().portfolio().unwrap();
        assert_eq!(portfolio.name, "MVO Portfolio");
        assert_eq!(portfolio.benchmark.symbol, "^NSEI");
        assert_eq!(portfolio.benchmark_name, "NIFTY 50");
        let weights = portfolio.normalized_weights().unwrap();
        assert!((weights.total() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_weights_rejected() {
        assert!(Config::from_toml("[data]\nportfolio_returns = \"a\"\nbenchmark_returns = \"b\"\n").is_err());
    }

    #[test]
    fn test_minimal_config() {
        let config = Config::from_toml(
            r#"
log_level = "info"
benchmark = "^NSEI"
date_column = "Date"
cadences = ["M", "Q", "2Q"]

[data]
portfolio_returns = "selected_stock_returns.csv"
benchmark_returns = "nifty_returns.csv"

[[weights]]
symbol = "HDFCBANK.NS"
weight = 0.1366
"#,
        )
        .unwrap();
        assert_eq!(config.benchmark_name, None);
        assert_eq!(config.portfolio().unwrap().benchmark_name, "^NSEI");
        assert_eq!(config.strategies().unwrap().len(), 4);
    }

    #[test]
    fn test_weights_table_form_rejected() {
        let table_form = SAMPLE
            .split("[[weights]]")
            .next()
            .unwrap()
            .to_string()
            + "[weights]\n\"HDFCBANK.NS\" = 0.1366\n";
        assert!(Config::from_toml(&table_form).is_err());
    }

    #[test]
    fn test_default_cadences() {
        let config = Config::from_toml(&SAMPLE.replace("cadences = [\"M\", \"2Q\"]", "")).unwrap();
        assert_eq!(config.cadences, vec!["M", "Q", "2Q"]);
    }
}
