use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use portfolio_perf::config::Config;
use portfolio_perf::loader::read_returns_csv;
use portfolio_perf::logging;
use portfolio_perf::runner::{collect_reports, evaluate_strategies};

#[derive(Parser)]
#[command(name = "portfolio_perf")]
#[command(about = "Compare a fixed-weight portfolio against its benchmark", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the TOML configuration
    #[arg(default_value = "portfolio.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;
    logging::init(&config.log_level)?;

    let portfolio = Arc::new(config.portfolio()?);
    let strategies = config.strategies()?;
    let returns = Arc::new(read_returns_csv(&config.data.portfolio_returns, &config.date_column)?);
    let benchmark = Arc::new(read_returns_csv(&config.data.benchmark_returns, &config.date_column)?);
    info!(
        rows = returns.len(),
        assets = portfolio.constituents.len(),
        benchmark = %portfolio.benchmark,
        "loaded return series"
    );

    let start_time = std::time::Instant::now();
    let outcomes = evaluate_strategies(portfolio, returns, benchmark, &strategies).await?;
    info!(elapsed = ?start_time.elapsed(), "evaluated strategies");

    let reports = collect_reports(outcomes)?;
    for report in reports {
        println!("{}\n", report);
    }
    Ok(())
}
