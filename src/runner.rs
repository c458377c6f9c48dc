//! Concurrent evaluation of several strategies over the same inputs.

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use futures::{stream::FuturesUnordered, StreamExt};
use tracing::error;

use crate::error::PerfError;
use crate::portfolio::{Portfolio, Strategy};
use crate::report::PerformanceReport;
use crate::series::ReturnSeries;

pub type Outcome = (Strategy, Result<PerformanceReport, PerfError>);

/// Evaluates every strategy on a blocking thread. Outcomes keep the order of `strategies`.
pub async fn evaluate_strategies(
    portfolio: Arc<Portfolio>,
    returns: Arc<ReturnSeries>,
    benchmark: Arc<ReturnSeries>,
    strategies: &[Strategy],
) -> Result<Vec<Outcome>> {
    let mut futures: FuturesUnordered<_> = strategies
        .iter()
        .copied()
        .enumerate()
        .map(|(index, strategy)| {
            let portfolio = Arc::clone(&portfolio);
            let returns = Arc::clone(&returns);
            let benchmark = Arc::clone(&benchmark);
            async move {
                let report = tokio::task::spawn_blocking(move || {
                    portfolio.evaluate(&returns, &benchmark, strategy)
                })
                .await;
                (index, strategy, report)
            }
        })
        .collect();

    let mut outcomes: Vec<Option<Outcome>> = vec![None; strategies.len()];
    while let Some((index, strategy, result)) = futures.next().await {
        let report = result.with_context(|| format!("{} task panicked", strategy))?;
        outcomes[index] = Some((strategy, report));
    }
    Ok(outcomes.into_iter().flatten().collect())
}

/// Splits outcomes into reports, failing if any strategy failed.
///
/// Every failure is written to stderr regardless of the log filter.
pub fn collect_reports(outcomes: Vec<Outcome>) -> Result<Vec<PerformanceReport>> {
    let mut reports = Vec::with_capacity(outcomes.len());
    let mut failed = Vec::new();
    for (strategy, outcome) in outcomes {
        match outcome {
            Ok(report) => reports.push(report),
            Err(e) => {
                let kind = if e.is_data_error() { "input data" } else { "configuration" };
                error!(%strategy, kind, "evaluation failed: {}", e);
                eprintln!("{}: {} error: {}", strategy, kind, e);
                failed.push(strategy.to_string());
            }
        }
    }
    if !failed.is_empty() {
        return Err(anyhow!(
            "{} of {} strategies failed: {}",
            failed.len(),
            failed.len() + reports.len(),
            failed.join(", ")
        ));
    }
    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rebalance::Cadence;
    use chrono::NaiveDate;

    fn inputs(days: usize) -> (Arc<ReturnSeries>, Arc<ReturnSeries>) {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let dates: Vec<_> = (0..days)
            .map(|i| start + chrono::Duration::days(i as i64))
            .collect();
        let returns = ReturnSeries::new(dates.clone())
            .unwrap()
            .with_column("A", vec![0.001; days])
            .unwrap();
        let benchmark = ReturnSeries::new(dates)
            .unwrap()
            .with_column("^NSEI", vec![0.0005; days])
            .unwrap();
        (Arc::new(returns), Arc::new(benchmark))
    }

    fn portfolio() -> Arc<Portfolio> {
        Arc::new(Portfolio::builder().add_asset("A", 1.0).build().unwrap())
    }

    #[tokio::test]
    async fn test_outcomes_keep_strategy_order() {
        let (returns, benchmark) = inputs(100);
        let strategies = [
            Strategy::BuyAndHold,
            Strategy::Rebalanced(Cadence::Monthly),
            Strategy::Rebalanced(Cadence::Quarterly),
        ];
        let outcomes = evaluate_strategies(portfolio(), returns, benchmark, &strategies)
            .await
            .unwrap();
        let order: Vec<_> = outcomes.iter().map(|(s, _)| *s).collect();
        assert_eq!(order, strategies);

        let reports = collect_reports(outcomes).unwrap();
        assert_eq!(reports.len(), 3);
    }

    #[tokio::test]
    async fn test_failed_strategy_fails_the_run() {
        // 40 days: two monthly buckets, but a single half-year bucket.
        let (returns, benchmark) = inputs(40);
        let strategies = [
            Strategy::BuyAndHold,
            Strategy::Rebalanced(Cadence::SemiAnnual),
        ];
        let outcomes = evaluate_strategies(portfolio(), returns, benchmark, &strategies)
            .await
            .unwrap();
        assert!(matches!(
            outcomes[1].1,
            Err(PerfError::InvalidCadence(_))
        ));

        let err = collect_reports(outcomes).unwrap_err();
        assert_eq!(
            err.to_string(),
            "1 of 2 strategies failed: Rebalanced 2Q"
        );
    }

    #[test]
    fn test_missing_data_fails_the_run() {
        let outcomes = vec![(
            Strategy::BuyAndHold,
            Err(PerfError::MissingAssetData {
                symbol: "A".to_string(),
            }),
        )];
        assert!(collect_reports(outcomes).is_err());
    }
}
