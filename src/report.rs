//! Portfolio-versus-benchmark comparison.

use std::fmt;

use polars::prelude::*;

use crate::annualize::AnnualReturn;
use crate::compounder::CumulativePath;

#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceReport {
    pub portfolio_name: String,
    pub portfolio_path: CumulativePath,
    pub portfolio_annual: AnnualReturn,
    pub benchmark_symbol: String,
    pub benchmark_name: String,
    pub benchmark_path: CumulativePath,
    pub benchmark_annual: AnnualReturn,
}

impl PerformanceReport {
    /// Portfolio annual return minus benchmark annual return.
    pub fn excess_annual_return(&self) -> f64 {
        self.portfolio_annual.rate - self.benchmark_annual.rate
    }

    pub fn outperformed(&self) -> bool {
        self.excess_annual_return() > 0.0
    }

    /// The metrics table, one row for the portfolio and one for the benchmark.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        df!(
            "Portfolio Type" => [self.portfolio_name.as_str(), self.benchmark_name.as_str()],
            "Annual Return" => [self.portfolio_annual.rate, self.benchmark_annual.rate]
        )
    }
}

impl fmt::Display for PerformanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .portfolio_name
            .len()
            .max(self.benchmark_name.len())
            .max("Portfolio Type".len());
        writeln!(f, "{:<width$}  {:>13}", "Portfolio Type", "Annual Return")?;
        writeln!(
            f,
            "{:<width$}  {:>13}",
            self.portfolio_name,
            self.portfolio_annual.to_string()
        )?;
        write!(
            f,
            "{:<width$}  {:>13}",
            self.benchmark_name,
            self.benchmark_annual.to_string()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn report() -> PerformanceReport {
        let dates = vec![
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        ];
        PerformanceReport {
            portfolio_name: "MVO Portfolio (No Rebalancing)".to_string(),
            portfolio_path: CumulativePath::new(dates.clone(), vec![1.0, 1.1]).unwrap(),
            portfolio_annual: AnnualReturn { rate: 0.1, years: 1.0 },
            benchmark_symbol: "^NSEI".to_string(),
            benchmark_name: "NIFTY 50".to_string(),
            benchmark_path: CumulativePath::new(dates, vec![1.0, 1.05]).unwrap(),
            benchmark_annual: AnnualReturn { rate: 0.05, years: 1.0 },
        }
    }

    #[test]
    fn test_excess_return() {
        let report = report();
        assert!((report.excess_annual_return() - 0.05).abs() < 1e-12);
        assert!(report.outperformed());
    }

    #[test]
    fn test_table_display() {
        let table = report().to_string();
        let lines: Vec<_> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Portfolio Type"));
        assert!(lines[1].starts_with("MVO Portfolio (No Rebalancing)"));
        assert!(lines[1].ends_with("10.00%"));
        assert!(lines[2].starts_with("NIFTY 50"));
        assert!(lines[2].ends_with("5.00%"));
    }

    #[test]
    fn test_table_dataframe() {
        let df = report().to_dataframe().unwrap();
        assert_eq!(df.shape(), (2, 2));
    }
}
