//! Weighted portfolio returns and their compounded value path.

use chrono::NaiveDate;
use polars::prelude::*;
use tracing::debug;

use crate::error::Result;
use crate::series::{ReturnSeries, ScalarSeries};
use crate::weights::NormalizedWeights;

/// Growth of one unit invested just before the first return.
///
/// The first point already includes one period of compounding.
#[derive(Debug, Clone, PartialEq)]
pub struct CumulativePath {
    inner: ScalarSeries,
}

impl CumulativePath {
    /// Wraps precomputed values, e.g. a path read back from a report.
    pub fn new(dates: Vec<NaiveDate>, values: Vec<f64>) -> Result<Self> {
        Ok(Self {
            inner: ScalarSeries::new(dates, values)?,
        })
    }

    pub fn dates(&self) -> &[NaiveDate] {
        self.inner.dates()
    }

    pub fn values(&self) -> &[f64] {
        self.inner.values()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn first(&self) -> Option<(NaiveDate, f64)> {
        self.inner.iter().next()
    }

    pub fn last(&self) -> Option<(NaiveDate, f64)> {
        self.inner.iter().last()
    }

    /// Total simple return over the path, `last - 1`.
    pub fn total_return(&self) -> Option<f64> {
        self.last().map(|(_, value)| value - 1.0)
    }

    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        self.inner.to_dataframe("cumulative")
    }
}

/// Per-row weighted sum of the asset returns, `Σ w[a] * r[a, t]`.
///
/// Every weighted symbol must be a column of `series`; extra columns are ignored.
pub fn weighted_returns(series: &ReturnSeries, weights: &NormalizedWeights) -> Result<ScalarSeries> {
    weighted_returns_in(series, weights, 0..series.len())
}

pub(crate) fn weighted_returns_in(
    series: &ReturnSeries,
    weights: &NormalizedWeights,
    rows: std::ops::Range<usize>,
) -> Result<ScalarSeries> {
    let columns = weights
        .iter()
        .map(|(symbol, weight)| Ok((series.column(symbol)?, weight)))
        .collect::<Result<Vec<_>>>()?;

    let values = rows
        .clone()
        .map(|row| {
            columns
                .iter()
                .map(|(returns, weight)| weight * returns[row])
                .sum::<f64>()
        })
        .collect();

    Ok(ScalarSeries::from_parts(series.dates()[rows].to_vec(), values))
}

/// Running product of `1 + r` over a return series.
pub fn compound(returns: &ScalarSeries) -> CumulativePath {
    let values = returns
        .values()
        .iter()
        .scan(1.0, |acc, r| {
            *acc *= 1.0 + r;
            Some(*acc)
        })
        .collect();

    CumulativePath {
        inner: ScalarSeries::from_parts(returns.dates().to_vec(), values),
    }
}

/// Buy-and-hold value path of a weighted basket.
pub fn compute_cumulative_path(
    series: &ReturnSeries,
    weights: &NormalizedWeights,
) -> Result<CumulativePath> {
    let returns = weighted_returns(series, weights)?;
    let path = compound(&returns);
    debug!(
        rows = path.len(),
        final_value = ?path.last().map(|(_, v)| v),
        "compounded portfolio returns"
    );
    Ok(path)
}
