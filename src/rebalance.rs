//! Periodic rebalancing to static target weights.
//!
//! Each period is weighted with weights renormalized from the same raw targets,
//! never from weights drifted by the previous period. Within a period the
//! weights are therefore applied afresh every day, which makes the result
//! identical to the buy-and-hold weighted return on the rows it covers.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use tracing::{debug, warn};

use crate::compounder::weighted_returns_in;
use crate::error::{PerfError, Result};
use crate::series::{ReturnSeries, ScalarSeries};
use crate::weights::WeightVector;

/// Calendar frequency at which target weights are reapplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cadence {
    Monthly,
    Quarterly,
    SemiAnnual,
}

impl Cadence {
    pub const ALL: [Cadence; 3] = [Cadence::Monthly, Cadence::Quarterly, Cadence::SemiAnnual];

    /// Width of a calendar bucket in months.
    pub fn months(&self) -> u32 {
        match self {
            Cadence::Monthly => 1,
            Cadence::Quarterly => 3,
            Cadence::SemiAnnual => 6,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Cadence::Monthly => "M",
            Cadence::Quarterly => "Q",
            Cadence::SemiAnnual => "2Q",
        }
    }

    /// Bucket index of `date`, buckets aligned to January.
    fn bucket(&self, date: NaiveDate) -> i64 {
        let month_index = date.year() as i64 * 12 + date.month0() as i64;
        month_index.div_euclid(self.months() as i64)
    }
}

impl fmt::Display for Cadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Cadence {
    type Err = PerfError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "m" | "monthly" => Ok(Cadence::Monthly),
            "q" | "quarterly" => Ok(Cadence::Quarterly),
            "2q" | "semiannual" | "semi-annual" | "half-yearly" => Ok(Cadence::SemiAnnual),
            _ => Err(PerfError::InvalidCadence(format!("unknown code {:?}", s))),
        }
    }
}

/// First available date of every calendar bucket spanned by `dates`.
pub fn rebalance_boundaries(dates: &[NaiveDate], cadence: Cadence) -> Vec<NaiveDate> {
    let mut boundaries = Vec::new();
    let mut current = None;
    for date in dates {
        let bucket = cadence.bucket(*date);
        if current != Some(bucket) {
            boundaries.push(*date);
            current = Some(bucket);
        }
    }
    boundaries
}

/// Weighted daily portfolio returns with targets reapplied every `cadence`.
///
/// Windows are `[B[i], B[i+1])` over consecutive boundaries. Rows on or after
/// the last boundary fall outside every window and are dropped.
pub fn compute_rebalanced_returns(
    series: &ReturnSeries,
    weights: &WeightVector,
    cadence: Cadence,
) -> Result<ScalarSeries> {
    let boundaries = rebalance_boundaries(series.dates(), cadence);
    if boundaries.len() < 2 {
        return Err(PerfError::InvalidCadence(format!(
            "{} cadence yields {} boundaries over {} rows, need at least 2",
            cadence,
            boundaries.len(),
            series.len()
        )));
    }
    debug!(%cadence, periods = boundaries.len() - 1, "rebalancing");

    let mut rebalanced = ScalarSeries::default();
    let mut start = boundaries[0];
    for &end in &boundaries[1..] {
        let targets = weights.normalize()?;
        let period = weighted_returns_in(series, &targets, series.window(start, end))?;
        rebalanced.extend(period.iter());
        start = end;
    }

    let dropped = series.len() - rebalanced.len();
    if dropped > 0 {
        warn!(
            %cadence,
            dropped,
            from = %start,
            "rows after the last rebalance boundary are excluded"
        );
    }
    Ok(rebalanced)
}
