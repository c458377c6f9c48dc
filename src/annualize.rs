//! Geometric annualization of a cumulative value path.

use std::fmt;

use tracing::debug;

use crate::compounder::CumulativePath;
use crate::error::{PerfError, Result};

pub const DAYS_PER_YEAR: f64 = 365.0;

/// Constant yearly growth rate equivalent to the growth observed over a path.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct AnnualReturn {
    pub rate: f64,
    pub years: f64,
}

impl AnnualReturn {
    pub fn as_percent(&self) -> f64 {
        self.rate * 100.0
    }
}

impl fmt::Display for AnnualReturn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}%", self.as_percent())
    }
}

/// `last^(1 / years) - 1`, with years measured as calendar days / 365.
pub fn compute_annual_return(path: &CumulativePath) -> Result<AnnualReturn> {
    if path.len() < 2 {
        return Err(PerfError::EmptySeries(path.len()));
    }
    let (Some((first_date, _)), Some((last_date, last_value))) = (path.first(), path.last())
    else {
        return Err(PerfError::EmptySeries(path.len()));
    };

    let days = (last_date - first_date).num_days();
    if days <= 0 {
        return Err(PerfError::InsufficientSpan(first_date));
    }
    if !last_value.is_finite() {
        return Err(PerfError::NonFiniteCumulativeValue(last_value));
    }
    if last_value < 0.0 {
        return Err(PerfError::NegativeCumulativeValue(last_value));
    }

    let years = days as f64 / DAYS_PER_YEAR;
    let rate = last_value.powf(1.0 / years) - 1.0;
    debug!(days, years, last_value, rate, "annualized cumulative path");
    Ok(AnnualReturn { rate, years })
}
