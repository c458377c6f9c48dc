//! Error types for the performance computations.

use thiserror::Error;

/// Precondition violations raised by the return-aggregation pipeline.
///
/// None of these are transient: the same inputs always produce the same error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PerfError {
    /// Weight mapping is empty, sums to zero, or holds a negative/non-finite entry.
    #[error("invalid weights: {0}")]
    InvalidWeights(String),

    /// A weighted asset has no column in the return series.
    #[error("missing return data for asset {symbol}")]
    MissingAssetData { symbol: String },

    /// Unknown cadence code, or the cadence yields fewer than two boundaries.
    #[error("invalid cadence: {0}")]
    InvalidCadence(String),

    /// First and last timestamps of the path coincide.
    #[error("insufficient span: first and last timestamps are both {0}")]
    InsufficientSpan(chrono::NaiveDate),

    #[error("series needs at least 2 points, got {0}")]
    EmptySeries(usize),

    /// Fractional power of a negative number has no real value.
    #[error("cumulative value {0} is negative")]
    NegativeCumulativeValue(f64),

    /// Compounding overflowed or otherwise left the real line.
    #[error("cumulative value {0} is not finite")]
    NonFiniteCumulativeValue(f64),

    /// Index or columns failed validation when building a series.
    #[error("invalid series: {0}")]
    InvalidSeries(String),
}

pub type Result<T> = std::result::Result<T, PerfError>;

impl PerfError {
    /// True for errors describing the input data rather than the requested computation.
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            PerfError::MissingAssetData { .. }
                | PerfError::EmptySeries(_)
                | PerfError::InvalidSeries(_)
                | PerfError::NegativeCumulativeValue(_)
                | PerfError::NonFiniteCumulativeValue(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PerfError::MissingAssetData {
            symbol: "INFY.NS".to_string(),
        };
        assert_eq!(err.to_string(), "missing return data for asset INFY.NS");

        let err = PerfError::EmptySeries(1);
        assert_eq!(err.to_string(), "series needs at least 2 points, got 1");
    }

    #[test]
    fn test_is_data_error() {
        assert!(PerfError::EmptySeries(0).is_data_error());
        assert!(!PerfError::InvalidCadence("W".into()).is_data_error());
        assert!(!PerfError::InvalidWeights("empty".into()).is_data_error());
    }
}
