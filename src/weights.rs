//! Target allocations.

use polars::prelude::*;

use crate::error::{PerfError, Result};

/// Raw target weights in a fixed asset order. Never mutated after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightVector {
    entries: Vec<(String, f64)>,
}

impl WeightVector {
    pub fn new<S, I>(entries: I) -> Result<Self>
    where
        S: Into<String>,
        I: IntoIterator<Item = (S, f64)>,
    {
        let mut checked: Vec<(String, f64)> = Vec::new();
        for (symbol, weight) in entries {
            let symbol = symbol.into();
            if !weight.is_finite() || weight < 0.0 {
                return Err(PerfError::InvalidWeights(format!(
                    "weight for {} is {}",
                    symbol, weight
                )));
            }
            if checked.iter().any(|(s, _)| *s == symbol) {
                return Err(PerfError::InvalidWeights(format!(
                    "{} listed twice",
                    symbol
                )));
            }
            checked.push((symbol, weight));
        }
        Ok(Self { entries: checked })
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(s, _)| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Scales every weight by the total so the result sums to one.
    pub fn normalize(&self) -> Result<NormalizedWeights> {
        if self.entries.is_empty() {
            return Err(PerfError::InvalidWeights("no assets".to_string()));
        }
        let total: f64 = self.entries.iter().map(|(_, w)| w).sum();
        if total <= 0.0 {
            return Err(PerfError::InvalidWeights(
                "weights sum to zero".to_string(),
            ));
        }
        Ok(NormalizedWeights {
            entries: self
                .entries
                .iter()
                .map(|(s, w)| (s.clone(), w / total))
                .collect(),
        })
    }
}

/// Weights that sum to one, in the order of the originating [`WeightVector`].
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedWeights {
    entries: Vec<(String, f64)>,
}

impl NormalizedWeights {
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(s, w)| (s.as_str(), *w))
    }

    pub fn get(&self, symbol: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(s, _)| s == symbol)
            .map(|(_, w)| *w)
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w).sum()
    }

    /// Renormalizes; a no-op up to rounding.
    pub fn normalize(&self) -> Result<NormalizedWeights> {
        WeightVector {
            entries: self.entries.clone(),
        }
        .normalize()
    }

    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let tickers: Vec<_> = self.entries.iter().map(|(s, _)| s.clone()).collect();
        let weights: Vec<_> = self.entries.iter().map(|(_, w)| *w).collect();
        df!(
            "ticker" => tickers,
            "weight" => weights
        )
    }
}
