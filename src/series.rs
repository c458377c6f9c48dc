//! Date-indexed return series.

use std::ops::Range;

use chrono::NaiveDate;
use polars::prelude::*;

use crate::error::{PerfError, Result};

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

fn check_index(dates: &[NaiveDate]) -> Result<()> {
    if let Some(pair) = dates.windows(2).find(|pair| pair[0] >= pair[1]) {
        return Err(PerfError::InvalidSeries(format!(
            "dates must be strictly increasing, found {} followed by {}",
            pair[0], pair[1]
        )));
    }
    Ok(())
}

fn check_finite(name: &str, dates: &[NaiveDate], values: &[f64]) -> Result<()> {
    if let Some((date, value)) = dates.iter().zip(values).find(|(_, v)| !v.is_finite()) {
        return Err(PerfError::InvalidSeries(format!(
            "{} has non-finite value {} on {}",
            name, value, date
        )));
    }
    Ok(())
}

/// Per-asset daily simple returns, one column per symbol over a shared index.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnSeries {
    dates: Vec<NaiveDate>,
    columns: Vec<(String, Vec<f64>)>,
}

impl ReturnSeries {
    /// Creates a series with an index and no columns yet.
    pub fn new(dates: Vec<NaiveDate>) -> Result<Self> {
        check_index(&dates)?;
        Ok(Self {
            dates,
            columns: Vec::new(),
        })
    }

    pub fn with_column(mut self, symbol: &str, returns: Vec<f64>) -> Result<Self> {
        if returns.len() != self.dates.len() {
            return Err(PerfError::InvalidSeries(format!(
                "column {} has {} rows, index has {}",
                symbol,
                returns.len(),
                self.dates.len()
            )));
        }
        if self.columns.iter().any(|(name, _)| name == symbol) {
            return Err(PerfError::InvalidSeries(format!(
                "duplicate column {}",
                symbol
            )));
        }
        check_finite(symbol, &self.dates, &returns)?;
        self.columns.push((symbol.to_owned(), returns));
        Ok(self)
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn column(&self, symbol: &str) -> Result<&[f64]> {
        self.columns
            .iter()
            .find(|(name, _)| name == symbol)
            .map(|(_, values)| values.as_slice())
            .ok_or_else(|| PerfError::MissingAssetData {
                symbol: symbol.to_owned(),
            })
    }

    /// Extracts one column, typically the benchmark index, as a scalar series.
    pub fn benchmark(&self, symbol: &str) -> Result<ScalarSeries> {
        let values = self.column(symbol)?.to_vec();
        Ok(ScalarSeries::from_parts(self.dates.clone(), values))
    }

    /// Row range whose dates fall in `[start, end)`.
    pub fn window(&self, start: NaiveDate, end: NaiveDate) -> Range<usize> {
        let lo = self.dates.partition_point(|d| *d < start);
        let hi = self.dates.partition_point(|d| *d < end);
        lo..hi.max(lo)
    }
}

/// A single date-indexed column of values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScalarSeries {
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
}

impl ScalarSeries {
    pub fn new(dates: Vec<NaiveDate>, values: Vec<f64>) -> Result<Self> {
        if dates.len() != values.len() {
            return Err(PerfError::InvalidSeries(format!(
                "{} dates for {} values",
                dates.len(),
                values.len()
            )));
        }
        check_index(&dates)?;
        check_finite("series", &dates, &values)?;
        Ok(Self { dates, values })
    }

    /// Pairs an already validated index with values of the same length.
    pub(crate) fn from_parts(dates: Vec<NaiveDate>, values: Vec<f64>) -> Self {
        debug_assert_eq!(dates.len(), values.len());
        Self { dates, values }
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.dates.iter().copied().zip(self.values.iter().copied())
    }

    /// Appends rows that continue the index. Callers guarantee ordering.
    pub(crate) fn extend(&mut self, rows: impl IntoIterator<Item = (NaiveDate, f64)>) {
        for (date, value) in rows {
            debug_assert!(self.dates.last().map_or(true, |last| *last < date));
            self.dates.push(date);
            self.values.push(value);
        }
    }

    pub fn to_dataframe(&self, value_column: &str) -> PolarsResult<DataFrame> {
        let dates: Vec<String> = self
            .dates
            .iter()
            .map(|d| d.format(DATE_FORMAT).to_string())
            .collect();
        df!(
            "date" => dates,
            value_column => self.values.clone()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_rejects_unordered_index() {
        let err = ReturnSeries::new(vec![day(2), day(1)]).unwrap_err();
        assert!(matches!(err, PerfError::InvalidSeries(_)));

        let err = ReturnSeries::new(vec![day(1), day(1)]).unwrap_err();
        assert!(matches!(err, PerfError::InvalidSeries(_)));
    }

    #[test]
    fn test_column_lookup() {
        let series = ReturnSeries::new(vec![day(1), day(2)])
            .unwrap()
            .with_column("A", vec![0.01, 0.02])
            .unwrap();
        assert_eq!(series.column("A").unwrap(), &[0.01, 0.02]);
        assert_eq!(
            series.column("B").unwrap_err(),
            PerfError::MissingAssetData {
                symbol: "B".to_string()
            }
        );
    }

    #[test]
    fn test_column_length_and_duplicates() {
        let series = ReturnSeries::new(vec![day(1), day(2)]).unwrap();
        assert!(series.clone().with_column("A", vec![0.01]).is_err());
        let series = series.with_column("A", vec![0.0, 0.0]).unwrap();
        assert!(series.with_column("A", vec![0.0, 0.0]).is_err());
    }

    #[test]
    fn test_window_is_half_open() {
        let series = ReturnSeries::new(vec![day(1), day(3), day(5), day(7)]).unwrap();
        assert_eq!(series.window(day(3), day(7)), 1..3);
        assert_eq!(series.window(day(2), day(4)), 1..2);
        assert_eq!(series.window(day(8), day(9)), 4..4);
    }

    #[test]
    fn test_benchmark_and_dataframe() {
        let series = ReturnSeries::new(vec![day(1), day(2)])
            .unwrap()
            .with_column("^NSEI", vec![0.01, -0.01])
            .unwrap();
        let bench = series.benchmark("^NSEI").unwrap();
        assert_eq!(bench.values(), &[0.01, -0.01]);

        let df = bench.to_dataframe("return").unwrap();
        assert_eq!(df.shape(), (2, 2));
    }

    #[test]
    fn test_non_finite_returns_rejected() {
        let series = ReturnSeries::new(vec![day(1), day(2), day(3)]).unwrap();
        let err = series
            .clone()
            .with_column("A", vec![0.01, f64::NAN, 0.0])
            .unwrap_err();
        assert!(matches!(err, PerfError::InvalidSeries(_)));
        assert!(series.with_column("A", vec![f64::INFINITY, 0.0, 0.0]).is_err());

        assert!(ScalarSeries::new(vec![day(1)], vec![f64::NEG_INFINITY]).is_err());
    }

    #[test]
    fn test_scalar_series_length_mismatch() {
        assert!(ScalarSeries::new(vec![day(1)], vec![]).is_err());
    }
}
