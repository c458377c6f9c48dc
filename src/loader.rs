//! CSV ingestion of daily return tables.
//!
//! Expected layout: one date column plus one numeric column per symbol, as
//! written by a `pct_change()`-style export.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use polars::prelude::*;
use tracing::{debug, warn};

use crate::series::{ReturnSeries, DATE_FORMAT};

pub fn read_returns_csv(path: &Path, date_column: &str) -> Result<ReturnSeries> {
    let df = CsvReader::from_path(path)
        .with_context(|| format!("opening {}", path.display()))?
        .has_header(true)
        .finish()
        .with_context(|| format!("parsing {}", path.display()))?;
    debug!(path = %path.display(), shape = ?df.shape(), "read returns csv");
    returns_from_dataframe(&df, date_column)
        .with_context(|| format!("loading returns from {}", path.display()))
}

/// Converts a date column plus numeric columns into a [`ReturnSeries`].
///
/// Rows with a null in any column are dropped, which removes the empty first
/// row a percent-change export leaves behind.
pub fn returns_from_dataframe(df: &DataFrame, date_column: &str) -> Result<ReturnSeries> {
    let complete = df.drop_nulls::<String>(None)?;
    let dropped = df.height() - complete.height();
    if dropped > 0 {
        warn!(dropped, "dropped rows with missing values");
    }

    let dates = complete
        .column(date_column)
        .with_context(|| format!("no date column {:?}", date_column))?
        .cast(&DataType::String)?;
    let dates = dates
        .str()?
        .into_iter()
        .map(|value| parse_date(value.unwrap_or_default()))
        .collect::<Result<Vec<_>>>()?;

    let mut series = ReturnSeries::new(dates)?;
    for name in complete.get_column_names() {
        if name == date_column {
            continue;
        }
        let column = complete.column(name)?.cast(&DataType::Float64)?;
        let values: Vec<f64> = column.f64()?.into_no_null_iter().collect();
        series = series.with_column(name, values)?;
    }
    Ok(series)
}

/// Accepts `YYYY-MM-DD`, optionally followed by a time part.
fn parse_date(value: &str) -> Result<NaiveDate> {
    let day = value.get(..10).unwrap_or(value);
    NaiveDate::parse_from_str(day, DATE_FORMAT).map_err(|e| anyhow!("bad date {:?}: {}", value, e))
}
