//! Statistics Calculator Module
//! Descriptive statistics and quantiles over dataset columns.

use polars::prelude::*;
use rayon::prelude::*;
use serde::Serialize;
use statrs::statistics::Statistics;

use crate::data::columns;
use crate::geo::Continent;

/// Multiplier applied to the IQR when fencing outliers.
pub const IQR_FENCE_FACTOR: f64 = 1.5;

/// Descriptive statistics for one numeric column (or a slice of it).
#[derive(Debug, Clone, Serialize)]
pub struct ColumnSummary {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub median: f64,
    pub p05: f64,
    pub p95: f64,
}

impl Default for ColumnSummary {
    fn default() -> Self {
        Self {
            count: 0,
            mean: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            max: f64::NAN,
            median: f64::NAN,
            p05: f64::NAN,
            p95: f64::NAN,
        }
    }
}

/// Handles statistical calculations over cleaned tables.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Compute descriptive statistics for an array of values.
    pub fn summarize(values: &[f64]) -> ColumnSummary {
        let n = values.len();
        if n == 0 {
            return ColumnSummary::default();
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let median = if n % 2 == 0 {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        } else {
            sorted[n / 2]
        };

        ColumnSummary {
            count: n,
            mean: values.mean(),
            std: if n > 1 { values.std_dev() } else { 0.0 },
            min: sorted[0],
            max: sorted[n - 1],
            median,
            p05: Self::percentile(&sorted, 5.0),
            p95: Self::percentile(&sorted, 95.0),
        }
    }

    /// Calculate percentile using linear interpolation (NumPy compatible).
    pub fn percentile(sorted_values: &[f64], p: f64) -> f64 {
        let n = sorted_values.len();
        if n == 0 {
            return f64::NAN;
        }
        if n == 1 {
            return sorted_values[0];
        }

        let rank = (p / 100.0) * (n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = (rank.ceil() as usize).min(n - 1);
        let frac = rank - lower as f64;

        if lower == upper {
            sorted_values[lower]
        } else {
            sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
        }
    }

    /// First and third quartile of an unsorted slice.
    pub fn quartiles(values: &[f64]) -> (f64, f64) {
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        (
            Self::percentile(&sorted, 25.0),
            Self::percentile(&sorted, 75.0),
        )
    }

    /// Tukey fences `[Q1 - 1.5*IQR, Q3 + 1.5*IQR]` used for outlier removal.
    pub fn iqr_fences(values: &[f64]) -> (f64, f64) {
        let (q1, q3) = Self::quartiles(values);
        let iqr = q3 - q1;
        (q1 - IQR_FENCE_FACTOR * iqr, q3 + IQR_FENCE_FACTOR * iqr)
    }

    /// Percentage of historical values at or below `x`. Positions a live
    /// reading against the historical distribution.
    pub fn percentile_rank(values: &[f64], x: f64) -> f64 {
        if values.is_empty() {
            return f64::NAN;
        }
        let at_or_below = values.iter().filter(|&&v| v <= x).count();
        100.0 * at_or_below as f64 / values.len() as f64
    }

    /// Extract the non-null values of a numeric column as f64.
    pub fn column_values(df: &DataFrame, column: &str) -> Vec<f64> {
        df.column(column)
            .ok()
            .and_then(|col| col.cast(&DataType::Float64).ok())
            .map(|col| {
                col.f64()
                    .ok()
                    .map(|ca| ca.into_iter().filter_map(|v| v).collect())
                    .unwrap_or_default()
            })
            .unwrap_or_default()
    }

    /// AQI summaries per continent bucket, computed in parallel.
    ///
    /// Requires the table to carry the annotated `Continent` column; empty
    /// buckets are omitted from the result.
    pub fn continent_summaries(df: &DataFrame) -> Vec<(Continent, ColumnSummary)> {
        if df.column(columns::CONTINENT).is_err() {
            return Vec::new();
        }

        Continent::ALL
            .par_iter()
            .filter_map(|&continent| {
                let bucket = df
                    .clone()
                    .lazy()
                    .filter(col(columns::CONTINENT).eq(lit(continent.name())))
                    .collect()
                    .ok()?;

                let values = Self::column_values(&bucket, columns::AQI);
                if values.is_empty() {
                    return None;
                }
                Some((continent, Self::summarize(&values)))
            })
            .collect()
    }
}
