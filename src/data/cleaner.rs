//! Data Cleaner Module
//! Missing-value repair and IQR outlier removal for air-quality tables.

use polars::prelude::*;
use thiserror::Error;

use super::{columns, is_numeric_dtype};
use crate::stats::StatsCalculator;

#[derive(Error, Debug)]
pub enum CleanError {
    #[error("Failed to parse CSV: {0}")]
    Parse(#[from] PolarsError),
    #[error("Cleaning produced an empty table")]
    EmptyResult,
}

/// Repairs and filters a freshly parsed air-quality table.
///
/// The pipeline runs in two fixed steps: missing-value repair
/// (interpolate, then forward-fill, then backward-fill) followed by
/// IQR outlier removal on the composite AQI column. Row order of the
/// surviving rows matches the input.
pub struct DataCleaner;

impl DataCleaner {
    pub fn clean(df: &DataFrame) -> Result<DataFrame, CleanError> {
        let input_rows = df.height();

        let filled = Self::fill_missing(df)?;
        let cleaned = Self::remove_aqi_outliers(&filled)?;

        if input_rows > 0 && cleaned.height() == 0 {
            return Err(CleanError::EmptyResult);
        }

        log::info!(
            "cleaned table: {} rows in, {} rows out",
            input_rows,
            cleaned.height()
        );
        Ok(cleaned)
    }

    /// Fill missing cells column by column.
    ///
    /// Numeric columns are linearly interpolated between the nearest
    /// non-missing neighbors by row position, then forward-filled, then
    /// backward-filled; a repaired column is materialized as Float64.
    /// String columns get the forward/backward fill without interpolation.
    /// A column with no non-missing value at all is left untouched.
    pub fn fill_missing(df: &DataFrame) -> Result<DataFrame, CleanError> {
        let mut out = df.clone();
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        for name in &names {
            let column = df.column(name)?;
            if column.null_count() == 0 {
                continue;
            }

            if is_numeric_dtype(column.dtype()) {
                let as_f64 = column.cast(&DataType::Float64)?;
                let mut values: Vec<Option<f64>> = as_f64.f64()?.into_iter().collect();
                if values.iter().all(|v| v.is_none()) {
                    continue;
                }

                interpolate_linear(&mut values);
                fill_forward(&mut values);
                fill_backward(&mut values);

                let repaired: Vec<f64> = values.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect();
                out.with_column(Column::new(name.as_str().into(), repaired))?;
                log::debug!("repaired numeric column '{}'", name);
            } else if matches!(column.dtype(), DataType::String) {
                let mut values: Vec<Option<String>> = column
                    .str()?
                    .into_iter()
                    .map(|v| v.map(|s| s.to_string()))
                    .collect();
                if values.iter().all(|v| v.is_none()) {
                    continue;
                }

                fill_forward(&mut values);
                fill_backward(&mut values);

                out.with_column(Column::new(name.as_str().into(), values))?;
                log::debug!("filled text column '{}'", name);
            }
        }

        Ok(out)
    }

    /// Drop rows whose AQI falls outside `[Q1 - 1.5*IQR, Q3 + 1.5*IQR]`.
    ///
    /// Quartiles are computed over the post-repair column. Tables without
    /// an `AQI Value` column pass through unchanged.
    pub fn remove_aqi_outliers(df: &DataFrame) -> Result<DataFrame, CleanError> {
        let Ok(aqi) = df.column(columns::AQI) else {
            log::debug!("no '{}' column, skipping outlier removal", columns::AQI);
            return Ok(df.clone());
        };

        let values: Vec<f64> = aqi
            .cast(&DataType::Float64)?
            .f64()?
            .into_iter()
            .filter_map(|v| v)
            .collect();
        if values.is_empty() {
            return Ok(df.clone());
        }

        let (low, high) = StatsCalculator::iqr_fences(&values);
        let filtered = df
            .clone()
            .lazy()
            .filter(
                col(columns::AQI)
                    .gt_eq(lit(low))
                    .and(col(columns::AQI).lt_eq(lit(high))),
            )
            .collect()?;

        let dropped = df.height() - filtered.height();
        if dropped > 0 {
            log::info!(
                "dropped {} outlier rows outside [{:.2}, {:.2}]",
                dropped,
                low,
                high
            );
        }
        Ok(filtered)
    }
}

/// Linear interpolation between the nearest non-missing neighbors.
/// Cells before the first or after the last anchor are left missing.
fn interpolate_linear(values: &mut [Option<f64>]) {
    let anchors: Vec<(usize, f64)> = values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.map(|value| (i, value)))
        .collect();

    for pair in anchors.windows(2) {
        let ((start, v0), (end, v1)) = (pair[0], pair[1]);
        if end - start < 2 {
            continue;
        }
        let span = (end - start) as f64;
        for i in (start + 1)..end {
            let frac = (i - start) as f64 / span;
            values[i] = Some(v0 + (v1 - v0) * frac);
        }
    }
}

fn fill_forward<T: Clone>(values: &mut [Option<T>]) {
    let mut last: Option<T> = None;
    for v in values.iter_mut() {
        match v {
            Some(current) => last = Some(current.clone()),
            None => *v = last.clone(),
        }
    }
}

fn fill_backward<T: Clone>(values: &mut [Option<T>]) {
    let mut next: Option<T> = None;
    for v in values.iter_mut().rev() {
        match v {
            Some(current) => next = Some(current.clone()),
            None => *v = next.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aqi_frame(values: Vec<Option<f64>>) -> DataFrame {
        DataFrame::new(vec![Column::new(columns::AQI.into(), values)]).unwrap()
    }

    fn aqi_values(df: &DataFrame) -> Vec<f64> {
        df.column(columns::AQI)
            .unwrap()
            .cast(&DataType::Float64)
            .unwrap()
            .f64()
            .unwrap()
            .into_iter()
            .filter_map(|v| v)
            .collect()
    }

    #[test]
    fn test_interior_gap_is_interpolated() {
        let df = aqi_frame(vec![Some(10.0), None, Some(30.0)]);
        let filled = DataCleaner::fill_missing(&df).unwrap();
        assert_eq!(aqi_values(&filled), vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_leading_gap_is_backfilled() {
        let df = aqi_frame(vec![None, Some(10.0), Some(20.0)]);
        let filled = DataCleaner::fill_missing(&df).unwrap();
        assert_eq!(aqi_values(&filled), vec![10.0, 10.0, 20.0]);
    }

    #[test]
    fn test_trailing_gap_is_forward_filled() {
        let df = aqi_frame(vec![Some(10.0), Some(20.0), None]);
        let filled = DataCleaner::fill_missing(&df).unwrap();
        assert_eq!(aqi_values(&filled), vec![10.0, 20.0, 20.0]);
    }

    #[test]
    fn test_uneven_gap_widths() {
        let df = aqi_frame(vec![Some(0.0), None, None, None, Some(8.0)]);
        let filled = DataCleaner::fill_missing(&df).unwrap();
        assert_eq!(aqi_values(&filled), vec![0.0, 2.0, 4.0, 6.0, 8.0]);
    }

    #[test]
    fn test_all_missing_column_is_left_alone() {
        let df = aqi_frame(vec![None, None]);
        let filled = DataCleaner::fill_missing(&df).unwrap();
        assert_eq!(filled.column(columns::AQI).unwrap().null_count(), 2);
    }

    #[test]
    fn test_text_columns_are_filled_without_interpolation() {
        let df = DataFrame::new(vec![
            Column::new(
                columns::COUNTRY.into(),
                vec![None, Some("India"), None, Some("Norway")],
            ),
            Column::new(columns::AQI.into(), vec![50.0, 60.0, 55.0, 58.0]),
        ])
        .unwrap();

        let filled = DataCleaner::fill_missing(&df).unwrap();
        let countries: Vec<String> = filled
            .column(columns::COUNTRY)
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .map(|v| v.unwrap().to_string())
            .collect();
        assert_eq!(countries, vec!["India", "India", "India", "Norway"]);
    }

    #[test]
    fn test_single_far_outlier_is_dropped_order_preserved() {
        let mut values: Vec<Option<f64>> = (0..9).map(|i| Some(100.0 + i as f64)).collect();
        values.insert(4, Some(10_000.0));
        let df = aqi_frame(values);

        let cleaned = DataCleaner::clean(&df).unwrap();
        assert_eq!(cleaned.height(), 9);
        assert_eq!(
            aqi_values(&cleaned),
            (0..9).map(|i| 100.0 + i as f64).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_output_satisfies_fences_of_its_own_column() {
        let raw: Vec<Option<f64>> = vec![
            Some(12.0),
            None,
            Some(55.0),
            Some(700.0),
            Some(43.0),
            Some(41.0),
            None,
            Some(48.0),
            Some(52.0),
            Some(47.0),
        ];
        let cleaned = DataCleaner::clean(&aqi_frame(raw)).unwrap();

        let out = aqi_values(&cleaned);
        let (low, high) = StatsCalculator::iqr_fences(&out);
        assert!(out.iter().all(|&v| v >= low && v <= high));
    }

    #[test]
    fn test_missing_aqi_column_degrades_gracefully() {
        let df = DataFrame::new(vec![Column::new(
            "Humidity".into(),
            vec![Some(40.0), None, Some(60.0)],
        )])
        .unwrap();

        let cleaned = DataCleaner::clean(&df).unwrap();
        assert_eq!(cleaned.height(), 3);
        assert_eq!(cleaned.column("Humidity").unwrap().null_count(), 0);
    }

    #[test]
    fn test_empty_table_passes_through() {
        let df = aqi_frame(Vec::new());
        let cleaned = DataCleaner::clean(&df).unwrap();
        assert_eq!(cleaned.height(), 0);
    }

    #[test]
    fn test_untouched_numeric_columns_keep_their_dtype() {
        let df = DataFrame::new(vec![Column::new(
            columns::AQI.into(),
            vec![100i64, 101, 102, 103],
        )])
        .unwrap();

        let cleaned = DataCleaner::clean(&df).unwrap();
        assert_eq!(cleaned.column(columns::AQI).unwrap().dtype(), &DataType::Int64);
    }
}
