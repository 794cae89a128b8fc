//! CSV Dataset Loader Module
//! Parses air-quality CSV sources into Polars DataFrames.

use polars::prelude::*;
use std::io::Cursor;
use std::path::PathBuf;
use thiserror::Error;

use super::is_numeric_dtype;

/// Schema inference window for CSV parsing.
const INFER_SCHEMA_ROWS: usize = 10000;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("Source contains no columns")]
    NoData,
}

/// Loads CSV sources and answers column-level questions about the table.
pub struct DatasetLoader {
    df: Option<DataFrame>,
    file_path: Option<PathBuf>,
}

impl Default for DatasetLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetLoader {
    pub fn new() -> Self {
        Self {
            df: None,
            file_path: None,
        }
    }

    /// Parse a CSV file from disk. The header row is required.
    pub fn read_csv(file_path: &str) -> Result<DataFrame, LoaderError> {
        let df = LazyCsvReader::new(file_path)
            .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        if df.width() == 0 {
            return Err(LoaderError::NoData);
        }
        log::info!(
            "parsed {}: {} rows, {} columns",
            file_path,
            df.height(),
            df.width()
        );
        Ok(df)
    }

    /// Parse a CSV table from an in-memory byte buffer (e.g. an upload).
    pub fn read_csv_bytes(bytes: &[u8]) -> Result<DataFrame, LoaderError> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
            .with_ignore_errors(true)
            .into_reader_with_file_handle(Cursor::new(bytes))
            .finish()?;

        if df.width() == 0 {
            return Err(LoaderError::NoData);
        }
        log::debug!("parsed buffer: {} rows, {} columns", df.height(), df.width());
        Ok(df)
    }

    /// Load a CSV file and retain it for column queries.
    pub fn load_csv(&mut self, file_path: &str) -> Result<&DataFrame, LoaderError> {
        self.file_path = Some(PathBuf::from(file_path));
        self.df = Some(Self::read_csv(file_path)?);
        self.df.as_ref().ok_or(LoaderError::NoData)
    }

    /// Load a CSV table from bytes and retain it for column queries.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<&DataFrame, LoaderError> {
        self.file_path = None;
        self.df = Some(Self::read_csv_bytes(bytes)?);
        self.df.as_ref().ok_or(LoaderError::NoData)
    }

    /// Get list of column names from the loaded DataFrame.
    pub fn get_columns(&self) -> Vec<String> {
        self.df
            .as_ref()
            .map(|df| {
                df.get_column_names()
                    .iter()
                    .map(|s| s.to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Get list of numeric column names.
    pub fn get_numeric_columns(&self) -> Vec<String> {
        let Some(df) = &self.df else {
            return Vec::new();
        };

        df.get_columns()
            .iter()
            .filter(|col| is_numeric_dtype(col.dtype()))
            .map(|col| col.name().to_string())
            .collect()
    }

    /// Get sorted unique values from a column (e.g. the city picker list).
    pub fn get_unique_values(&self, column: &str) -> Vec<String> {
        let Some(df) = &self.df else {
            return Vec::new();
        };

        df.column(column)
            .ok()
            .and_then(|col| col.unique().ok())
            .map(|unique| {
                let series = unique.as_materialized_series();
                let mut values: Vec<String> = (0..series.len())
                    .filter_map(|i| {
                        let val = series.get(i).ok()?;
                        if val.is_null() {
                            None
                        } else {
                            Some(val.to_string().trim_matches('"').to_string())
                        }
                    })
                    .collect();
                values.sort();
                values
            })
            .unwrap_or_default()
    }

    /// Case-insensitive substring search over a column's unique values,
    /// capped at `limit` matches. Backs the city search box.
    pub fn search_values(&self, column: &str, query: &str, limit: usize) -> Vec<String> {
        let needle = query.to_lowercase();
        self.get_unique_values(column)
            .into_iter()
            .filter(|v| v.to_lowercase().contains(&needle))
            .take(limit)
            .collect()
    }

    /// Get the number of rows in the DataFrame.
    pub fn get_row_count(&self) -> usize {
        self.df.as_ref().map(|df| df.height()).unwrap_or(0)
    }

    /// Get a reference to the loaded DataFrame.
    pub fn get_dataframe(&self) -> Option<&DataFrame> {
        self.df.as_ref()
    }

    /// Get file path, if the table came from disk.
    pub fn get_file_path(&self) -> Option<&PathBuf> {
        self.file_path.as_ref()
    }
}
