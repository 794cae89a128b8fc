//! airscope - air-quality dataset core
//!
//! Loads historical per-city AQI datasets from CSV, repairs missing values,
//! removes statistical outliers, classifies rows by continent and prepares
//! the derived data (summaries, gauge bands, hotspot selections) consumed by
//! an external presentation layer.

pub mod charts;
pub mod data;
pub mod geo;
pub mod report;
pub mod stats;

pub use data::{CleanCache, DataCleaner, DatasetLoader, DatasetSource};
pub use geo::{classify, Continent};
pub use report::DatasetReport;
