//! Data module - CSV loading, cleaning, caching and discovery

mod cache;
mod catalog;
mod cleaner;
mod loader;

pub use cache::{fingerprint, CacheError, CleanCache, DatasetSource};
pub use catalog::find_csv_files;
pub use cleaner::{CleanError, DataCleaner};
pub use loader::{DatasetLoader, LoaderError};

use polars::prelude::DataType;

/// Well-known column names of the air-quality dataset.
pub mod columns {
    pub const CITY: &str = "City";
    pub const COUNTRY: &str = "Country";
    pub const AQI: &str = "AQI Value";
    pub const CO_AQI: &str = "CO AQI Value";
    pub const OZONE_AQI: &str = "Ozone AQI Value";
    pub const NO2_AQI: &str = "NO2 AQI Value";
    pub const PM25_AQI: &str = "PM2.5 AQI Value";
    pub const CONTINENT: &str = "Continent";
}

pub(crate) fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Float32
            | DataType::Float64
            | DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
    )
}
