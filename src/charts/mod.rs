//! Charts module - chart-ready data preparation
//!
//! Pure transformations from cleaned tables to the data the presentation
//! layer renders: gauge band specs, severity categories, hotspot map
//! selections and pollutant breakdowns. No rendering happens here.

mod breakdown;
mod category;
mod gauge;
mod map;

pub use breakdown::{country_profile, pollutant_shares, CityProfile, PollutantShare};
pub use category::{color_for_aqi, AqiCategory, Pm25Level, AQI_COLOR_STOPS};
pub use gauge::{
    GaugeBand, GaugeReading, GaugeSpec, ALL_GAUGES, AQI_GAUGE, CO_GAUGE, NO2_GAUGE, OZONE_GAUGE,
    PM25_GAUGE,
};
pub use map::{HotspotEntry, HotspotMap};

use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Required column '{0}' is missing")]
    MissingColumn(String),
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
}
