//! Gauge Configuration Module
//! Static band specifications for the pollutant gauges.

use serde::Serialize;
use statrs::statistics::Statistics;

use crate::data::columns;

/// One colored range on a gauge axis.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct GaugeBand {
    pub low: f64,
    pub high: f64,
    pub color: &'static str,
}

const fn band(low: f64, high: f64, color: &'static str) -> GaugeBand {
    GaugeBand { low, high, color }
}

/// Static configuration of one pollutant gauge: source column, axis
/// maximum, display unit and colored bands.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct GaugeSpec {
    pub key: &'static str,
    pub column: &'static str,
    pub max: f64,
    pub unit: &'static str,
    pub bands: &'static [GaugeBand],
}

pub const AQI_GAUGE: GaugeSpec = GaugeSpec {
    key: "AQI",
    column: columns::AQI,
    max: 500.0,
    unit: " AQI",
    bands: &[
        band(0.0, 50.0, "#00e400"),
        band(50.0, 100.0, "#ffff00"),
        band(100.0, 150.0, "#ff7e00"),
        band(150.0, 200.0, "#ff0000"),
        band(200.0, 300.0, "#8f3f97"),
        band(300.0, 500.0, "#7e0023"),
    ],
};

pub const CO_GAUGE: GaugeSpec = GaugeSpec {
    key: "CO",
    column: columns::CO_AQI,
    max: 200.0,
    unit: " µg/m³",
    bands: &[
        band(0.0, 40.0, "#27ae60"),
        band(40.0, 100.0, "#f1c40f"),
        band(100.0, 200.0, "#e74c3c"),
    ],
};

pub const NO2_GAUGE: GaugeSpec = GaugeSpec {
    key: "NO2",
    column: columns::NO2_AQI,
    max: 50.0,
    unit: " µg/m³",
    bands: &[
        band(0.0, 9.0, "#27ae60"),
        band(9.0, 30.0, "#f1c40f"),
        band(30.0, 50.0, "#e74c3c"),
    ],
};

pub const OZONE_GAUGE: GaugeSpec = GaugeSpec {
    key: "Ozone",
    column: columns::OZONE_AQI,
    max: 200.0,
    unit: " µg/m³",
    bands: &[
        band(0.0, 60.0, "#27ae60"),
        band(60.0, 120.0, "#f1c40f"),
        band(120.0, 200.0, "#e74c3c"),
    ],
};

pub const PM25_GAUGE: GaugeSpec = GaugeSpec {
    key: "PM2.5",
    column: columns::PM25_AQI,
    max: 150.0,
    unit: " µg/m³",
    bands: &[
        band(0.0, 15.0, "#27ae60"),
        band(15.0, 50.0, "#f1c40f"),
        band(50.0, 150.0, "#e74c3c"),
    ],
};

pub const ALL_GAUGES: [GaugeSpec; 5] = [AQI_GAUGE, CO_GAUGE, NO2_GAUGE, OZONE_GAUGE, PM25_GAUGE];

impl GaugeSpec {
    /// Band color for a value. Values past the last band keep its color.
    pub fn band_color(&self, value: f64) -> &'static str {
        self.bands
            .iter()
            .find(|b| value >= b.low && value < b.high)
            .map(|b| b.color)
            .unwrap_or_else(|| self.bands[self.bands.len() - 1].color)
    }
}

/// A current reading positioned against the historical column it is
/// compared to on the gauge (delta against the historical mean).
#[derive(Debug, Clone, Serialize)]
pub struct GaugeReading {
    pub value: f64,
    pub reference: f64,
    pub delta: f64,
}

impl GaugeReading {
    pub fn against(value: f64, historical: &[f64]) -> Self {
        let reference = if historical.is_empty() {
            f64::NAN
        } else {
            historical.mean()
        };
        Self {
            value,
            reference,
            delta: value - reference,
        }
    }
}
