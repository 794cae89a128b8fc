//! Severity Category Module
//! AQI color stops and the PM2.5 health levels behind the advisory card.

use serde::Serialize;

/// AQI color scale stops: color applies from its threshold upward.
pub const AQI_COLOR_STOPS: [(f64, &str); 6] = [
    (0.0, "#00e400"),
    (50.0, "#ffff00"),
    (100.0, "#ff7e00"),
    (150.0, "#ff0000"),
    (200.0, "#8f3f97"),
    (500.0, "#7e0023"),
];

/// Color for an AQI value: the stop with the highest threshold not above
/// the value.
pub fn color_for_aqi(value: f64) -> &'static str {
    AQI_COLOR_STOPS
        .iter()
        .rev()
        .find(|(threshold, _)| value >= *threshold)
        .map(|(_, color)| *color)
        .unwrap_or(AQI_COLOR_STOPS[0].1)
}

/// Composite AQI severity bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AqiCategory {
    Good,
    Moderate,
    UnhealthySensitive,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

impl AqiCategory {
    pub const ALL: [AqiCategory; 6] = [
        AqiCategory::Good,
        AqiCategory::Moderate,
        AqiCategory::UnhealthySensitive,
        AqiCategory::Unhealthy,
        AqiCategory::VeryUnhealthy,
        AqiCategory::Hazardous,
    ];

    pub fn from_value(aqi: f64) -> Self {
        if aqi < 50.0 {
            AqiCategory::Good
        } else if aqi < 100.0 {
            AqiCategory::Moderate
        } else if aqi < 150.0 {
            AqiCategory::UnhealthySensitive
        } else if aqi < 200.0 {
            AqiCategory::Unhealthy
        } else if aqi < 300.0 {
            AqiCategory::VeryUnhealthy
        } else {
            AqiCategory::Hazardous
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AqiCategory::Good => "Good",
            AqiCategory::Moderate => "Moderate",
            AqiCategory::UnhealthySensitive => "Unhealthy for Sensitive Groups",
            AqiCategory::Unhealthy => "Unhealthy",
            AqiCategory::VeryUnhealthy => "Very Unhealthy",
            AqiCategory::Hazardous => "Hazardous",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            AqiCategory::Good => "#00e400",
            AqiCategory::Moderate => "#ffff00",
            AqiCategory::UnhealthySensitive => "#ff7e00",
            AqiCategory::Unhealthy => "#ff0000",
            AqiCategory::VeryUnhealthy => "#8f3f97",
            AqiCategory::Hazardous => "#7e0023",
        }
    }
}

/// PM2.5 health level with EPA concentration breakpoints (µg/m³),
/// the thresholds behind the health advisory card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Pm25Level {
    Good,
    Moderate,
    UnhealthySensitive,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

impl Pm25Level {
    pub fn from_concentration(pm25: f64) -> Self {
        if pm25 >= 250.5 {
            Pm25Level::Hazardous
        } else if pm25 >= 150.5 {
            Pm25Level::VeryUnhealthy
        } else if pm25 >= 55.5 {
            Pm25Level::Unhealthy
        } else if pm25 >= 35.5 {
            Pm25Level::UnhealthySensitive
        } else if pm25 >= 12.1 {
            Pm25Level::Moderate
        } else {
            Pm25Level::Good
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Pm25Level::Good => "Good",
            Pm25Level::Moderate => "Moderate",
            Pm25Level::UnhealthySensitive => "Unhealthy for Sensitive Groups",
            Pm25Level::Unhealthy => "Unhealthy",
            Pm25Level::VeryUnhealthy => "Very Unhealthy",
            Pm25Level::Hazardous => "Hazardous",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Pm25Level::Good => "#00e400",
            Pm25Level::Moderate => "#ffff00",
            Pm25Level::UnhealthySensitive => "#ff7e00",
            Pm25Level::Unhealthy => "#ff0000",
            Pm25Level::VeryUnhealthy => "#8f3f97",
            Pm25Level::Hazardous => "#7e0023",
        }
    }
}
