//! Pollutant Breakdown Module
//! Mean pollutant shares for the donut chart and per-country city profiles.

use polars::prelude::*;
use serde::Serialize;
use statrs::statistics::Statistics;

use super::ChartError;
use crate::data::columns;
use crate::stats::StatsCalculator;

/// The four sub-index columns contributing to the breakdown, with their
/// display labels.
pub const POLLUTANTS: [(&str, &str); 4] = [
    ("CO", columns::CO_AQI),
    ("Ozone", columns::OZONE_AQI),
    ("NO2", columns::NO2_AQI),
    ("PM2.5", columns::PM25_AQI),
];

/// Mean sub-index of one pollutant across the table.
#[derive(Debug, Clone, Serialize)]
pub struct PollutantShare {
    pub pollutant: &'static str,
    pub mean: f64,
}

/// Mean of each pollutant sub-index, in fixed pollutant order.
pub fn pollutant_shares(df: &DataFrame) -> Result<Vec<PollutantShare>, ChartError> {
    POLLUTANTS
        .iter()
        .map(|&(pollutant, column)| {
            if df.column(column).is_err() {
                return Err(ChartError::MissingColumn(column.to_string()));
            }
            let values = StatsCalculator::column_values(df, column);
            let mean = if values.is_empty() {
                f64::NAN
            } else {
                values.mean()
            };
            Ok(PollutantShare { pollutant, mean })
        })
        .collect()
}

/// One city row of a country's pollution profile.
#[derive(Debug, Clone, Serialize)]
pub struct CityProfile {
    pub city: String,
    pub aqi: f64,
    pub pm25: f64,
}

/// Per-city AQI and PM2.5 values for one country, sorted by ascending AQI
/// (the order the area chart plots them in).
pub fn country_profile(df: &DataFrame, country: &str) -> Result<Vec<CityProfile>, ChartError> {
    for required in [columns::CITY, columns::COUNTRY, columns::AQI, columns::PM25_AQI] {
        if df.column(required).is_err() {
            return Err(ChartError::MissingColumn(required.to_string()));
        }
    }

    let filtered = df
        .clone()
        .lazy()
        .filter(col(columns::COUNTRY).eq(lit(country)))
        .collect()?;

    let city_col = filtered.column(columns::CITY)?.cast(&DataType::String)?;
    let cities = city_col.str()?;
    let aqi_col = filtered.column(columns::AQI)?.cast(&DataType::Float64)?;
    let aqi = aqi_col.f64()?;
    let pm25_col = filtered.column(columns::PM25_AQI)?.cast(&DataType::Float64)?;
    let pm25 = pm25_col.f64()?;

    let mut profile: Vec<CityProfile> = (0..filtered.height())
        .filter_map(|i| {
            Some(CityProfile {
                city: cities.get(i).unwrap_or("").to_string(),
                aqi: aqi.get(i)?,
                pm25: pm25.get(i).unwrap_or(f64::NAN),
            })
        })
        .collect();

    profile.sort_by(|a, b| a.aqi.partial_cmp(&b.aqi).unwrap_or(std::cmp::Ordering::Equal));
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_frame() -> DataFrame {
        DataFrame::new(vec![
            Column::new(columns::CITY.into(), vec!["A", "B", "C"]),
            Column::new(columns::COUNTRY.into(), vec!["India", "India", "Norway"]),
            Column::new(columns::AQI.into(), vec![200.0, 100.0, 20.0]),
            Column::new(columns::CO_AQI.into(), vec![2.0, 4.0, 6.0]),
            Column::new(columns::OZONE_AQI.into(), vec![30.0, 60.0, 90.0]),
            Column::new(columns::NO2_AQI.into(), vec![1.0, 2.0, 3.0]),
            Column::new(columns::PM25_AQI.into(), vec![150.0, 80.0, 10.0]),
        ])
        .unwrap()
    }

    #[test]
    fn test_pollutant_shares_are_column_means() {
        let shares = pollutant_shares(&sample_frame()).unwrap();
        assert_eq!(shares.len(), 4);
        assert_eq!(shares[0].pollutant, "CO");
        assert!((shares[0].mean - 4.0).abs() < 1e-9);
        assert!((shares[1].mean - 60.0).abs() < 1e-9);
        assert!((shares[3].mean - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_shares_require_all_pollutant_columns() {
        let df = DataFrame::new(vec![Column::new(columns::CO_AQI.into(), vec![1.0])]).unwrap();
        assert!(matches!(
            pollutant_shares(&df),
            Err(ChartError::MissingColumn(_))
        ));
    }

    #[test]
    fn test_country_profile_is_sorted_by_aqi() {
        let profile = country_profile(&sample_frame(), "India").unwrap();
        assert_eq!(profile.len(), 2);
        assert_eq!(profile[0].city, "B");
        assert!((profile[0].pm25 - 80.0).abs() < 1e-9);
        assert_eq!(profile[1].city, "A");
    }

    #[test]
    fn test_country_profile_for_absent_country_is_empty() {
        assert!(country_profile(&sample_frame(), "Chad").unwrap().is_empty());
    }
}
