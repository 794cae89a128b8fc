//! Hotspot Map Module
//! Prepares the point set, label selection and hotspot list for the map view.

use polars::prelude::*;
use serde::Serialize;

use super::category::color_for_aqi;
use super::ChartError;
use crate::data::columns;
use crate::geo::Continent;

/// Hard cap on plotted points; larger selections are thinned first.
pub const MAX_MAP_POINTS: usize = 500;

/// Country labels shown on the world map.
const WORLD_LABEL_LIMIT: usize = 30;
/// Country labels shown on a regional map.
const REGION_LABEL_LIMIT: usize = 50;

/// One entry of the "worst cities" side list.
#[derive(Debug, Clone, Serialize)]
pub struct HotspotEntry {
    pub city: String,
    pub country: String,
    pub aqi: f64,
    pub color: &'static str,
}

/// Data behind one rendering of the hotspot map.
pub struct HotspotMap {
    /// Map scope string for the geo widget.
    pub scope: &'static str,
    /// Point rows surviving the AQI range filter, thinned to the cap.
    pub points: DataFrame,
    /// Countries that get a text label, highest AQI first, deduplicated.
    pub label_countries: Vec<String>,
    /// Worst cities among the plotted points, highest AQI first.
    pub hotspots: Vec<HotspotEntry>,
}

impl HotspotMap {
    /// Build the map data for a region selection and inclusive AQI range.
    pub fn build(
        df: &DataFrame,
        region: Option<Continent>,
        aqi_range: (f64, f64),
        hotspot_count: usize,
    ) -> Result<Self, ChartError> {
        for required in [columns::CITY, columns::COUNTRY, columns::AQI] {
            if df.column(required).is_err() {
                return Err(ChartError::MissingColumn(required.to_string()));
            }
        }

        let (low, high) = aqi_range;
        let in_range = df
            .clone()
            .lazy()
            .filter(
                col(columns::AQI)
                    .gt_eq(lit(low))
                    .and(col(columns::AQI).lt_eq(lit(high))),
            )
            .collect()?;

        let points = Self::thin_points(&in_range)?;

        let label_limit = if region.is_none() {
            WORLD_LABEL_LIMIT
        } else {
            REGION_LABEL_LIMIT
        };

        Ok(Self {
            scope: region.map(|c| c.map_scope()).unwrap_or("world"),
            label_countries: Self::pick_label_countries(&points, label_limit)?,
            hotspots: Self::pick_hotspots(&points, hotspot_count)?,
            points,
        })
    }

    /// Thin the point set to the cap with an even row stride, keeping the
    /// selection deterministic for a given input.
    fn thin_points(df: &DataFrame) -> Result<DataFrame, ChartError> {
        let height = df.height();
        if height <= MAX_MAP_POINTS {
            return Ok(df.clone());
        }

        let indices: Vec<IdxSize> = (0..MAX_MAP_POINTS)
            .map(|i| (i * height / MAX_MAP_POINTS) as IdxSize)
            .collect();
        let taken = df.take(&IdxCa::from_vec("idx".into(), indices))?;
        log::debug!("thinned map points from {} to {}", height, taken.height());
        Ok(taken)
    }

    /// First occurrence per country, then the top `limit` by AQI.
    fn pick_label_countries(df: &DataFrame, limit: usize) -> Result<Vec<String>, ChartError> {
        let country_col = df.column(columns::COUNTRY)?.cast(&DataType::String)?;
        let countries = country_col.str()?;
        let aqi_col = df.column(columns::AQI)?.cast(&DataType::Float64)?;
        let aqi = aqi_col.f64()?;

        let mut seen: Vec<(String, f64)> = Vec::new();
        for i in 0..df.height() {
            let (Some(country), Some(value)) = (countries.get(i), aqi.get(i)) else {
                continue;
            };
            if seen.iter().any(|(c, _)| c == country) {
                continue;
            }
            seen.push((country.to_string(), value));
        }

        seen.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        seen.truncate(limit);
        Ok(seen.into_iter().map(|(c, _)| c).collect())
    }

    /// Worst `count` cities among the plotted points.
    fn pick_hotspots(df: &DataFrame, count: usize) -> Result<Vec<HotspotEntry>, ChartError> {
        let city_col = df.column(columns::CITY)?.cast(&DataType::String)?;
        let cities = city_col.str()?;
        let country_col = df.column(columns::COUNTRY)?.cast(&DataType::String)?;
        let countries = country_col.str()?;
        let aqi_col = df.column(columns::AQI)?.cast(&DataType::Float64)?;
        let aqi = aqi_col.f64()?;

        let mut rows: Vec<HotspotEntry> = (0..df.height())
            .filter_map(|i| {
                let value = aqi.get(i)?;
                Some(HotspotEntry {
                    city: cities.get(i).unwrap_or("").to_string(),
                    country: countries.get(i).unwrap_or("").to_string(),
                    aqi: value,
                    color: color_for_aqi(value),
                })
            })
            .collect();

        rows.sort_by(|a, b| b.aqi.partial_cmp(&a.aqi).unwrap_or(std::cmp::Ordering::Equal));
        rows.truncate(count);
        Ok(rows)
    }
}
