//! Dataset Report Module
//! Assembles the cleaned-dataset summary consumed by the terminal binary
//! (and, as JSON, by anything else).

use polars::prelude::*;
use serde::Serialize;
use std::fmt::Write as _;
use thiserror::Error;

use crate::charts::{
    pollutant_shares, AqiCategory, ChartError, HotspotEntry, HotspotMap, PollutantShare,
};
use crate::data::columns;
use crate::geo::{annotate_continents, GeoError};
use crate::stats::{ColumnSummary, StatsCalculator};

#[derive(Error, Debug)]
pub enum ReportError {
    #[error(transparent)]
    Geo(#[from] GeoError),
    #[error(transparent)]
    Chart(#[from] ChartError),
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
}

/// How many worst cities the report lists.
const HOTSPOT_COUNT: usize = 5;

#[derive(Debug, Clone, Serialize)]
pub struct CategoryCount {
    pub label: &'static str,
    pub color: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContinentBucket {
    pub continent: &'static str,
    pub stats: ColumnSummary,
}

/// Summary of one cleaned dataset. Sections that need columns the table
/// does not have are left empty rather than failing the whole report.
#[derive(Debug, Serialize)]
pub struct DatasetReport {
    pub source: String,
    pub rows: usize,
    pub columns: usize,
    pub aqi: Option<ColumnSummary>,
    pub categories: Vec<CategoryCount>,
    pub continents: Vec<ContinentBucket>,
    pub hotspots: Vec<HotspotEntry>,
    pub pollutants: Vec<PollutantShare>,
}

impl DatasetReport {
    pub fn build(source: &str, df: &DataFrame) -> Result<Self, ReportError> {
        let aqi_values = StatsCalculator::column_values(df, columns::AQI);
        let aqi = (!aqi_values.is_empty()).then(|| StatsCalculator::summarize(&aqi_values));

        let categories = if aqi_values.is_empty() {
            Vec::new()
        } else {
            AqiCategory::ALL
                .iter()
                .map(|category| CategoryCount {
                    label: category.label(),
                    color: category.color(),
                    count: aqi_values
                        .iter()
                        .filter(|&&v| AqiCategory::from_value(v) == *category)
                        .count(),
                })
                .collect()
        };

        let continents = match annotate_continents(df) {
            Ok(annotated) => StatsCalculator::continent_summaries(&annotated)
                .into_iter()
                .map(|(continent, stats)| ContinentBucket {
                    continent: continent.name(),
                    stats,
                })
                .collect(),
            Err(GeoError::MissingColumn(_)) => Vec::new(),
            Err(err) => return Err(err.into()),
        };

        let hotspots = match HotspotMap::build(df, None, (0.0, 500.0), HOTSPOT_COUNT) {
            Ok(map) => map.hotspots,
            Err(ChartError::MissingColumn(_)) => Vec::new(),
            Err(err) => return Err(err.into()),
        };

        let pollutants = match pollutant_shares(df) {
            Ok(shares) => shares,
            Err(ChartError::MissingColumn(_)) => Vec::new(),
            Err(err) => return Err(err.into()),
        };

        Ok(Self {
            source: source.to_string(),
            rows: df.height(),
            columns: df.width(),
            aqi,
            categories,
            continents,
            hotspots,
            pollutants,
        })
    }

    /// Plain-text rendering for the terminal.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Dataset: {}", self.source);
        let _ = writeln!(out, "Rows: {}   Columns: {}", self.rows, self.columns);

        if let Some(aqi) = &self.aqi {
            let _ = writeln!(out);
            let _ = writeln!(
                out,
                "AQI: mean {:.1}, median {:.1}, p05 {:.1}, p95 {:.1}, range [{:.0}, {:.0}]",
                aqi.mean, aqi.median, aqi.p05, aqi.p95, aqi.min, aqi.max
            );
        }

        if !self.categories.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "Severity:");
            for category in &self.categories {
                let _ = writeln!(out, "  {:<32} {:>8}", category.label, category.count);
            }
        }

        if !self.continents.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "Continents:");
            for bucket in &self.continents {
                let _ = writeln!(
                    out,
                    "  {:<16} n={:<7} mean {:.1}, median {:.1}",
                    bucket.continent, bucket.stats.count, bucket.stats.mean, bucket.stats.median
                );
            }
        }

        if !self.hotspots.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "Hotspots:");
            for (rank, spot) in self.hotspots.iter().enumerate() {
                let _ = writeln!(
                    out,
                    "  {}. {}, {} - AQI {:.0}",
                    rank + 1,
                    spot.city,
                    spot.country,
                    spot.aqi
                );
            }
        }

        if !self.pollutants.is_empty() {
            let _ = writeln!(out);
            let shares: Vec<String> = self
                .pollutants
                .iter()
                .map(|p| format!("{} {:.1}", p.pollutant, p.mean))
                .collect();
            let _ = writeln!(out, "Pollutant means: {}", shares.join(" | "));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_frame() -> DataFrame {
        DataFrame::new(vec![
            Column::new(columns::CITY.into(), vec!["Hanoi", "Oslo", "Delhi"]),
            Column::new(
                columns::COUNTRY.into(),
                vec!["Viet Nam", "Norway", "India"],
            ),
            Column::new(columns::AQI.into(), vec![150.0, 20.0, 310.0]),
            Column::new(columns::CO_AQI.into(), vec![2.0, 1.0, 6.0]),
            Column::new(columns::OZONE_AQI.into(), vec![30.0, 10.0, 90.0]),
            Column::new(columns::NO2_AQI.into(), vec![2.0, 1.0, 3.0]),
            Column::new(columns::PM25_AQI.into(), vec![110.0, 8.0, 200.0]),
        ])
        .unwrap()
    }

    #[test]
    fn test_full_report() {
        let report = DatasetReport::build("sample.csv", &sample_frame()).unwrap();

        assert_eq!(report.rows, 3);
        assert_eq!(report.aqi.as_ref().unwrap().count, 3);
        assert_eq!(report.categories.len(), 6);
        assert_eq!(report.continents.len(), 2);
        assert_eq!(report.hotspots[0].city, "Delhi");
        assert_eq!(report.pollutants.len(), 4);

        let text = report.render_text();
        assert!(text.contains("Rows: 3"));
        assert!(text.contains("Hotspots:"));
    }

    #[test]
    fn test_category_counts() {
        let report = DatasetReport::build("sample.csv", &sample_frame()).unwrap();
        let good = report
            .categories
            .iter()
            .find(|c| c.label == "Good")
            .unwrap();
        assert_eq!(good.count, 1);

        let hazardous = report
            .categories
            .iter()
            .find(|c| c.label == "Hazardous")
            .unwrap();
        assert_eq!(hazardous.count, 1);
    }

    #[test]
    fn test_sections_degrade_when_columns_are_missing() {
        let df = DataFrame::new(vec![Column::new("Humidity".into(), vec![1.0, 2.0])]).unwrap();
        let report = DatasetReport::build("bare.csv", &df).unwrap();

        assert!(report.aqi.is_none());
        assert!(report.categories.is_empty());
        assert!(report.continents.is_empty());
        assert!(report.hotspots.is_empty());
        assert!(report.pollutants.is_empty());
        assert!(report.render_text().contains("Rows: 2"));
    }

    #[test]
    fn test_report_serializes_to_json() {
        let report = DatasetReport::build("sample.csv", &sample_frame()).unwrap();
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"hotspots\""));
    }
}
