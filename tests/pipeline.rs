//! End-to-end pipeline tests: parse, clean, annotate, report.

use airscope::data::{columns, CleanCache, DataCleaner, DatasetLoader, DatasetSource};
use airscope::geo::annotate_continents;
use airscope::report::DatasetReport;

const DATASET: &str = "\
City,Country,AQI Value,CO AQI Value,Ozone AQI Value,NO2 AQI Value,PM2.5 AQI Value
Hanoi,Viet Nam,40,1,30,2,35
Oslo,Norway,45,1,10,1,8
Sao Paulo,Brazil,50,2,20,2,40
Cairo,Egypt,,3,60,3,90
Delhi,India,55,3,40,4,120
Lagos,Nigeria,60,2,30,2,70
Sydney,Australia,65,1,15,1,12
Lima,Peru,70,2,25,2,45
Toronto,Canada,75,1,20,1,15
Berlin,Germany,80,1,18,1,14
Gotham,Atlantis,9000,5,80,5,300
";

fn cleaned() -> polars::prelude::DataFrame {
    let parsed = DatasetLoader::read_csv_bytes(DATASET.as_bytes()).unwrap();
    DataCleaner::clean(&parsed).unwrap()
}

#[test]
fn cleaning_repairs_gaps_and_drops_the_outlier() {
    let table = cleaned();

    // The missing Cairo value interpolates to 52.5; only Gotham's 9000
    // falls outside the IQR fences.
    assert_eq!(table.height(), 10);
    assert_eq!(table.column(columns::AQI).unwrap().null_count(), 0);

    let aqi: Vec<f64> = table
        .column(columns::AQI)
        .unwrap()
        .f64()
        .unwrap()
        .into_iter()
        .flatten()
        .collect();
    assert!((aqi[3] - 52.5).abs() < 1e-9);
    assert!(aqi.iter().all(|&v| v < 9000.0));
}

#[test]
fn surviving_rows_keep_their_input_order() {
    let table = cleaned();
    let cities: Vec<String> = table
        .column(columns::CITY)
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .map(|v| v.unwrap().to_string())
        .collect();
    assert_eq!(cities[0], "Hanoi");
    assert_eq!(cities[9], "Berlin");
    assert!(!cities.contains(&"Gotham".to_string()));
}

#[test]
fn annotation_buckets_every_country() {
    let annotated = annotate_continents(&cleaned()).unwrap();
    let continents: Vec<String> = annotated
        .column(columns::CONTINENT)
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .map(|v| v.unwrap().to_string())
        .collect();

    assert_eq!(continents[0], "Asia");
    assert_eq!(continents[2], "South America");
    assert_eq!(continents[6], "Oceania");
}

#[test]
fn report_summarizes_the_cleaned_table() {
    let table = cleaned();
    let report = DatasetReport::build("dataset.csv", &table).unwrap();

    assert_eq!(report.rows, 10);
    assert_eq!(report.hotspots.len(), 5);
    assert_eq!(report.hotspots[0].city, "Berlin");
    assert_eq!(report.pollutants.len(), 4);
    assert!(report.continents.len() >= 5);
}

#[test]
fn cache_returns_the_same_table_without_reparsing() {
    let mut cache = CleanCache::new();
    let source = DatasetSource::memory("dataset.csv", DATASET.as_bytes());

    let first = cache.get_or_clean(&source).unwrap();
    let second = cache.get_or_clean(&source).unwrap();

    assert_eq!(cache.len(), 1);
    assert_eq!(first.height(), 10);
    assert!(first.equals(&second));
}
