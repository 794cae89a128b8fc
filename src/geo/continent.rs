//! Continent Classifier Module
//! Static country-to-continent lookup for the dashboard's region filters.

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

use crate::data::columns;

#[derive(Error, Debug)]
pub enum GeoError {
    #[error("Required column '{0}' is missing")]
    MissingColumn(&'static str),
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
}

/// One of the six fixed continent buckets, plus the fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Continent {
    Asia,
    Europe,
    NorthAmerica,
    SouthAmerica,
    Africa,
    Oceania,
    Others,
}

impl Continent {
    pub const ALL: [Continent; 7] = [
        Continent::Asia,
        Continent::Europe,
        Continent::NorthAmerica,
        Continent::SouthAmerica,
        Continent::Africa,
        Continent::Oceania,
        Continent::Others,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Continent::Asia => "Asia",
            Continent::Europe => "Europe",
            Continent::NorthAmerica => "North America",
            Continent::SouthAmerica => "South America",
            Continent::Africa => "Africa",
            Continent::Oceania => "Oceania",
            Continent::Others => "Others",
        }
    }

    /// Map scope string understood by the geo-chart widget. Buckets without
    /// a dedicated scope fall back to the world view.
    pub fn map_scope(&self) -> &'static str {
        match self {
            Continent::Asia => "asia",
            Continent::Europe => "europe",
            Continent::NorthAmerica => "north america",
            Continent::SouthAmerica => "south america",
            Continent::Africa => "africa",
            Continent::Oceania | Continent::Others => "world",
        }
    }
}

impl fmt::Display for Continent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// Membership lists are a hand-curated snapshot matching the historical
// dataset's country spellings, not a live geopolitical reference. New or
// renamed countries require editing these tables.

const ASIA: &[&str] = &[
    "Afghanistan",
    "Armenia",
    "Azerbaijan",
    "Bahrain",
    "Bangladesh",
    "Bhutan",
    "Cambodia",
    "China",
    "Georgia",
    "India",
    "Indonesia",
    "Iran (Islamic Republic of)",
    "Iraq",
    "Israel",
    "Japan",
    "Jordan",
    "Kazakhstan",
    "Kuwait",
    "Kyrgyzstan",
    "Lao People's Democratic Republic",
    "Lebanon",
    "Malaysia",
    "Maldives",
    "Mongolia",
    "Myanmar",
    "Nepal",
    "Oman",
    "Pakistan",
    "Philippines",
    "Qatar",
    "Republic of Korea",
    "Saudi Arabia",
    "Singapore",
    "Sri Lanka",
    "State of Palestine",
    "Syrian Arab Republic",
    "Tajikistan",
    "Thailand",
    "Turkey",
    "Turkmenistan",
    "United Arab Emirates",
    "Uzbekistan",
    "Viet Nam",
    "Yemen",
];

const EUROPE: &[&str] = &[
    "Albania",
    "Andorra",
    "Austria",
    "Belarus",
    "Belgium",
    "Bosnia and Herzegovina",
    "Bulgaria",
    "Croatia",
    "Cyprus",
    "Czechia",
    "Denmark",
    "Estonia",
    "Finland",
    "France",
    "Germany",
    "Greece",
    "Hungary",
    "Iceland",
    "Ireland",
    "Italy",
    "Latvia",
    "Lithuania",
    "Luxembourg",
    "Malta",
    "Monaco",
    "Montenegro",
    "Netherlands",
    "Norway",
    "Poland",
    "Portugal",
    "Republic of Moldova",
    "Republic of North Macedonia",
    "Romania",
    "Russian Federation",
    "Serbia",
    "Slovakia",
    "Slovenia",
    "Spain",
    "Sweden",
    "Switzerland",
    "Ukraine",
    "United Kingdom of Great Britain and Northern Ireland",
];

const NORTH_AMERICA: &[&str] = &[
    "Aruba",
    "Barbados",
    "Belize",
    "Canada",
    "Costa Rica",
    "Cuba",
    "Dominican Republic",
    "El Salvador",
    "Guatemala",
    "Haiti",
    "Honduras",
    "Jamaica",
    "Mexico",
    "Nicaragua",
    "Panama",
    "Saint Kitts and Nevis",
    "Saint Lucia",
    "Trinidad and Tobago",
    "United States of America",
];

const SOUTH_AMERICA: &[&str] = &[
    "Argentina",
    "Bolivia (Plurinational State of)",
    "Brazil",
    "Chile",
    "Colombia",
    "Ecuador",
    "Guyana",
    "Paraguay",
    "Peru",
    "Suriname",
    "Uruguay",
    "Venezuela (Bolivarian Republic of)",
];

const AFRICA: &[&str] = &[
    "Algeria",
    "Angola",
    "Benin",
    "Botswana",
    "Burkina Faso",
    "Burundi",
    "Cabo Verde",
    "Cameroon",
    "Central African Republic",
    "Chad",
    "Comoros",
    "Congo",
    "Côte d'Ivoire",
    "Democratic Republic of the Congo",
    "Egypt",
    "Equatorial Guinea",
    "Eritrea",
    "Ethiopia",
    "Gabon",
    "Gambia",
    "Ghana",
    "Guinea",
    "Guinea-Bissau",
    "Kenya",
    "Kingdom of Eswatini",
    "Lesotho",
    "Liberia",
    "Libya",
    "Madagascar",
    "Malawi",
    "Mali",
    "Mauritania",
    "Mauritius",
    "Morocco",
    "Mozambique",
    "Namibia",
    "Niger",
    "Nigeria",
    "Rwanda",
    "Senegal",
    "Seychelles",
    "Sierra Leone",
    "Somalia",
    "South Africa",
    "South Sudan",
    "Sudan",
    "Togo",
    "Tunisia",
    "Uganda",
    "United Republic of Tanzania",
    "Zambia",
    "Zimbabwe",
];

const OCEANIA: &[&str] = &[
    "Australia",
    "New Zealand",
    "Palau",
    "Papua New Guinea",
    "Solomon Islands",
    "Vanuatu",
];

static CONTINENT_INDEX: LazyLock<HashMap<&'static str, Continent>> = LazyLock::new(|| {
    let memberships = [
        (ASIA, Continent::Asia),
        (EUROPE, Continent::Europe),
        (NORTH_AMERICA, Continent::NorthAmerica),
        (SOUTH_AMERICA, Continent::SouthAmerica),
        (AFRICA, Continent::Africa),
        (OCEANIA, Continent::Oceania),
    ];

    let mut index = HashMap::new();
    for (countries, continent) in memberships {
        for &country in countries {
            index.insert(country, continent);
        }
    }
    index
});

/// Classify a country name into its continent bucket.
///
/// Exact, case-sensitive match only; every unmatched name (including the
/// empty string) maps to `Others`. Total and pure.
pub fn classify(country_name: &str) -> Continent {
    CONTINENT_INDEX
        .get(country_name)
        .copied()
        .unwrap_or(Continent::Others)
}

/// Return a new table with a `Continent` column appended.
///
/// The input table is left untouched; callers that need the annotated
/// variant work on the returned copy.
pub fn annotate_continents(df: &DataFrame) -> Result<DataFrame, GeoError> {
    let country = df
        .column(columns::COUNTRY)
        .map_err(|_| GeoError::MissingColumn(columns::COUNTRY))?;

    let as_string = country.cast(&DataType::String)?;
    let labels: Vec<&'static str> = as_string
        .str()?
        .into_iter()
        .map(|name| classify(name.unwrap_or("")).name())
        .collect();

    let mut annotated = df.clone();
    annotated.with_column(Column::new(columns::CONTINENT.into(), labels))?;
    Ok(annotated)
}
