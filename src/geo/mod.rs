//! Geo module - country to continent classification

mod continent;

pub use continent::{annotate_continents, classify, Continent, GeoError};
