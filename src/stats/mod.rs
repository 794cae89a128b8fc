//! Stats module - descriptive statistics and quantiles

mod calculator;

pub use calculator::{ColumnSummary, StatsCalculator};
