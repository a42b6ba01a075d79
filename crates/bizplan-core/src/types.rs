use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Percentages as entered by the user (5 = 5%). Converted to a ratio
/// exactly once inside the calculator that consumes them.
pub type Percent = Decimal;

/// Day counts (payment terms, days worked per month)
pub type Days = Decimal;

/// The projection horizon is fixed at three years.
pub const PROJECTION_YEARS: usize = 3;

/// Months in the year-1 monthly detail.
pub const MONTHS_PER_YEAR: usize = 12;

/// A per-year series indexed `[year1, year2, year3]`.
pub type YearSeries = [Money; PROJECTION_YEARS];

/// A per-month series for year 1, indexed `[month1 … month12]`.
pub type MonthSeries = [Money; MONTHS_PER_YEAR];

/// Zero-filled year series.
pub fn zero_years() -> YearSeries {
    [Decimal::ZERO; PROJECTION_YEARS]
}

/// Zero-filled month series.
pub fn zero_months() -> MonthSeries {
    [Decimal::ZERO; MONTHS_PER_YEAR]
}

/// Element-wise sum of year series.
pub fn add_years(a: &YearSeries, b: &YearSeries) -> YearSeries {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
