use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::BizPlanError;
use crate::types::*;
use crate::BizPlanResult;

const PERCENT: Decimal = dec!(100);

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StreamKind {
    /// Sale of goods; carries variable costs downstream
    Goods,
    /// Services; no variable cost by design
    Services,
}

/// Activity for one month of year 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthActivity {
    pub days_worked: Days,
    pub avg_revenue_per_day: Money,
}

/// One revenue stream: 12 months of year-1 activity plus growth assumptions
/// for years 2 and 3.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevenueStream {
    pub kind: StreamKind,
    /// Exactly 12 entries, month 1 through month 12
    pub months: Vec<MonthActivity>,
    /// Year-over-year growth applied to the year-1 total (10 = +10%)
    pub growth_year2_pct: Percent,
    /// Growth applied to the year-2 total
    pub growth_year3_pct: Percent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevenueInput {
    pub streams: Vec<RevenueStream>,
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamProjection {
    pub kind: StreamKind,
    /// days_worked x avg_revenue_per_day, per month of year 1
    pub monthly_year1: MonthSeries,
    /// Year 1 = sum of months; years 2-3 compound the single growth percent
    pub by_year: YearSeries,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevenueProjection {
    pub streams: Vec<StreamProjection>,
    pub goods_by_year: YearSeries,
    pub services_by_year: YearSeries,
    pub total_by_year: YearSeries,
    pub goods_monthly_year1: MonthSeries,
    pub services_monthly_year1: MonthSeries,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Build monthly year-1 revenue per stream and extrapolate years 2-3 with
/// each stream's compounding growth percentage. Zero days or a zero daily
/// rate simply yields a zero month.
pub fn project_revenue(input: &RevenueInput) -> BizPlanResult<ComputationOutput<RevenueProjection>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    for (idx, stream) in input.streams.iter().enumerate() {
        if stream.months.len() != MONTHS_PER_YEAR {
            return Err(BizPlanError::InvalidInput {
                field: format!("streams[{idx}].months"),
                reason: format!(
                    "Expected {} monthly entries, got {}",
                    MONTHS_PER_YEAR,
                    stream.months.len()
                ),
            });
        }
        for (m, month) in stream.months.iter().enumerate() {
            if month.days_worked < Decimal::ZERO || month.avg_revenue_per_day < Decimal::ZERO {
                return Err(BizPlanError::InvalidInput {
                    field: format!("streams[{idx}].months[{m}]"),
                    reason: "Days worked and daily revenue cannot be negative".into(),
                });
            }
        }
    }

    let mut goods_by_year = zero_years();
    let mut services_by_year = zero_years();
    let mut goods_monthly_year1 = zero_months();
    let mut services_monthly_year1 = zero_months();

    let streams: Vec<StreamProjection> = input
        .streams
        .iter()
        .map(|stream| {
            let projection = project_stream(stream);
            match stream.kind {
                StreamKind::Goods => {
                    goods_by_year = add_years(&goods_by_year, &projection.by_year);
                    add_months(&mut goods_monthly_year1, &projection.monthly_year1);
                }
                StreamKind::Services => {
                    services_by_year = add_years(&services_by_year, &projection.by_year);
                    add_months(&mut services_monthly_year1, &projection.monthly_year1);
                }
            }
            projection
        })
        .collect();

    let total_by_year = add_years(&goods_by_year, &services_by_year);
    if total_by_year[0].is_zero() {
        warnings.push("Year-1 revenue is zero across all streams.".into());
    }

    let output = RevenueProjection {
        streams,
        goods_by_year,
        services_by_year,
        total_by_year,
        goods_monthly_year1,
        services_monthly_year1,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Revenue Projection (days x daily rate, compounded growth)",
        &serde_json::json!({ "streams": input.streams.len() }),
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn project_stream(stream: &RevenueStream) -> StreamProjection {
    let mut monthly_year1 = zero_months();
    for (slot, month) in monthly_year1.iter_mut().zip(stream.months.iter()) {
        *slot = month.days_worked * month.avg_revenue_per_day;
    }

    let year1: Money = monthly_year1.iter().copied().sum();
    let year2 = year1 * (Decimal::ONE + stream.growth_year2_pct / PERCENT);
    let year3 = year2 * (Decimal::ONE + stream.growth_year3_pct / PERCENT);

    StreamProjection {
        kind: stream.kind,
        monthly_year1,
        by_year: [year1, year2, year3],
    }
}

fn add_months(acc: &mut MonthSeries, add: &MonthSeries) {
    for (a, b) in acc.iter_mut().zip(add.iter()) {
        *a += *b;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
