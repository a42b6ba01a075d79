use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::types::*;
use crate::BizPlanResult;

/// Opening-days convention for the daily break-even point.
const WORKING_DAYS_PER_YEAR: Decimal = dec!(250);

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// Cost base for the break-even analysis. Fixed costs here are broader than
/// the P&L's fixed-charges line: they take in everything that does not vary
/// with volume, including personnel, depreciation and financial charges.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakEvenInput {
    pub revenue_by_year: YearSeries,
    pub variable_costs_by_year: YearSeries,
    pub external_charges_by_year: YearSeries,
    pub taxes_and_duties_by_year: YearSeries,
    /// Wages, social charges and owner compensation combined
    pub personnel_by_year: YearSeries,
    /// Actual depreciation schedule
    pub depreciation_by_year: YearSeries,
    pub financial_charges_by_year: YearSeries,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakEvenYear {
    pub year: u32,
    /// revenue - variable costs
    pub contribution_margin: Money,
    /// contribution_margin / revenue as a ratio; 0 when revenue is 0
    pub contribution_margin_rate: Decimal,
    pub fixed_costs: Money,
    /// fixed_costs / rate; 0 when the rate is 0
    pub break_even_revenue: Money,
    /// break_even_revenue / 250 working days
    pub daily_break_even: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakEvenOutput {
    pub years: Vec<BreakEvenYear>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute contribution margin, break-even revenue and the daily break-even
/// point for each projection year. Zero denominators resolve to zero, never
/// to a division error.
pub fn analyze_break_even(
    input: &BreakEvenInput,
) -> BizPlanResult<ComputationOutput<BreakEvenOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let years: Vec<BreakEvenYear> = (0..PROJECTION_YEARS)
        .map(|y| {
            let revenue = input.revenue_by_year[y];
            let contribution_margin = revenue - input.variable_costs_by_year[y];
            let contribution_margin_rate = if revenue.is_zero() {
                Decimal::ZERO
            } else {
                contribution_margin / revenue
            };

            let fixed_costs = input.external_charges_by_year[y]
                + input.taxes_and_duties_by_year[y]
                + input.personnel_by_year[y]
                + input.depreciation_by_year[y]
                + input.financial_charges_by_year[y];

            let break_even_revenue = if contribution_margin_rate.is_zero() {
                Decimal::ZERO
            } else {
                fixed_costs / contribution_margin_rate
            };

            BreakEvenYear {
                year: (y + 1) as u32,
                contribution_margin,
                contribution_margin_rate,
                fixed_costs,
                break_even_revenue,
                daily_break_even: break_even_revenue / WORKING_DAYS_PER_YEAR,
            }
        })
        .collect();

    for year in &years {
        if year.break_even_revenue > input.revenue_by_year[(year.year - 1) as usize] {
            warnings.push(format!(
                "Year {}: projected revenue sits below the break-even point.",
                year.year
            ));
        }
    }

    let output = BreakEvenOutput { years };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Break-Even Analysis",
        &serde_json::json!({ "working_days_per_year": WORKING_DAYS_PER_YEAR.to_string() }),
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn flat(v: Decimal) -> YearSeries {
        [v, v, v]
    }

    fn sample_input() -> BreakEvenInput {
        BreakEvenInput {
            revenue_by_year: flat(dec!(24000)),
            variable_costs_by_year: flat(dec!(9600)),
            external_charges_by_year: flat(dec!(6000)),
            taxes_and_duties_by_year: flat(dec!(500)),
            personnel_by_year: flat(dec!(4350)),
            depreciation_by_year: flat(dec!(1200)),
            financial_charges_by_year: flat(dec!(690)),
        }
    }

    #[test]
    fn test_contribution_margin_and_rate() {
        let result = analyze_break_even(&sample_input()).unwrap();
        let y1 = &result.result.years[0];
        assert_eq!(y1.contribution_margin, dec!(14400));
        assert_eq!(y1.contribution_margin_rate, dec!(0.6));
    }

    #[test]
    fn test_broad_fixed_cost_base() {
        let result = analyze_break_even(&sample_input()).unwrap();
        // 6000 + 500 + 4350 + 1200 + 690
        assert_eq!(result.result.years[0].fixed_costs, dec!(12740));
    }

    #[test]
    fn test_break_even_revenue_covers_fixed_costs() {
        let result = analyze_break_even(&sample_input()).unwrap();
        let y1 = &result.result.years[0];
        assert_eq!(
            y1.break_even_revenue,
            y1.fixed_costs / y1.contribution_margin_rate
        );
        assert_eq!(y1.daily_break_even, y1.break_even_revenue / dec!(250));
    }

    #[test]
    fn test_zero_revenue_guard() {
        let mut input = sample_input();
        input.revenue_by_year = zero_years();
        input.variable_costs_by_year = zero_years();
        let result = analyze_break_even(&input).unwrap();
        let y1 = &result.result.years[0];
        assert_eq!(y1.contribution_margin_rate, Decimal::ZERO);
        assert_eq!(y1.break_even_revenue, Decimal::ZERO);
        assert_eq!(y1.daily_break_even, Decimal::ZERO);
    }

    #[test]
    fn test_warns_when_revenue_below_break_even() {
        let mut input = sample_input();
        input.revenue_by_year = flat(dec!(10000));
        input.variable_costs_by_year = flat(dec!(4000));
        let result = analyze_break_even(&input).unwrap();
        assert!(!result.warnings.is_empty());
    }
}
