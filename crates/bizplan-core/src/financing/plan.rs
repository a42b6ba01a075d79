use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::types::*;
use crate::BizPlanResult;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// Reconciliation input assembled from earlier pipeline stages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancingPlanInput {
    /// Intangible + tangible startup investment, posted to year 1 only
    pub fixed_asset_investment: Money,
    /// Initial stock purchase, posted to year 1 only
    pub stock_acquisition: Money,
    /// Year-over-year working-capital change
    pub bfr_change: YearSeries,
    /// Loan principal repaid per year, from the amortizer's principal split
    pub loan_principal_repayment: YearSeries,

    /// Personal + in-kind contributions, drawn in year 1
    pub equity: Money,
    /// Loan principal drawn in year 1
    pub loans_drawn: Money,
    /// Grants received in year 1
    pub grants: Money,
    /// Other financing received in year 1
    pub other_financing: Money,
    /// Self-financing capacity per year, from the SIG table
    pub self_financing_capacity: YearSeries,
}

/// One year of the financing plan: uses against sources.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancingPlanYear {
    pub year: u32,

    pub fixed_asset_investment: Money,
    pub stock_acquisition: Money,
    pub bfr_change: Money,
    pub loan_repayment: Money,
    pub total_uses: Money,

    pub equity: Money,
    pub loans: Money,
    pub grants: Money,
    pub other_financing: Money,
    pub self_financing_capacity: Money,
    pub total_sources: Money,

    /// total_sources - total_uses
    pub cash_variation: Money,
    /// Running sum of cash variations; may go negative
    pub cumulative_cash_surplus: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancingPlanOutput {
    pub years: Vec<FinancingPlanYear>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Reconcile all uses of funds against all sources into a cumulative
/// three-year cash-surplus trajectory. One-time uses and external financing
/// land in year 1; a negative trajectory is a warning, not an error.
pub fn build_financing_plan(
    input: &FinancingPlanInput,
) -> BizPlanResult<ComputationOutput<FinancingPlanOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let mut cumulative = Decimal::ZERO;
    let years: Vec<FinancingPlanYear> = (0..PROJECTION_YEARS)
        .map(|y| {
            let first = y == 0;
            let fixed_asset_investment = if first {
                input.fixed_asset_investment
            } else {
                Decimal::ZERO
            };
            let stock_acquisition = if first {
                input.stock_acquisition
            } else {
                Decimal::ZERO
            };
            let bfr_change = input.bfr_change[y];
            let loan_repayment = input.loan_principal_repayment[y];
            let total_uses =
                fixed_asset_investment + stock_acquisition + bfr_change + loan_repayment;

            let equity = if first { input.equity } else { Decimal::ZERO };
            let loans = if first { input.loans_drawn } else { Decimal::ZERO };
            let grants = if first { input.grants } else { Decimal::ZERO };
            let other_financing = if first {
                input.other_financing
            } else {
                Decimal::ZERO
            };
            let self_financing_capacity = input.self_financing_capacity[y];
            let total_sources =
                equity + loans + grants + other_financing + self_financing_capacity;

            let cash_variation = total_sources - total_uses;
            cumulative += cash_variation;

            FinancingPlanYear {
                year: (y + 1) as u32,
                fixed_asset_investment,
                stock_acquisition,
                bfr_change,
                loan_repayment,
                total_uses,
                equity,
                loans,
                grants,
                other_financing,
                self_financing_capacity,
                total_sources,
                cash_variation,
                cumulative_cash_surplus: cumulative,
            }
        })
        .collect();

    for year in &years {
        if year.cumulative_cash_surplus < Decimal::ZERO {
            warnings.push(format!(
                "Year {}: cumulative cash surplus is negative ({}).",
                year.year, year.cumulative_cash_surplus
            ));
        }
    }

    let output = FinancingPlanOutput { years };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Three-Year Financing Plan",
        &serde_json::json!({
            "fixed_asset_investment": input.fixed_asset_investment.to_string(),
            "stock_acquisition": input.stock_acquisition.to_string(),
        }),
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

    fn sample_input() -> FinancingPlanInput {
        FinancingPlanInput {
            fixed_asset_investment: dec!(11000),
            stock_acquisition: dec!(3000),
            bfr_change: [dec!(1200), dec!(600), Decimal::ZERO],
            loan_principal_repayment: [dec!(6000), dec!(6000), Decimal::ZERO],
            equity: dec!(6000),
            loans_drawn: dec!(12000),
            grants: dec!(2000),
            other_financing: Decimal::ZERO,
            self_financing_capacity: [dec!(4000), dec!(8000), dec!(9000)],
        }
    }

    #[test]
    fn test_one_time_uses_posted_to_year_one_only() {
        let result = build_financing_plan(&sample_input()).unwrap();
        let years = &result.result.years;
        assert_eq!(years[0].fixed_asset_investment, dec!(11000));
        assert_eq!(years[0].stock_acquisition, dec!(3000));
        for y in &years[1..] {
            assert_eq!(y.fixed_asset_investment, Decimal::ZERO);
            assert_eq!(y.stock_acquisition, Decimal::ZERO);
            assert_eq!(y.equity, Decimal::ZERO);
            assert_eq!(y.loans, Decimal::ZERO);
            assert_eq!(y.grants, Decimal::ZERO);
        }
    }

    #[test]
    fn test_totals_and_cash_variation() {
        let result = build_financing_plan(&sample_input()).unwrap();
        let y1 = &result.result.years[0];
        assert_eq!(y1.total_uses, dec!(21200));
        assert_eq!(y1.total_sources, dec!(24000));
        assert_eq!(y1.cash_variation, dec!(2800));
    }

    #[test]
    fn test_cumulative_surplus_runs_across_years() {
        let result = build_financing_plan(&sample_input()).unwrap();
        let years = &result.result.years;
        assert_eq!(years[0].cumulative_cash_surplus, years[0].cash_variation);
        assert_eq!(
            years[1].cumulative_cash_surplus,
            years[0].cash_variation + years[1].cash_variation
        );
        assert_eq!(
            years[2].cumulative_cash_surplus,
            years[0].cash_variation + years[1].cash_variation + years[2].cash_variation
        );
    }

    #[test]
    fn test_negative_trajectory_is_warning_not_error() {
        let mut input = sample_input();
        input.self_financing_capacity = [dec!(-2000), dec!(-2000), dec!(-2000)];
        input.equity = Decimal::ZERO;
        input.loans_drawn = Decimal::ZERO;
        input.grants = Decimal::ZERO;
        let result = build_financing_plan(&input).unwrap();
        assert!(result.result.years[2].cumulative_cash_surplus < Decimal::ZERO);
        assert!(!result.warnings.is_empty());
    }

    #[test]
    fn test_loan_repayment_is_principal_only() {
        let result = build_financing_plan(&sample_input()).unwrap();
        assert_eq!(result.result.years[0].loan_repayment, dec!(6000));
        assert_eq!(result.result.years[2].loan_repayment, Decimal::ZERO);
    }
}
