use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::types::*;
use crate::BizPlanResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Pre-tax result up to this threshold is taxed at the reduced rate.
const REDUCED_RATE_CEILING: Decimal = dec!(38120);
const REDUCED_RATE: Decimal = dec!(0.15);
const STANDARD_RATE: Decimal = dec!(0.28);

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// Upstream aggregates feeding the three-year P&L. Every series comes from an
/// earlier pipeline stage or straight from validated user input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeStatementInput {
    /// Total revenue (goods + services)
    pub revenue_by_year: YearSeries,
    /// Variable costs, applied to goods revenue only
    pub variable_costs_by_year: YearSeries,
    /// External fixed charges
    pub fixed_charges_by_year: YearSeries,
    /// Taxes and duties other than corporate tax (CFE, levies)
    pub taxes_and_duties_by_year: YearSeries,
    pub employee_wages_by_year: YearSeries,
    pub employee_social_by_year: YearSeries,
    pub owner_draw_by_year: YearSeries,
    pub owner_social_by_year: YearSeries,
    /// Account-keeping and bank charges
    pub bank_fees_by_year: YearSeries,
    /// Interest portion of all loans, from the amortizer
    pub loan_interest_by_year: YearSeries,
}

/// One projected year of the P&L, top line to net result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeStatementYear {
    pub year: u32,
    pub revenue: Money,
    pub cost_of_goods: Money,
    pub gross_margin: Money,
    pub fixed_charges: Money,
    pub value_added: Money,
    pub taxes_and_duties: Money,
    pub employee_wages: Money,
    pub employee_social_charges: Money,
    pub owner_draw: Money,
    pub owner_social_charges: Money,
    /// Gross operating surplus
    pub ebe: Money,
    /// Bank fees + loan interest
    pub financial_charges: Money,
    /// Held at zero in the P&L; the real schedule feeds the SIG and
    /// cash-budget layers (pinned modeling behavior)
    pub depreciation: Money,
    pub pre_tax_result: Money,
    pub corporate_tax: Money,
    pub net_result: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeStatementOutput {
    pub years: Vec<IncomeStatementYear>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Progressive corporate tax: nothing on a loss, the reduced rate up to the
/// ceiling, reduced-rate ceiling plus the standard rate on the excess above.
pub fn corporate_tax(pre_tax_result: Money) -> Money {
    if pre_tax_result <= Decimal::ZERO {
        Decimal::ZERO
    } else if pre_tax_result <= REDUCED_RATE_CEILING {
        pre_tax_result * REDUCED_RATE
    } else {
        REDUCED_RATE_CEILING * REDUCED_RATE
            + (pre_tax_result - REDUCED_RATE_CEILING) * STANDARD_RATE
    }
}

/// Combine upstream totals into the three-year income statement.
pub fn build_income_statement(
    input: &IncomeStatementInput,
) -> BizPlanResult<ComputationOutput<IncomeStatementOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let years: Vec<IncomeStatementYear> = (0..PROJECTION_YEARS)
        .map(|y| build_year(input, y))
        .collect();

    for year in &years {
        if year.net_result < Decimal::ZERO {
            warnings.push(format!("Year {}: net result is negative.", year.year));
        }
    }

    let output = IncomeStatementOutput { years };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Three-Year Income Statement",
        &serde_json::json!({
            "reduced_rate_ceiling": REDUCED_RATE_CEILING.to_string(),
            "reduced_rate": REDUCED_RATE.to_string(),
            "standard_rate": STANDARD_RATE.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn build_year(input: &IncomeStatementInput, y: usize) -> IncomeStatementYear {
    let revenue = input.revenue_by_year[y];
    let cost_of_goods = input.variable_costs_by_year[y];
    let gross_margin = revenue - cost_of_goods;
    let fixed_charges = input.fixed_charges_by_year[y];
    let value_added = gross_margin - fixed_charges;

    let taxes_and_duties = input.taxes_and_duties_by_year[y];
    let employee_wages = input.employee_wages_by_year[y];
    let employee_social_charges = input.employee_social_by_year[y];
    let owner_draw = input.owner_draw_by_year[y];
    let owner_social_charges = input.owner_social_by_year[y];

    let personnel =
        employee_wages + employee_social_charges + owner_draw + owner_social_charges;
    let ebe = value_added - taxes_and_duties - personnel;

    let financial_charges = input.bank_fees_by_year[y] + input.loan_interest_by_year[y];

    // Depreciation is deliberately zero at this layer; the actual schedule
    // enters through the SIG's self-financing capacity instead.
    let depreciation = Decimal::ZERO;

    let pre_tax_result = ebe - financial_charges - depreciation;
    let tax = corporate_tax(pre_tax_result);

    IncomeStatementYear {
        year: (y + 1) as u32,
        revenue,
        cost_of_goods,
        gross_margin,
        fixed_charges,
        value_added,
        taxes_and_duties,
        employee_wages,
        employee_social_charges,
        owner_draw,
        owner_social_charges,
        ebe,
        financial_charges,
        depreciation,
        pre_tax_result,
        corporate_tax: tax,
        net_result: pre_tax_result - tax,
    }
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

    fn sample_input() -> IncomeStatementInput {
        IncomeStatementInput {
            revenue_by_year: [dec!(24000), dec!(26400), dec!(27720)],
            variable_costs_by_year: [dec!(9600), dec!(10560), dec!(11088)],
            fixed_charges_by_year: flat(dec!(6000)),
            taxes_and_duties_by_year: flat(dec!(500)),
            employee_wages_by_year: flat(Decimal::ZERO),
            employee_social_by_year: flat(Decimal::ZERO),
            owner_draw_by_year: flat(dec!(3000)),
            owner_social_by_year: flat(dec!(1350)),
            bank_fees_by_year: flat(dec!(240)),
            loan_interest_by_year: [dec!(450), dec!(200), Decimal::ZERO],
        }
    }

    #[test]
    fn test_tax_zero_on_loss() {
        assert_eq!(corporate_tax(dec!(-5000)), Decimal::ZERO);
        assert_eq!(corporate_tax(Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_tax_reduced_rate_below_ceiling() {
        assert_eq!(corporate_tax(dec!(10000)), dec!(1500));
        assert_eq!(corporate_tax(dec!(38120)), dec!(38120) * dec!(0.15));
    }

    #[test]
    fn test_tax_progressive_above_ceiling() {
        let tax = corporate_tax(dec!(50000));
        let expected = dec!(38120) * dec!(0.15) + (dec!(50000) - dec!(38120)) * dec!(0.28);
        assert_eq!(tax, expected);
    }

    #[test]
    fn test_gross_margin_and_value_added() {
        let result = build_income_statement(&sample_input()).unwrap();
        let y1 = &result.result.years[0];
        assert_eq!(y1.gross_margin, dec!(14400));
        assert_eq!(y1.value_added, dec!(8400));
    }

    #[test]
    fn test_ebe_identity() {
        let result = build_income_statement(&sample_input()).unwrap();
        for year in &result.result.years {
            let personnel = year.employee_wages
                + year.employee_social_charges
                + year.owner_draw
                + year.owner_social_charges;
            assert_eq!(year.ebe, year.value_added - year.taxes_and_duties - personnel);
        }
    }

    #[test]
    fn test_net_result_identity() {
        let result = build_income_statement(&sample_input()).unwrap();
        for year in &result.result.years {
            assert_eq!(year.net_result, year.pre_tax_result - year.corporate_tax);
        }
    }

    #[test]
    fn test_depreciation_pinned_at_zero() {
        // Regression pin: the P&L carries zero depreciation regardless of the
        // asset schedule; reconciliation happens in the SIG layer.
        let result = build_income_statement(&sample_input()).unwrap();
        for year in &result.result.years {
            assert_eq!(year.depreciation, Decimal::ZERO);
            assert_eq!(year.pre_tax_result, year.ebe - year.financial_charges);
        }
    }

    #[test]
    fn test_financial_charges_combine_fees_and_interest() {
        let result = build_income_statement(&sample_input()).unwrap();
        let years = &result.result.years;
        assert_eq!(years[0].financial_charges, dec!(690));
        assert_eq!(years[2].financial_charges, dec!(240));
    }

    #[test]
    fn test_loss_year_warns() {
        let mut input = sample_input();
        input.fixed_charges_by_year = flat(dec!(50000));
        let result = build_income_statement(&input).unwrap();
        assert!(!result.warnings.is_empty());
        assert_eq!(result.result.years[0].corporate_tax, Decimal::ZERO);
    }
}
