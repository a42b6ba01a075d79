use bizplan_core::statements::break_even::{analyze_break_even, BreakEvenInput};
use bizplan_core::statements::income::{
    build_income_statement, corporate_tax, IncomeStatementInput,
};
use bizplan_core::statements::sig::{build_sig_table, SigInput, SIG_LINES};
use bizplan_core::statements::working_capital::{compute_working_capital, WorkingCapitalInput};
use bizplan_core::types::YearSeries;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn flat(v: Decimal) -> YearSeries {
    [v, v, v]
}

fn sample_income_input() -> IncomeStatementInput {
    IncomeStatementInput {
        revenue_by_year: [dec!(60000), dec!(72000), dec!(79200)],
        variable_costs_by_year: [dec!(24000), dec!(28800), dec!(31680)],
        fixed_charges_by_year: flat(dec!(12000)),
        taxes_and_duties_by_year: flat(dec!(800)),
        employee_wages_by_year: [Decimal::ZERO, dec!(18000), dec!(18000)],
        employee_social_by_year: [Decimal::ZERO, dec!(7560), dec!(7560)],
        owner_draw_by_year: flat(dec!(12000)),
        owner_social_by_year: flat(dec!(5400)),
        bank_fees_by_year: flat(dec!(300)),
        loan_interest_by_year: [dec!(600), dec!(350), dec!(100)],
    }
}

// ===========================================================================
// Income statement tests
// ===========================================================================

#[test]
fn test_income_statement_waterfall() {
    let result = build_income_statement(&sample_income_input()).unwrap();
    let y1 = &result.result.years[0];

    assert_eq!(y1.gross_margin, dec!(36000));
    assert_eq!(y1.value_added, dec!(24000));
    // EBE = 24,000 - 800 - (12,000 + 5,400) = 5,800
    assert_eq!(y1.ebe, dec!(5800));
    assert_eq!(y1.financial_charges, dec!(900));
    assert_eq!(y1.pre_tax_result, dec!(4900));
    assert_eq!(y1.corporate_tax, dec!(4900) * dec!(0.15));
    assert_eq!(y1.net_result, y1.pre_tax_result - y1.corporate_tax);
}

#[test]
fn test_corporate_tax_brackets() {
    assert_eq!(corporate_tax(dec!(-1)), Decimal::ZERO);
    assert_eq!(corporate_tax(dec!(38120)), dec!(5718));
    // One euro above the ceiling: 5,718 + 0.28
    assert_eq!(corporate_tax(dec!(38121)), dec!(5718.28));
}

#[test]
fn test_income_statement_carries_no_depreciation() {
    let result = build_income_statement(&sample_income_input()).unwrap();
    for year in &result.result.years {
        assert_eq!(year.depreciation, Decimal::ZERO);
    }
}

// ===========================================================================
// SIG tests
// ===========================================================================

#[test]
fn test_sig_reconciles_both_depreciation_views() {
    let income = build_income_statement(&sample_income_input()).unwrap().result;
    let depreciation = flat(dec!(2500));
    let sig = build_sig_table(&SigInput {
        income: income.clone(),
        depreciation_by_year: depreciation,
    })
    .unwrap()
    .result;

    assert_eq!(sig.lines.len(), SIG_LINES);

    // Operating result deducts the real schedule...
    let operating = &sig.lines[10];
    assert_eq!(operating.by_year[0], income.years[0].ebe - dec!(2500));

    // ...while net result mirrors the zero-depreciation P&L...
    let net = &sig.lines[14];
    assert_eq!(net.by_year[0], income.years[0].net_result);

    // ...and CAF adds the schedule back on top of net result.
    assert_eq!(
        sig.self_financing_capacity[0],
        income.years[0].net_result + dec!(2500)
    );
}

#[test]
fn test_sig_percentages_scale_with_revenue() {
    let income = build_income_statement(&sample_income_input()).unwrap().result;
    let sig = build_sig_table(&SigInput {
        income,
        depreciation_by_year: flat(Decimal::ZERO),
    })
    .unwrap()
    .result;

    let gross_margin = &sig.lines[2];
    assert_eq!(gross_margin.pct_of_revenue[0], dec!(60));
    assert_eq!(sig.lines[0].pct_of_revenue[1], dec!(100));
}

// ===========================================================================
// Break-even tests
// ===========================================================================

#[test]
fn test_break_even_reference_values() {
    let input = BreakEvenInput {
        revenue_by_year: flat(dec!(60000)),
        variable_costs_by_year: flat(dec!(24000)),
        external_charges_by_year: flat(dec!(12000)),
        taxes_and_duties_by_year: flat(dec!(800)),
        personnel_by_year: flat(dec!(17400)),
        depreciation_by_year: flat(dec!(2500)),
        financial_charges_by_year: flat(dec!(900)),
    };
    let result = analyze_break_even(&input).unwrap();
    let y1 = &result.result.years[0];

    // Margin rate 0.6; fixed base 33,600 => break-even at 56,000
    assert_eq!(y1.contribution_margin_rate, dec!(0.6));
    assert_eq!(y1.fixed_costs, dec!(33600));
    assert_eq!(y1.break_even_revenue, dec!(56000));
    assert_eq!(y1.daily_break_even, dec!(224));
    // Revenue of 60,000 clears the break-even point
    assert!(result.warnings.is_empty());
}

// ===========================================================================
// Working capital tests
// ===========================================================================

#[test]
fn test_bfr_growth_feeds_change_series() {
    let input = WorkingCapitalInput {
        revenue_by_year: [dec!(36500), dec!(54750), dec!(73000)],
        variable_costs_by_year: [dec!(14600), dec!(21900), dec!(29200)],
        customer_credit_days: dec!(30),
        supplier_debt_days: dec!(45),
    };
    let result = compute_working_capital(&input).unwrap();
    let years = &result.result.years;

    assert_eq!(years[0].bfr, dec!(1200));
    assert_eq!(years[1].bfr, dec!(1800));
    assert_eq!(years[0].bfr_change, dec!(1200));
    assert_eq!(years[1].bfr_change, dec!(600));
    assert_eq!(years[2].bfr_change, dec!(600));
}
