use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::statements::income::IncomeStatementOutput;
use crate::types::*;
use crate::BizPlanResult;

const PERCENT: Decimal = dec!(100);

/// Number of lines in the SIG table, fixed by the statement layout.
pub const SIG_LINES: usize = 16;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SigInput {
    pub income: IncomeStatementOutput,
    /// Actual depreciation schedule totals; the P&L carries zero, this table
    /// is where the real schedule re-enters
    pub depreciation_by_year: YearSeries,
}

/// One management balance: absolute value and percent of revenue per year.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SigLine {
    pub label: String,
    pub by_year: YearSeries,
    /// Percent of total revenue; 100 for revenue itself, 0 when revenue is 0
    pub pct_of_revenue: YearSeries,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SigTable {
    /// Fixed ordered list of 16 lines, revenue first, self-financing
    /// capacity last
    pub lines: Vec<SigLine>,
    /// net_result + actual depreciation, re-exposed for the financing plan
    pub self_financing_capacity: YearSeries,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Re-derive the income statement into the standard intermediate management
/// balances, each with a percentage-of-revenue column.
///
/// The operating-result line uses the actual depreciation schedule while the
/// pre-tax/tax/net lines mirror the income statement (which carries zero
/// depreciation); self-financing capacity is where the two views reconcile.
pub fn build_sig_table(input: &SigInput) -> BizPlanResult<ComputationOutput<SigTable>> {
    let start = Instant::now();
    let warnings: Vec<String> = Vec::new();

    let mut revenue = zero_years();
    let mut cost_of_goods = zero_years();
    let mut gross_margin = zero_years();
    let mut external_charges = zero_years();
    let mut value_added = zero_years();
    let mut taxes_and_duties = zero_years();
    let mut personnel = zero_years();
    let mut owner_compensation = zero_years();
    let mut ebe = zero_years();
    let mut operating_result = zero_years();
    let mut financial_result = zero_years();
    let mut pre_tax_result = zero_years();
    let mut tax = zero_years();
    let mut net_result = zero_years();
    let mut self_financing = zero_years();

    for (y, year) in input.income.years.iter().enumerate().take(PROJECTION_YEARS) {
        let depreciation = input.depreciation_by_year[y];
        revenue[y] = year.revenue;
        cost_of_goods[y] = year.cost_of_goods;
        gross_margin[y] = year.gross_margin;
        external_charges[y] = year.fixed_charges;
        value_added[y] = year.value_added;
        taxes_and_duties[y] = year.taxes_and_duties;
        personnel[y] = year.employee_wages + year.employee_social_charges;
        owner_compensation[y] = year.owner_draw + year.owner_social_charges;
        ebe[y] = year.ebe;
        operating_result[y] = year.ebe - depreciation;
        financial_result[y] = -year.financial_charges;
        pre_tax_result[y] = year.pre_tax_result;
        tax[y] = year.corporate_tax;
        net_result[y] = year.net_result;
        self_financing[y] = year.net_result + depreciation;
    }

    let lines = vec![
        line("Revenue", revenue, &revenue),
        line("Cost of goods sold", cost_of_goods, &revenue),
        line("Gross margin", gross_margin, &revenue),
        line("External charges", external_charges, &revenue),
        line("Value added", value_added, &revenue),
        line("Taxes and duties", taxes_and_duties, &revenue),
        line("Personnel costs", personnel, &revenue),
        line("Owner compensation", owner_compensation, &revenue),
        line("Gross operating surplus", ebe, &revenue),
        line("Depreciation charge", input.depreciation_by_year, &revenue),
        line("Operating result", operating_result, &revenue),
        line("Financial result", financial_result, &revenue),
        line("Pre-tax result", pre_tax_result, &revenue),
        line("Corporate tax", tax, &revenue),
        line("Net result", net_result, &revenue),
        line("Self-financing capacity", self_financing, &revenue),
    ];
    debug_assert_eq!(lines.len(), SIG_LINES);

    let output = SigTable {
        lines,
        self_financing_capacity: self_financing,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Intermediate Management Balances (SIG)",
        &serde_json::json!({ "lines": SIG_LINES }),
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn line(label: &str, by_year: YearSeries, revenue: &YearSeries) -> SigLine {
    let mut pct_of_revenue = zero_years();
    for y in 0..PROJECTION_YEARS {
        pct_of_revenue[y] = pct_of(by_year[y], revenue[y]);
    }
    SigLine {
        label: label.to_string(),
        by_year,
        pct_of_revenue,
    }
}

/// Percent of revenue, defined as 0 (not NaN) for a zero-revenue year.
fn pct_of(value: Money, revenue: Money) -> Decimal {
    if revenue.is_zero() {
        Decimal::ZERO
    } else {
        value / revenue * PERCENT
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
