use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::types::*;
use crate::BizPlanResult;

const TWELVE: Decimal = dec!(12);

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// Year-1 figures to expand into a monthly cash ledger. Recurring items are
/// annual totals spread evenly over 12 months; one-time items post to
/// month 1; sales arrive already monthly from the revenue projector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashBudgetInput {
    /// Equity + loans + grants + other financing, received in month 1
    pub financing_inflows: Money,
    pub goods_sales_monthly: MonthSeries,
    pub services_sales_monthly: MonthSeries,

    /// Intangible + tangible investment, paid in month 1
    pub fixed_asset_investment: Money,
    /// Initial stock, paid in month 1
    pub stock_acquisition: Money,
    /// Annual loan debt service (principal + interest falling in year 1)
    pub loan_payments_year1: Money,
    /// Annual purchases (variable costs)
    pub purchases_year1: Money,
    pub fixed_charges_year1: Money,
    /// Taxes and duties plus year-1 corporate tax
    pub taxes_year1: Money,
    /// Wages, owner draw and all social charges
    pub payroll_year1: Money,
    pub bank_fees_year1: Money,
}

/// One month of the cash budget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashBudgetMonth {
    pub month: u32,

    pub financing_inflows: Money,
    pub goods_sales: Money,
    pub services_sales: Money,
    pub total_inflows: Money,

    /// Fixed assets + stock, month 1 only
    pub capital_outflows: Money,
    pub loan_payments: Money,
    pub purchases: Money,
    pub fixed_charges: Money,
    pub taxes: Money,
    pub payroll: Money,
    pub bank_fees: Money,
    pub total_outflows: Money,

    /// total_inflows - total_outflows
    pub net_cash_flow: Money,
    /// Running balance; has no floor
    pub closing_balance: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashBudgetOutput {
    pub months: Vec<CashBudgetMonth>,
    pub ending_balance: Money,
    pub lowest_balance: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Expand year-1 annual figures into a 12-month cash-in/cash-out ledger with
/// a running balance. A negative month signals a financing gap and produces
/// a warning, never an error.
pub fn build_cash_budget(
    input: &CashBudgetInput,
) -> BizPlanResult<ComputationOutput<CashBudgetOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let loan_monthly = input.loan_payments_year1 / TWELVE;
    let purchases_monthly = input.purchases_year1 / TWELVE;
    let fixed_monthly = input.fixed_charges_year1 / TWELVE;
    let taxes_monthly = input.taxes_year1 / TWELVE;
    let payroll_monthly = input.payroll_year1 / TWELVE;
    let fees_monthly = input.bank_fees_year1 / TWELVE;

    let mut balance = Decimal::ZERO;
    let mut lowest_balance = Decimal::MAX;

    let months: Vec<CashBudgetMonth> = (0..MONTHS_PER_YEAR)
        .map(|m| {
            let first = m == 0;
            let financing_inflows = if first {
                input.financing_inflows
            } else {
                Decimal::ZERO
            };
            let goods_sales = input.goods_sales_monthly[m];
            let services_sales = input.services_sales_monthly[m];
            let total_inflows = financing_inflows + goods_sales + services_sales;

            let capital_outflows = if first {
                input.fixed_asset_investment + input.stock_acquisition
            } else {
                Decimal::ZERO
            };
            let total_outflows = capital_outflows
                + loan_monthly
                + purchases_monthly
                + fixed_monthly
                + taxes_monthly
                + payroll_monthly
                + fees_monthly;

            let net_cash_flow = total_inflows - total_outflows;
            balance += net_cash_flow;
            lowest_balance = lowest_balance.min(balance);

            CashBudgetMonth {
                month: (m + 1) as u32,
                financing_inflows,
                goods_sales,
                services_sales,
                total_inflows,
                capital_outflows,
                loan_payments: loan_monthly,
                purchases: purchases_monthly,
                fixed_charges: fixed_monthly,
                taxes: taxes_monthly,
                payroll: payroll_monthly,
                bank_fees: fees_monthly,
                total_outflows,
                net_cash_flow,
                closing_balance: balance,
            }
        })
        .collect();

    for month in &months {
        if month.closing_balance < Decimal::ZERO {
            warnings.push(format!(
                "Month {}: cash balance is negative ({}).",
                month.month, month.closing_balance
            ));
        }
    }

    let output = CashBudgetOutput {
        ending_balance: balance,
        lowest_balance,
        months,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Year-1 Monthly Cash Budget",
        &serde_json::json!({
            "financing_inflows": input.financing_inflows.to_string(),
            "loan_payments_year1": input.loan_payments_year1.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
