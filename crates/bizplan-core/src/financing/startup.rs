use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::BizPlanError;
use crate::financing::loan::{compute_schedule, LoanInput, LoanSchedule};
use crate::types::*;
use crate::BizPlanResult;

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// A named startup cost or financing bucket with a single amount.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartupItem {
    pub name: String,
    pub amount: Money,
}

/// Itemized startup costs, grouped by category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartupNeedsInput {
    /// Deposits, licences, incorporation fees, software...
    pub intangible: Vec<StartupItem>,
    /// Equipment, vehicles, fit-out...
    pub tangible: Vec<StartupItem>,
    /// Initial stock purchase (posted to year 1 of the financing plan)
    pub initial_stock: Money,
    /// Initial cash, launch marketing and other one-off needs
    pub other: Vec<StartupItem>,
}

/// A grant or subsidy. Open-ended list: the engine imposes no slot count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grant {
    pub name: String,
    pub amount: Money,
}

/// Itemized financing sources.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancingInput {
    /// Personal/family cash contribution
    pub personal_contribution: Money,
    /// In-kind contribution (equipment brought into the business)
    pub in_kind_contribution: Money,
    pub loans: Vec<LoanInput>,
    pub grants: Vec<Grant>,
    pub other: Vec<StartupItem>,
}

/// Combined input for the needs/financing aggregation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartupFinancingInput {
    pub needs: StartupNeedsInput,
    pub financing: FinancingInput,
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Reconciliation state between total needs and total financing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BalanceState {
    /// Financing covers needs exactly
    Balanced,
    /// Financing exceeds needs
    Surplus,
    /// Financing falls short of needs
    Deficit,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartupFinancingOutput {
    pub intangible_total: Money,
    pub tangible_total: Money,
    pub stock_total: Money,
    pub other_needs_total: Money,
    pub total_needs: Money,

    pub equity_total: Money,
    pub loan_total: Money,
    pub grant_total: Money,
    pub other_financing_total: Money,
    pub total_financing: Money,

    /// Per-loan repayment detail, in input order
    pub loans: Vec<LoanSchedule>,

    pub balance: BalanceState,
    /// total_financing - total_needs (negative when in deficit)
    pub gap: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Sum itemized startup costs and financing sources into comparable totals,
/// amortizing each loan along the way.
///
/// An imbalance between needs and financing is a warning with the gap called
/// out, never an error: generation proceeds with both totals shown.
pub fn aggregate_startup_financing(
    input: &StartupFinancingInput,
) -> BizPlanResult<ComputationOutput<StartupFinancingOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_items("needs.intangible", &input.needs.intangible)?;
    validate_items("needs.tangible", &input.needs.tangible)?;
    validate_items("needs.other", &input.needs.other)?;
    validate_items("financing.other", &input.financing.other)?;
    if input.needs.initial_stock < Decimal::ZERO {
        return Err(BizPlanError::InvalidInput {
            field: "needs.initial_stock".into(),
            reason: "Stock amount cannot be negative".into(),
        });
    }
    for g in &input.financing.grants {
        if g.amount < Decimal::ZERO {
            return Err(BizPlanError::InvalidInput {
                field: format!("financing.grants:{}", g.name),
                reason: "Grant amount cannot be negative".into(),
            });
        }
    }
    for l in &input.financing.loans {
        if l.principal < Decimal::ZERO {
            return Err(BizPlanError::InvalidInput {
                field: format!("financing.loans:{}", l.name),
                reason: "Loan principal cannot be negative".into(),
            });
        }
    }

    let intangible_total = sum_items(&input.needs.intangible);
    let tangible_total = sum_items(&input.needs.tangible);
    let stock_total = input.needs.initial_stock;
    let other_needs_total = sum_items(&input.needs.other);
    let total_needs = intangible_total + tangible_total + stock_total + other_needs_total;

    let equity_total =
        input.financing.personal_contribution + input.financing.in_kind_contribution;
    let loan_total: Money = input.financing.loans.iter().map(|l| l.principal).sum();
    let grant_total: Money = input.financing.grants.iter().map(|g| g.amount).sum();
    let other_financing_total = sum_items(&input.financing.other);
    let total_financing = equity_total + loan_total + grant_total + other_financing_total;

    let loans: Vec<LoanSchedule> = input
        .financing
        .loans
        .iter()
        .map(|l| compute_schedule(l, &mut warnings))
        .collect();

    let gap = total_financing - total_needs;
    let balance = if gap.is_zero() {
        BalanceState::Balanced
    } else if gap > Decimal::ZERO {
        warnings.push(format!(
            "Financing exceeds startup needs by {gap}; the surplus flows into initial cash."
        ));
        BalanceState::Surplus
    } else {
        warnings.push(format!(
            "Financing falls short of startup needs by {}; the plan starts underfunded.",
            -gap
        ));
        BalanceState::Deficit
    };

    let output = StartupFinancingOutput {
        intangible_total,
        tangible_total,
        stock_total,
        other_needs_total,
        total_needs,
        equity_total,
        loan_total,
        grant_total,
        other_financing_total,
        total_financing,
        loans,
        balance,
        gap,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Startup Needs & Financing Aggregation",
        &serde_json::json!({
            "needs_items": input.needs.intangible.len()
                + input.needs.tangible.len()
                + input.needs.other.len(),
            "loans": input.financing.loans.len(),
            "grants": input.financing.grants.len(),
        }),
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn sum_items(items: &[StartupItem]) -> Money {
    items.iter().map(|i| i.amount).sum()
}

fn validate_items(field: &str, items: &[StartupItem]) -> BizPlanResult<()> {
    for item in items {
        if item.amount < Decimal::ZERO {
            return Err(BizPlanError::InvalidInput {
                field: format!("{field}:{}", item.name),
                reason: "Item amount cannot be negative".into(),
            });
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
