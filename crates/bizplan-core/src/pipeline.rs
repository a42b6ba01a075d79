//! Full projection pipeline: one input snapshot in, every statement out.
//!
//! Stages run in dependency order; each stage's warnings are folded into the
//! final envelope with a stage prefix so callers see the whole picture in one
//! pass.

use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::assets::depreciation::{
    build_depreciation_schedule, AssetCategory, DepreciableAsset, DepreciationInput,
    DepreciationSchedule,
};
use crate::costs::operating::{
    aggregate_operating_costs, FixedCharge, OperatingCosts, OperatingCostsInput,
};
use crate::costs::social::{
    compute_social_charges, SocialCharges, SocialChargesInput, SocialRegime,
};
use crate::financing::plan::{build_financing_plan, FinancingPlanInput, FinancingPlanOutput};
use crate::financing::startup::{
    aggregate_startup_financing, StartupFinancingInput, StartupFinancingOutput,
};
use crate::revenue::projection::{project_revenue, RevenueInput, RevenueProjection};
use crate::statements::break_even::{analyze_break_even, BreakEvenInput, BreakEvenOutput};
use crate::statements::cash_budget::{build_cash_budget, CashBudgetInput, CashBudgetOutput};
use crate::statements::income::{
    build_income_statement, IncomeStatementInput, IncomeStatementOutput,
};
use crate::statements::sig::{build_sig_table, SigInput, SigTable};
use crate::statements::working_capital::{
    compute_working_capital, WorkingCapitalInput, WorkingCapitalOutput,
};
use crate::types::*;
use crate::BizPlanResult;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// Complete snapshot of the plan's assumptions, as gathered by the outer
/// form layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionInput {
    pub startup: StartupFinancingInput,
    pub revenue: RevenueInput,

    pub fixed_charges: Vec<FixedCharge>,
    /// Variable cost as a percent of goods revenue (40 = 40%)
    pub variable_cost_pct: Percent,
    /// CFE and other levies, excluding corporate tax
    pub taxes_and_duties_by_year: YearSeries,

    pub social_regime: SocialRegime,
    pub owner_draw_by_year: YearSeries,
    pub employee_wages_by_year: YearSeries,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_rate_override_pct: Option<Percent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_rate_override_pct: Option<Percent>,

    /// Straight-line horizon applied to every startup asset
    pub depreciation_horizon_years: u32,
    pub bank_fees_by_year: YearSeries,

    pub customer_credit_days: Days,
    pub supplier_debt_days: Days,
}

/// Every statement of the plan, computed from one input snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionOutput {
    pub startup_financing: StartupFinancingOutput,
    pub revenue: RevenueProjection,
    pub operating_costs: OperatingCosts,
    pub social_charges: SocialCharges,
    pub depreciation: DepreciationSchedule,
    pub income_statement: IncomeStatementOutput,
    pub sig: SigTable,
    pub break_even: BreakEvenOutput,
    pub working_capital: WorkingCapitalOutput,
    pub financing_plan: FinancingPlanOutput,
    pub cash_budget: CashBudgetOutput,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run every calculator in dependency order and assemble the full projection.
///
/// Fails fast on the first invalid or missing input; degenerate arithmetic
/// (zero revenue, zero-term loans, underfunded plans) flows through as
/// stage-prefixed warnings instead.
pub fn run_projection(input: &ProjectionInput) -> BizPlanResult<ComputationOutput<ProjectionOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let startup = collect(&mut warnings, "startup", aggregate_startup_financing(&input.startup)?);
    let revenue = collect(&mut warnings, "revenue", project_revenue(&input.revenue)?);

    let operating_costs = collect(
        &mut warnings,
        "costs",
        aggregate_operating_costs(&OperatingCostsInput {
            fixed_charges: input.fixed_charges.clone(),
            variable_cost_pct: input.variable_cost_pct,
            goods_revenue_by_year: revenue.goods_by_year,
        })?,
    );

    let social_charges = collect(
        &mut warnings,
        "social",
        compute_social_charges(&SocialChargesInput {
            regime: input.social_regime,
            owner_draw_by_year: input.owner_draw_by_year,
            employee_wages_by_year: input.employee_wages_by_year,
            owner_rate_override_pct: input.owner_rate_override_pct,
            employee_rate_override_pct: input.employee_rate_override_pct,
        })?,
    );

    let depreciation = collect(
        &mut warnings,
        "depreciation",
        build_depreciation_schedule(&DepreciationInput {
            assets: depreciable_assets(&input.startup),
            horizon_years: input.depreciation_horizon_years,
        })?,
    );

    // Per-year debt service, summed across all loans
    let mut loan_interest_by_year = zero_years();
    let mut loan_principal_by_year = zero_years();
    for loan in &startup.loans {
        loan_interest_by_year = add_years(&loan_interest_by_year, &loan.interest_by_year);
        loan_principal_by_year = add_years(&loan_principal_by_year, &loan.principal_by_year);
    }

    let income_statement = collect(
        &mut warnings,
        "income",
        build_income_statement(&IncomeStatementInput {
            revenue_by_year: revenue.total_by_year,
            variable_costs_by_year: operating_costs.variable_by_year,
            fixed_charges_by_year: operating_costs.fixed_by_year,
            taxes_and_duties_by_year: input.taxes_and_duties_by_year,
            employee_wages_by_year: input.employee_wages_by_year,
            employee_social_by_year: social_charges.employee_by_year,
            owner_draw_by_year: input.owner_draw_by_year,
            owner_social_by_year: social_charges.owner_by_year,
            bank_fees_by_year: input.bank_fees_by_year,
            loan_interest_by_year,
        })?,
    );

    let sig = collect(
        &mut warnings,
        "sig",
        build_sig_table(&SigInput {
            income: income_statement.clone(),
            depreciation_by_year: depreciation.total_by_year,
        })?,
    );

    let mut personnel_by_year = zero_years();
    let mut financial_charges_by_year = zero_years();
    for y in 0..PROJECTION_YEARS {
        personnel_by_year[y] = input.employee_wages_by_year[y]
            + input.owner_draw_by_year[y]
            + social_charges.total_by_year[y];
        financial_charges_by_year[y] = input.bank_fees_by_year[y] + loan_interest_by_year[y];
    }

    let break_even = collect(
        &mut warnings,
        "break_even",
        analyze_break_even(&BreakEvenInput {
            revenue_by_year: revenue.total_by_year,
            variable_costs_by_year: operating_costs.variable_by_year,
            external_charges_by_year: operating_costs.fixed_by_year,
            taxes_and_duties_by_year: input.taxes_and_duties_by_year,
            personnel_by_year,
            depreciation_by_year: depreciation.total_by_year,
            financial_charges_by_year,
        })?,
    );

    let working_capital = collect(
        &mut warnings,
        "working_capital",
        compute_working_capital(&WorkingCapitalInput {
            revenue_by_year: revenue.total_by_year,
            variable_costs_by_year: operating_costs.variable_by_year,
            customer_credit_days: input.customer_credit_days,
            supplier_debt_days: input.supplier_debt_days,
        })?,
    );

    let mut bfr_change = zero_years();
    for (y, year) in working_capital.years.iter().enumerate().take(PROJECTION_YEARS) {
        bfr_change[y] = year.bfr_change;
    }

    let fixed_asset_investment = startup.intangible_total + startup.tangible_total;

    let financing_plan = collect(
        &mut warnings,
        "financing_plan",
        build_financing_plan(&FinancingPlanInput {
            fixed_asset_investment,
            stock_acquisition: startup.stock_total,
            bfr_change,
            loan_principal_repayment: loan_principal_by_year,
            equity: startup.equity_total,
            loans_drawn: startup.loan_total,
            grants: startup.grant_total,
            other_financing: startup.other_financing_total,
            self_financing_capacity: sig.self_financing_capacity,
        })?,
    );

    let year1 = &income_statement.years[0];
    let cash_budget = collect(
        &mut warnings,
        "cash_budget",
        build_cash_budget(&CashBudgetInput {
            financing_inflows: startup.total_financing,
            goods_sales_monthly: revenue.goods_monthly_year1,
            services_sales_monthly: revenue.services_monthly_year1,
            fixed_asset_investment,
            stock_acquisition: startup.stock_total,
            loan_payments_year1: loan_interest_by_year[0] + loan_principal_by_year[0],
            purchases_year1: operating_costs.variable_by_year[0],
            fixed_charges_year1: operating_costs.fixed_by_year[0],
            taxes_year1: input.taxes_and_duties_by_year[0] + year1.corporate_tax,
            payroll_year1: personnel_by_year[0],
            bank_fees_year1: input.bank_fees_by_year[0],
        })?,
    );

    let output = ProjectionOutput {
        startup_financing: startup,
        revenue,
        operating_costs,
        social_charges,
        depreciation,
        income_statement,
        sig,
        break_even,
        working_capital,
        financing_plan,
        cash_budget,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Three-Year Business Plan Projection",
        &serde_json::json!({
            "social_regime": format!("{:?}", input.social_regime),
            "depreciation_horizon_years": input.depreciation_horizon_years,
            "variable_cost_pct": input.variable_cost_pct.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Fold a stage's warnings into the pipeline envelope and unwrap its result.
fn collect<T: Serialize>(
    warnings: &mut Vec<String>,
    stage: &str,
    output: ComputationOutput<T>,
) -> T {
    warnings.extend(output.warnings.into_iter().map(|w| format!("{stage}: {w}")));
    output.result
}

/// Startup intangible and tangible need items double as the depreciable
/// asset base; stock and other one-off needs are not depreciated.
fn depreciable_assets(startup: &StartupFinancingInput) -> Vec<DepreciableAsset> {
    let mut assets = Vec::with_capacity(startup.needs.intangible.len() + startup.needs.tangible.len());
    for item in &startup.needs.intangible {
        assets.push(DepreciableAsset {
            name: item.name.clone(),
            amount: item.amount,
            category: AssetCategory::Intangible,
        });
    }
    for item in &startup.needs.tangible {
        assets.push(DepreciableAsset {
            name: item.name.clone(),
            amount: item.amount,
            category: AssetCategory::Tangible,
        });
    }
    assets
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
