use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Financing
// ---------------------------------------------------------------------------

#[napi]
pub fn amortize_loan(input_json: String) -> NapiResult<String> {
    let input: bizplan_core::financing::loan::LoanInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        bizplan_core::financing::loan::amortize_loan(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn startup_financing(input_json: String) -> NapiResult<String> {
    let input: bizplan_core::financing::startup::StartupFinancingInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = bizplan_core::financing::startup::aggregate_startup_financing(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn financing_plan(input_json: String) -> NapiResult<String> {
    let input: bizplan_core::financing::plan::FinancingPlanInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        bizplan_core::financing::plan::build_financing_plan(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Assets / Revenue / Costs
// ---------------------------------------------------------------------------

#[napi]
pub fn depreciation_schedule(input_json: String) -> NapiResult<String> {
    let input: bizplan_core::assets::depreciation::DepreciationInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = bizplan_core::assets::depreciation::build_depreciation_schedule(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn project_revenue(input_json: String) -> NapiResult<String> {
    let input: bizplan_core::revenue::projection::RevenueInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        bizplan_core::revenue::projection::project_revenue(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn operating_costs(input_json: String) -> NapiResult<String> {
    let input: bizplan_core::costs::operating::OperatingCostsInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = bizplan_core::costs::operating::aggregate_operating_costs(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn social_charges(input_json: String) -> NapiResult<String> {
    let input: bizplan_core::costs::social::SocialChargesInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        bizplan_core::costs::social::compute_social_charges(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Statements
// ---------------------------------------------------------------------------

#[napi]
pub fn income_statement(input_json: String) -> NapiResult<String> {
    let input: bizplan_core::statements::income::IncomeStatementInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = bizplan_core::statements::income::build_income_statement(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn sig_table(input_json: String) -> NapiResult<String> {
    let input: bizplan_core::statements::sig::SigInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = bizplan_core::statements::sig::build_sig_table(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn break_even(input_json: String) -> NapiResult<String> {
    let input: bizplan_core::statements::break_even::BreakEvenInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        bizplan_core::statements::break_even::analyze_break_even(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn working_capital(input_json: String) -> NapiResult<String> {
    let input: bizplan_core::statements::working_capital::WorkingCapitalInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = bizplan_core::statements::working_capital::compute_working_capital(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn cash_budget(input_json: String) -> NapiResult<String> {
    let input: bizplan_core::statements::cash_budget::CashBudgetInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = bizplan_core::statements::cash_budget::build_cash_budget(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

#[napi]
pub fn run_projection(input_json: String) -> NapiResult<String> {
    let input: bizplan_core::pipeline::ProjectionInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = bizplan_core::pipeline::run_projection(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
