use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use bizplan_core::statements::break_even::{analyze_break_even, BreakEvenInput};
use bizplan_core::statements::cash_budget::{build_cash_budget, CashBudgetInput};
use bizplan_core::statements::income::{build_income_statement, IncomeStatementInput};
use bizplan_core::statements::sig::{build_sig_table, SigInput};
use bizplan_core::statements::working_capital::{compute_working_capital, WorkingCapitalInput};

use crate::input;

/// Arguments for the income statement
#[derive(Args)]
pub struct IncomeArgs {
    /// Path to JSON/YAML input file with the per-year aggregates
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the SIG table
#[derive(Args)]
pub struct SigArgs {
    /// Path to JSON/YAML input file (income statement + depreciation)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for break-even analysis
#[derive(Args)]
pub struct BreakEvenArgs {
    /// Path to JSON/YAML input file with the cost base
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the working capital requirement
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct BfrArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Revenue for years 1, 2 and 3
    #[arg(long, num_args = 3)]
    pub revenue: Option<Vec<Decimal>>,

    /// Variable costs for years 1, 2 and 3
    #[arg(long, num_args = 3)]
    pub variable_costs: Option<Vec<Decimal>>,

    /// Average payment delay granted to customers, in days
    #[arg(long)]
    pub customer_credit_days: Option<Decimal>,

    /// Average payment delay obtained from suppliers, in days
    #[arg(long)]
    pub supplier_debt_days: Option<Decimal>,
}

/// Arguments for the monthly cash budget
#[derive(Args)]
pub struct CashBudgetArgs {
    /// Path to JSON/YAML input file with the year-1 figures
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_income_statement(args: IncomeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let income_input: IncomeStatementInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input file is required for the income statement".into());
    };

    let result = build_income_statement(&income_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_sig(args: SigArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let sig_input: SigInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input file is required for the SIG table".into());
    };

    let result = build_sig_table(&sig_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_break_even(args: BreakEvenArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let be_input: BreakEvenInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input file is required for break-even analysis".into());
    };

    let result = analyze_break_even(&be_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_bfr(args: BfrArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let wc_input: WorkingCapitalInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        WorkingCapitalInput {
            revenue_by_year: year_series(
                args.revenue
                    .ok_or("--revenue Y1 Y2 Y3 is required (or provide --input)")?,
                "--revenue",
            )?,
            variable_costs_by_year: year_series(
                args.variable_costs
                    .ok_or("--variable-costs Y1 Y2 Y3 is required (or provide --input)")?,
                "--variable-costs",
            )?,
            customer_credit_days: args
                .customer_credit_days
                .ok_or("--customer-credit-days is required (or provide --input)")?,
            supplier_debt_days: args
                .supplier_debt_days
                .ok_or("--supplier-debt-days is required (or provide --input)")?,
        }
    };

    let result = compute_working_capital(&wc_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_cash_budget(args: CashBudgetArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let cb_input: CashBudgetInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input file is required for the cash budget".into());
    };

    let result = build_cash_budget(&cb_input)?;
    Ok(serde_json::to_value(result)?)
}

fn year_series(
    values: Vec<Decimal>,
    flag: &str,
) -> Result<[Decimal; 3], Box<dyn std::error::Error>> {
    values
        .try_into()
        .map_err(|_| format!("{flag} expects exactly 3 values (years 1-3)").into())
}
