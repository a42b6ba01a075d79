mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::assets::DepreciationArgs;
use commands::financing::{PlanArgs, StartupArgs};
use commands::loan::LoanArgs;
use commands::project::ProjectArgs;
use commands::revenue::RevenueArgs;
use commands::statements::{BfrArgs, BreakEvenArgs, CashBudgetArgs, IncomeArgs, SigArgs};

/// Three-year business-plan financial projections
#[derive(Parser)]
#[command(
    name = "bpl",
    version,
    about = "Three-year business-plan financial projections",
    long_about = "A CLI for building three-year business-plan projections with decimal \
                  precision. Supports loan amortization, startup needs/financing, revenue \
                  projection, income statement, management balances (SIG), break-even, \
                  working capital (BFR), financing plan and the monthly cash budget."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Amortize a fixed-rate loan into a repayment schedule
    Loan(LoanArgs),
    /// Aggregate startup needs against financing sources
    Startup(StartupArgs),
    /// Straight-line depreciation schedule for startup assets
    Depreciation(DepreciationArgs),
    /// Project revenue from monthly activity assumptions
    Revenue(RevenueArgs),
    /// Build the three-year income statement
    IncomeStatement(IncomeArgs),
    /// Derive the intermediate management balances (SIG)
    Sig(SigArgs),
    /// Break-even analysis per projection year
    BreakEven(BreakEvenArgs),
    /// Working capital requirement (BFR) from payment delays
    Bfr(BfrArgs),
    /// Three-year financing plan (uses against sources)
    FinancingPlan(PlanArgs),
    /// Year-1 monthly cash budget
    CashBudget(CashBudgetArgs),
    /// Run the full projection pipeline from one input file
    Project(ProjectArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Loan(args) => commands::loan::run_loan(args),
        Commands::Startup(args) => commands::financing::run_startup(args),
        Commands::Depreciation(args) => commands::assets::run_depreciation(args),
        Commands::Revenue(args) => commands::revenue::run_revenue(args),
        Commands::IncomeStatement(args) => commands::statements::run_income_statement(args),
        Commands::Sig(args) => commands::statements::run_sig(args),
        Commands::BreakEven(args) => commands::statements::run_break_even(args),
        Commands::Bfr(args) => commands::statements::run_bfr(args),
        Commands::FinancingPlan(args) => commands::financing::run_plan(args),
        Commands::CashBudget(args) => commands::statements::run_cash_budget(args),
        Commands::Project(args) => commands::project::run_project(args),
        Commands::Version => {
            println!("bpl {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
