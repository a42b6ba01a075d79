use clap::Args;
use serde_json::Value;

use bizplan_core::financing::plan::{build_financing_plan, FinancingPlanInput};
use bizplan_core::financing::startup::{aggregate_startup_financing, StartupFinancingInput};

use crate::input;

/// Arguments for the startup needs/financing aggregation. Itemized lists
/// only make sense from a file or piped JSON, not flags.
#[derive(Args)]
pub struct StartupArgs {
    /// Path to JSON/YAML input file
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_startup(args: StartupArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let startup_input: StartupFinancingInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input file is required for startup financing".into());
    };

    let result = aggregate_startup_financing(&startup_input)?;
    Ok(serde_json::to_value(result)?)
}

/// Arguments for the three-year financing plan
#[derive(Args)]
pub struct PlanArgs {
    /// Path to JSON/YAML input file with the uses/sources detail
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_plan(args: PlanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let plan_input: FinancingPlanInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input file is required for the financing plan".into());
    };

    let result = build_financing_plan(&plan_input)?;
    Ok(serde_json::to_value(result)?)
}
