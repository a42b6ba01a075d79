use clap::Args;
use serde_json::Value;

use bizplan_core::revenue::projection::{project_revenue, RevenueInput};

use crate::input;

/// Arguments for revenue projection
#[derive(Args)]
pub struct RevenueArgs {
    /// Path to JSON/YAML input file with the monthly activity detail
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_revenue(args: RevenueArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let revenue_input: RevenueInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input file is required for revenue projection".into());
    };

    let result = project_revenue(&revenue_input)?;
    Ok(serde_json::to_value(result)?)
}
