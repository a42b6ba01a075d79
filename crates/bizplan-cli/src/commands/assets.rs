use clap::Args;
use serde_json::Value;

use bizplan_core::assets::depreciation::{build_depreciation_schedule, DepreciationInput};

use crate::input;

/// Arguments for the depreciation schedule
#[derive(Args)]
pub struct DepreciationArgs {
    /// Path to JSON/YAML input file with the asset list and horizon
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_depreciation(args: DepreciationArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let dep_input: DepreciationInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input file is required for the depreciation schedule".into());
    };

    let result = build_depreciation_schedule(&dep_input)?;
    Ok(serde_json::to_value(result)?)
}
