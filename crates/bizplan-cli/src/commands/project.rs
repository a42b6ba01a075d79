use clap::Args;
use serde_json::Value;

use bizplan_core::pipeline::{run_projection, ProjectionInput};

use crate::input;

/// Arguments for the full projection pipeline
#[derive(Args)]
pub struct ProjectArgs {
    /// Path to JSON/YAML input file with the complete plan snapshot
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_project(args: ProjectArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let projection_input: ProjectionInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input file is required for a full projection".into());
    };

    let result = run_projection(&projection_input)?;
    Ok(serde_json::to_value(result)?)
}
