//! Command line interface of the WAR builder action.
//!
//! This is the configuration boundary: runner values come from clap, action
//! inputs are snapshotted from the environment once, and everything below
//! receives them as explicit values.

mod args;
pub mod commands;
mod docker;
pub mod output;
mod template;

pub use args::{Args, Command, RuntimeConfig};
pub use output::OutputManager;

use crate::config::{ActionInputs, BuildConfig};
use crate::error::Result;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    let inputs = ActionInputs::from_env();
    execute(&args, &inputs).await?;
    Ok(0)
}

/// Runs the step selected by `args` against `inputs`.
pub async fn execute(args: &Args, inputs: &ActionInputs) -> Result<()> {
    let runtime_config = RuntimeConfig::from(args);

    match args.command {
        Command::Setup => {
            let config = BuildConfig::from_inputs(inputs, args.runner_context()?)?;
            commands::setup(&config, &runtime_config).await
        }
        Command::Build => {
            let config = BuildConfig::from_inputs(inputs, args.runner_context()?)?;
            commands::build(&config, &runtime_config).await
        }
        Command::Cleanup => {
            commands::cleanup(
                inputs.get("servoy-version"),
                &args.image_repository,
                &runtime_config,
            )
            .await;
            Ok(())
        }
    }
}
