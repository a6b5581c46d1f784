//! Servoy WAR builder - GitHub Action entry point.
//!
//! Exit code 0 means the step succeeded; failures are reported as an
//! `::error::` workflow command and exit code 1.

use servoy_war_builder::cli;
use servoy_war_builder::cli::output::workflow_command;
use std::process;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            println!("{}", workflow_command("error", &e.to_string()));
            1
        }
    };

    process::exit(exit_code);
}
