//! Command line argument parsing and validation.
//!
//! Runner-provided values (`GITHUB_WORKSPACE`, `GITHUB_REPOSITORY`,
//! `GITHUB_OUTPUT`) bind through clap `env` attributes; action inputs are
//! read separately through [`crate::config::ActionInputs`].

use crate::config::{DEFAULT_IMAGE_REPOSITORY, RunnerContext};
use crate::error::CliError;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Builds Servoy WAR files in the containerized WAR builder
#[derive(Parser, Debug)]
#[command(
    name = "servoy_war_builder",
    version,
    about = "Builds Servoy WAR files in the containerized WAR builder",
    long_about = "Runs the pre, main and post steps of the Servoy WAR builder action.

Action inputs are read from INPUT_* environment variables.

Usage:
  servoy_war_builder setup     # validate inputs, pull the builder image
  servoy_war_builder build     # substitute templates, run the WAR build
  servoy_war_builder cleanup   # remove the local builder image"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Checked-out repository mounted into the builder
    #[arg(long, env = "GITHUB_WORKSPACE", default_value = ".", global = true)]
    pub workspace: PathBuf,

    /// Calling repository, `owner/name`
    #[arg(long, env = "GITHUB_REPOSITORY", default_value = "", global = true)]
    pub repository: String,

    /// File receiving step outputs
    #[arg(long, env = "GITHUB_OUTPUT", global = true)]
    pub github_output: Option<PathBuf>,

    /// Registry path of the builder images
    #[arg(long, default_value = DEFAULT_IMAGE_REPOSITORY, global = true)]
    pub image_repository: String,

    /// Container runtime binary
    #[arg(long, default_value = "docker", global = true)]
    pub docker: PathBuf,

    /// Template substitution binary
    #[arg(long, default_value = "envsubst", global = true)]
    pub envsubst: PathBuf,

    /// Print debug messages directly instead of as debug workflow commands
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Action step to run
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Pre step: validate inputs, check and pull the builder image
    Setup,
    /// Main step: build the WAR
    Build,
    /// Post step: remove the local builder image
    Cleanup,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Resolves the workspace to an absolute directory for bind mounts.
    pub fn runner_context(&self) -> Result<RunnerContext, CliError> {
        let workspace = self.workspace.canonicalize().map_err(|e| CliError::ExecutionFailed {
            command: "resolve workspace path".to_string(),
            reason: format!(
                "Cannot resolve workspace path '{}': {}",
                self.workspace.display(),
                e
            ),
        })?;

        if !workspace.is_dir() {
            return Err(CliError::ExecutionFailed {
                command: "validate workspace".to_string(),
                reason: format!("Workspace path is not a directory: {}", workspace.display()),
            });
        }

        Ok(RunnerContext {
            workspace,
            repository: self.repository.clone(),
            image_repository: self.image_repository.clone(),
        })
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    output: super::OutputManager,
    docker: PathBuf,
    envsubst: PathBuf,
    github_output: Option<PathBuf>,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        Self {
            output: super::OutputManager::new(args.verbose),
            docker: args.docker.clone(),
            envsubst: args.envsubst.clone(),
            github_output: args.github_output.clone(),
        }
    }
}

impl RuntimeConfig {
    pub fn new(docker: PathBuf, envsubst: PathBuf, github_output: Option<PathBuf>) -> Self {
        Self {
            output: super::OutputManager::default(),
            docker,
            envsubst,
            github_output,
        }
    }

    pub fn docker(&self) -> &std::path::Path {
        &self.docker
    }

    pub fn envsubst(&self) -> &std::path::Path {
        &self.envsubst
    }

    pub fn github_output(&self) -> Option<&std::path::Path> {
        self.github_output.as_deref()
    }

    pub fn info(&self, message: &str) {
        self.output.info(message)
    }

    pub fn debug(&self, message: &str) {
        self.output.debug(message)
    }

    pub fn warn(&self, message: &str) {
        self.output.warn(message)
    }

    pub fn error(&self, message: &str) {
        self.output.error(message)
    }

    pub fn success(&self, message: &str) {
        self.output.success(message)
    }

    pub fn indent(&self, message: &str) {
        self.output.indent(message)
    }

    pub fn section(&self, title: &str) {
        self.output.section(title)
    }

    pub fn end_section(&self) {
        self.output.end_section()
    }
}
