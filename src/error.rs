//! Error types for WAR builder operations.
//!
//! Configuration errors are raised before any external process is launched.
//! External-tool errors carry whatever diagnostic context was captured.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for builder operations
pub type Result<T> = std::result::Result<T, BuilderError>;

/// Main error type for all builder operations
#[derive(Error, Debug)]
pub enum BuilderError {
    /// Invalid or incomplete action inputs
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// External tool errors
    #[error("{0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors from anyhow
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Configuration errors, all detected before docker is touched
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Version tag does not match the builder tag format
    #[error("Invalid Servoy version: {version}")]
    InvalidVersion {
        /// Rejected version string
        version: String,
    },

    /// License line did not tokenize into code, company and password
    #[error("Invalid license entry (expected 3 values, found {found}): {line}")]
    MalformedLicense {
        /// Offending line, as given
        line: String,
        /// Number of tokens found
        found: usize,
    },

    /// Required input is absent or empty
    #[error("Input required and not supplied: {name}")]
    MissingInput {
        /// Input name
        name: String,
    },

    /// Boolean input outside the YAML 1.2 core schema
    #[error(
        "Input does not meet YAML 1.2 \"Core Schema\" specification: {name}\n\
         Support boolean input list: `true | True | TRUE | false | False | FALSE`"
    )]
    InvalidBoolean {
        /// Input name
        name: String,
        /// Rejected value
        value: String,
    },

    /// Timeout is not a non-negative integer
    #[error("Invalid timeout: {value} (expected a non-negative number of seconds)")]
    InvalidTimeout {
        /// Rejected value
        value: String,
    },

    /// Extras directory does not exist
    #[error("Extras directory not found: {}", path.display())]
    ExtrasNotFound {
        /// Configured path
        path: PathBuf,
    },

    /// Extras directory lacks a required subdirectory
    #[error("Extras directory {} must contain a '{subdirectory}' directory", path.display())]
    ExtrasMissingSubdirectory {
        /// Configured path
        path: PathBuf,
        /// Required subdirectory name
        subdirectory: String,
    },

    /// Post-WAR extras directory does not exist
    #[error("Post-WAR extras directory not found: {}", path.display())]
    PostWarExtrasNotFound {
        /// Configured path
        path: PathBuf,
    },
}

/// Errors reported by external tools (docker, envsubst)
#[derive(Error, Debug)]
pub enum CliError {
    /// Command could not be executed or waited on
    #[error("Command execution failed: {command} - {reason}")]
    ExecutionFailed {
        /// Command that failed
        command: String,
        /// Reason for the error
        reason: String,
    },

    /// Registry has no builder image for the version
    #[error("Servoy version not found: {version}")]
    VersionNotFound {
        /// Requested version
        version: String,
    },

    /// `docker pull` failed
    #[error("Download of WAR builder failed for Servoy version: {version}")]
    DownloadFailed {
        /// Requested version
        version: String,
    },

    /// Template substitution failed for one properties file
    #[error("Template substitution failed for {}: {reason}", file.display())]
    TemplateFailed {
        /// Properties file being substituted
        file: PathBuf,
        /// Reason for the error
        reason: String,
    },

    /// Builder container exited unsuccessfully
    #[error("WAR build failed. Please check the logs for more details.")]
    BuildFailed {
        /// Exit code, when the process was not killed by a signal
        exit_code: Option<i32>,
    },

    /// Builder container exceeded the configured timeout
    #[error("Build timeout exceeded")]
    BuildTimeout {
        /// Configured timeout in seconds
        seconds: u64,
    },
}

impl BuilderError {
    /// True for errors raised before any external process ran
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, BuilderError::Config(_))
    }
}
