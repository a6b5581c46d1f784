//! Servoy WAR builder action.
//!
//! Builds Servoy WAR files by running the containerized Servoy WAR builder:
//! - [`config`] turns action inputs into a validated [`config::BuildConfig`]
//! - [`compose`] turns that configuration into the `docker run` command line
//! - [`classify`] sorts the builder's error and warning markers
//! - [`cli`] runs the setup, build and cleanup steps

pub mod classify;
pub mod cli;
pub mod compose;
pub mod config;
pub mod error;

// Re-export commonly used types
pub use classify::{ClassificationResult, classify};
pub use compose::compose;
pub use config::BuildConfig;
pub use error::{BuilderError, CliError, ConfigError, Result};
