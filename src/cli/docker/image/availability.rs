//! Docker daemon availability checking.

use crate::error::{BuilderError, CliError};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tokio::time::timeout;

use super::config::{DOCKER_INFO_TIMEOUT, DOCKER_START_HELP};

/// Checks if Docker is installed and the daemon is running.
///
/// # Returns
///
/// * `Ok(path)` - Resolved docker binary; the daemon answered `docker info`
/// * `Err` - Docker is not installed or daemon is not running
pub async fn check_docker_available(docker: &Path) -> Result<PathBuf, BuilderError> {
    let resolved = which::which(docker).map_err(|e| CliError::ExecutionFailed {
        command: docker.display().to_string(),
        reason: format!(
            "Docker command not found: {}\n\
             \n\
             Docker does not appear to be installed on this runner.\n\
             Use a Linux runner image with Docker, e.g. ubuntu-latest.",
            e
        ),
    })?;
    log::debug!("Found docker at: {}", resolved.display());

    let status_result = timeout(
        DOCKER_INFO_TIMEOUT,
        Command::new(&resolved)
            .arg("info")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status(),
    )
    .await;

    match status_result {
        Err(_) => Err(CliError::ExecutionFailed {
            command: "docker info".to_string(),
            reason: format!(
                "Docker daemon check timed out after {} seconds.\n{}",
                DOCKER_INFO_TIMEOUT.as_secs(),
                DOCKER_START_HELP
            ),
        }
        .into()),

        Ok(Ok(status)) if status.success() => Ok(resolved),

        Ok(Ok(status)) => Err(CliError::ExecutionFailed {
            command: "docker info".to_string(),
            reason: format!(
                "Docker daemon is not responding (exit code: {}).\n{}",
                status.code().unwrap_or(-1),
                DOCKER_START_HELP
            ),
        }
        .into()),

        Ok(Err(e)) => Err(CliError::ExecutionFailed {
            command: "docker info".to_string(),
            reason: e.to_string(),
        }
        .into()),
    }
}
