//! Builder image lifecycle: registry lookup, pull and local removal.

use crate::cli::RuntimeConfig;
use crate::config::ServoyVersion;
use crate::error::{BuilderError, CliError};
use std::io::Read;
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use wait_timeout::ChildExt;

use super::age::image_age;
use super::config::{DOCKER_PULL_TIMEOUT, IMAGE_CLEANUP_TIMEOUT, MANIFEST_INSPECT_TIMEOUT};
use super::manifest::manifest_platforms;
use super::utils::humanize_age;

/// Checks the registry for the builder image of `version`.
///
/// # Returns
///
/// * `Ok(())` - The registry has a manifest for `image`
/// * `Err(CliError::VersionNotFound)` - Lookup exited non-zero or was killed;
///   docker's exit code and output are logged first
pub async fn inspect_manifest(
    docker: &Path,
    version: &ServoyVersion,
    image: &str,
    runtime_config: &RuntimeConfig,
) -> Result<(), BuilderError> {
    let output = timeout(
        MANIFEST_INSPECT_TIMEOUT,
        Command::new(docker)
            .args(["manifest", "inspect", image])
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output(),
    )
    .await
    .map_err(|_| CliError::ExecutionFailed {
        command: "docker manifest inspect".to_string(),
        reason: format!(
            "Manifest lookup timed out after {} seconds",
            MANIFEST_INSPECT_TIMEOUT.as_secs()
        ),
    })?
    .map_err(|e| CliError::ExecutionFailed {
        command: "docker manifest inspect".to_string(),
        reason: e.to_string(),
    })?;

    let stdout = String::from_utf8_lossy(&output.stdout);

    if output.status.code() != Some(0) {
        runtime_config.info(&format!(
            "Docker return code: {}",
            output
                .status
                .code()
                .map_or_else(|| "none".to_string(), |c| c.to_string())
        ));
        runtime_config.info(&format!("Docker stdout: {}", stdout.trim()));
        runtime_config.info(&format!(
            "Docker stderr: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        ));
        return Err(CliError::VersionNotFound {
            version: version.to_string(),
        }
        .into());
    }

    match manifest_platforms(&stdout) {
        Ok(platforms) => runtime_config.debug(&format!(
            "Builder image {} available for: {}",
            image,
            platforms.join(", ")
        )),
        Err(e) => log::debug!("Could not parse manifest of {}: {}", image, e),
    }

    Ok(())
}

/// Pulls the builder image, relaying docker's progress output.
pub async fn pull_image(
    docker: &Path,
    version: &ServoyVersion,
    image: &str,
) -> Result<(), BuilderError> {
    let status = timeout(
        DOCKER_PULL_TIMEOUT,
        Command::new(docker)
            .args(["pull", image])
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .status(),
    )
    .await;

    match status {
        Ok(Ok(status)) if status.code() == Some(0) => Ok(()),
        Ok(Ok(status)) => {
            log::debug!("docker pull exited with {:?}", status.code());
            Err(CliError::DownloadFailed {
                version: version.to_string(),
            }
            .into())
        }
        Ok(Err(e)) => {
            log::debug!("docker pull could not run: {}", e);
            Err(CliError::DownloadFailed {
                version: version.to_string(),
            }
            .into())
        }
        Err(_elapsed) => {
            log::warn!(
                "docker pull timed out after {} minutes",
                DOCKER_PULL_TIMEOUT.as_secs() / 60
            );
            Err(CliError::DownloadFailed {
                version: version.to_string(),
            }
            .into())
        }
    }
}

/// What cleanup found and did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageRemoval {
    /// No local copy of the image
    NotPresent,
    /// Image removed; `age` is how old the image was, when docker reported it
    Removed { age: Option<String> },
    /// Image present but `docker rmi` failed
    Failed { reason: String },
}

/// Removes the local copy of `image`, if any. Blocking.
pub fn remove_local_image(docker: &Path, image: &str) -> ImageRemoval {
    let mut inspect = std::process::Command::new(docker);
    inspect.args(["image", "inspect", "-f", "{{.Created}}", image]);

    let created = match output_with_timeout(inspect, IMAGE_CLEANUP_TIMEOUT) {
        Ok(Some((status, stdout))) if status.success() => stdout,
        Ok(Some(_)) => return ImageRemoval::NotPresent,
        Ok(None) => {
            return ImageRemoval::Failed {
                reason: "docker image inspect timed out".to_string(),
            };
        }
        Err(e) => {
            return ImageRemoval::Failed {
                reason: format!("docker image inspect failed: {}", e),
            };
        }
    };

    let age = image_age(&created, chrono::Utc::now())
        .map(humanize_age)
        .map_err(|e| log::debug!("{}", e))
        .ok();

    let mut rmi = std::process::Command::new(docker);
    rmi.args(["rmi", image]);

    match output_with_timeout(rmi, IMAGE_CLEANUP_TIMEOUT) {
        Ok(Some((status, _))) if status.success() => ImageRemoval::Removed { age },
        Ok(Some((status, _))) => ImageRemoval::Failed {
            reason: format!("docker rmi exited with {:?}", status.code()),
        },
        Ok(None) => ImageRemoval::Failed {
            reason: "docker rmi timed out".to_string(),
        },
        Err(e) => ImageRemoval::Failed {
            reason: format!("docker rmi failed: {}", e),
        },
    }
}

/// Runs `command`, killing it after `limit`.
///
/// Stdout is drained on a separate thread so a chatty child cannot block
/// on a full pipe while we wait for it.
fn output_with_timeout(
    mut command: std::process::Command,
    limit: Duration,
) -> std::io::Result<Option<(ExitStatus, String)>> {
    let mut child = command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()?;

    let reader = child.stdout.take().map(|mut out| {
        std::thread::spawn(move || {
            let mut bytes = Vec::new();
            out.read_to_end(&mut bytes).map(|_| bytes)
        })
    });

    let status = match child.wait_timeout(limit)? {
        Some(status) => status,
        None => {
            child.kill()?;
            child.wait()?;
            return Ok(None);
        }
    };

    let stdout = match reader {
        Some(handle) => handle
            .join()
            .map_err(|_| std::io::Error::other("stdout reader panicked"))??,
        None => Vec::new(),
    };

    Ok(Some((status, String::from_utf8_lossy(&stdout).into_owned())))
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use std::path::PathBuf;

    /// Writes an executable stand-in for docker.
    fn fake_docker(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("docker");
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn version() -> ServoyVersion {
        ServoyVersion::parse("2023.03.1.3844").unwrap()
    }

    fn runtime() -> RuntimeConfig {
        RuntimeConfig::new(PathBuf::from("docker"), PathBuf::from("envsubst"), None)
    }

    #[tokio::test]
    async fn manifest_found() {
        let dir = tempfile::tempdir().unwrap();
        let docker = fake_docker(dir.path(), r#"echo '{"schemaVersion":2,"manifests":[]}'"#);
        inspect_manifest(&docker, &version(), "img:1", &runtime())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn manifest_missing_is_version_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let docker = fake_docker(dir.path(), "echo 'no such manifest' >&2; exit 1");
        let err = inspect_manifest(&docker, &version(), "img:1", &runtime())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Servoy version not found: 2023.03.1.3844");
    }

    #[tokio::test]
    async fn failed_pull_is_download_failed() {
        let dir = tempfile::tempdir().unwrap();
        let docker = fake_docker(dir.path(), "exit 2");
        let err = pull_image(&docker, &version(), "img:1").await.unwrap_err();
        assert!(matches!(
            err,
            BuilderError::Cli(CliError::DownloadFailed { .. })
        ));
        let other = tempfile::tempdir().unwrap();
        let ok = fake_docker(other.path(), "exit 0");
        pull_image(&ok, &version(), "img:1").await.unwrap();
    }

    #[test]
    fn removal_skips_absent_images() {
        let dir = tempfile::tempdir().unwrap();
        let docker = fake_docker(dir.path(), "exit 1");
        assert_eq!(remove_local_image(&docker, "img:1"), ImageRemoval::NotPresent);
    }

    #[test]
    fn removal_reports_age() {
        let dir = tempfile::tempdir().unwrap();
        let docker = fake_docker(
            dir.path(),
            r#"if [ "$1" = "image" ]; then echo 2000-01-01T00:00:00Z; fi; exit 0"#,
        );
        match remove_local_image(&docker, "img:1") {
            ImageRemoval::Removed { age: Some(age) } => assert!(age.ends_with("days")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn removal_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let docker = fake_docker(
            dir.path(),
            r#"if [ "$1" = "rmi" ]; then exit 1; fi; echo bogus; exit 0"#,
        );
        assert!(matches!(
            remove_local_image(&docker, "img:1"),
            ImageRemoval::Failed { .. }
        ));
    }

    #[test]
    fn large_output_does_not_stall_the_wait() {
        let mut command = std::process::Command::new("sh");
        command.args(["-c", "i=0; while [ $i -lt 20000 ]; do echo line-$i; i=$((i+1)); done"]);
        let (status, stdout) = output_with_timeout(command, Duration::from_secs(30))
            .unwrap()
            .unwrap();
        assert!(status.success());
        assert_eq!(stdout.lines().count(), 20000);
        assert_eq!(stdout.lines().last(), Some("line-19999"));
    }

    #[test]
    fn slow_command_is_killed() {
        let mut command = std::process::Command::new("sh");
        command.args(["-c", "exec sleep 30"]);
        assert!(
            output_with_timeout(command, Duration::from_millis(200))
                .unwrap()
                .is_none()
        );
    }
}
