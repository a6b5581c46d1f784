//! Docker container execution and process management.

use crate::error::{BuilderError, CliError};
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::process::Command;

/// Grace period for reaping a killed process
const KILL_REAP_TIMEOUT: Duration = Duration::from_secs(10);

/// Result of container execution
#[derive(Debug)]
pub struct ContainerRunResult {
    /// Exit status of the container
    pub status: ExitStatus,
    /// Everything the container wrote to stdout, one line per `\n`
    pub stdout: String,
    /// Captured stderr lines
    pub stderr_lines: Vec<String>,
}

/// Runs the builder container, relaying its output while it runs.
#[derive(Debug, Clone)]
pub struct ContainerRunner {
    docker: PathBuf,
    timeout: Option<Duration>,
}

impl ContainerRunner {
    /// Creates a new container runner.
    ///
    /// # Arguments
    ///
    /// * `docker` - Container runtime binary
    /// * `timeout` - Wall-clock limit for the whole run; `None` waits forever
    pub fn new(docker: impl Into<PathBuf>, timeout: Option<Duration>) -> Self {
        Self {
            docker: docker.into(),
            timeout,
        }
    }

    /// Runs `docker <docker_args>` and streams output.
    ///
    /// Stdout and stderr lines are relayed through `runtime_config` as they
    /// arrive. Stdout is also accumulated for classification.
    ///
    /// # Returns
    ///
    /// `ContainerRunResult` with exit status and captured output, or
    /// [`CliError::BuildTimeout`] once the timeout elapses; the process is
    /// killed in that case.
    pub async fn run_container(
        &self,
        docker_args: &[String],
        runtime_config: &crate::cli::RuntimeConfig,
    ) -> Result<ContainerRunResult, BuilderError> {
        let command_name = self.docker.display().to_string();

        let mut child = Command::new(&self.docker)
            .args(docker_args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| CliError::ExecutionFailed {
                command: format!("{} run", command_name),
                reason: e.to_string(),
            })?;

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        let run = async {
            // Both streams must be drained before the exit status is read
            let (stdout, stderr_lines) = tokio::join!(
                async {
                    let mut captured = String::new();
                    if let Some(stdout) = stdout {
                        let mut reader = BufReader::new(stdout);
                        while let Some(line) = next_lossy_line(&mut reader).await {
                            runtime_config.indent(&line);
                            captured.push_str(&line);
                            captured.push('\n');
                        }
                    }
                    captured
                },
                async {
                    let mut captured = Vec::new();
                    if let Some(stderr) = stderr {
                        let mut reader = BufReader::new(stderr);
                        while let Some(line) = next_lossy_line(&mut reader).await {
                            runtime_config.indent(&line);
                            captured.push(line);
                        }
                    }
                    captured
                }
            );
            child.wait().await.map(|status| ContainerRunResult {
                status,
                stdout,
                stderr_lines,
            })
        };

        let result = match self.timeout {
            None => run.await,
            Some(limit) => match tokio::time::timeout(limit, run).await {
                Ok(result) => result,
                Err(_elapsed) => {
                    // Timeout - kill the process
                    runtime_config.warn(&format!(
                        "Build timed out after {} seconds, terminating...",
                        limit.as_secs()
                    ));

                    if let Err(e) = child.kill().await {
                        log::warn!("Failed to kill {} process: {}", command_name, e);
                    }
                    let _ = tokio::time::timeout(KILL_REAP_TIMEOUT, child.wait()).await;

                    return Err(CliError::BuildTimeout {
                        seconds: limit.as_secs(),
                    }
                    .into());
                }
            },
        };

        result.map_err(|e| {
            CliError::ExecutionFailed {
                command: format!("{} run", command_name),
                reason: e.to_string(),
            }
            .into()
        })
    }
}

/// Next line of `reader` without its line terminator, `None` at EOF.
///
/// Bytes that are not UTF-8 are replaced rather than ending the stream.
async fn next_lossy_line<R: AsyncBufRead + Unpin>(reader: &mut R) -> Option<String> {
    let mut buf = Vec::new();
    match reader.read_until(b'\n', &mut buf).await {
        Ok(0) => None,
        Ok(_) => {
            if buf.last() == Some(&b'\n') {
                buf.pop();
                if buf.last() == Some(&b'\r') {
                    buf.pop();
                }
            }
            Some(String::from_utf8_lossy(&buf).into_owned())
        }
        Err(e) => {
            log::warn!("Failed to read builder output: {}", e);
            None
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::cli::RuntimeConfig;

    fn runtime() -> RuntimeConfig {
        RuntimeConfig::new(PathBuf::from("sh"), PathBuf::from("envsubst"), None)
    }

    fn script(body: &str) -> Vec<String> {
        vec!["-c".to_string(), body.to_string()]
    }

    #[tokio::test]
    async fn captures_stdout_and_stderr() {
        let runner = ContainerRunner::new("sh", None);
        let result = runner
            .run_container(&script("echo one; echo two; echo oops >&2; exit 3"), &runtime())
            .await
            .unwrap();
        assert_eq!(result.status.code(), Some(3));
        assert_eq!(result.stdout, "one\ntwo\n");
        assert_eq!(result.stderr_lines, ["oops"]);
    }

    #[tokio::test]
    async fn invalid_utf8_does_not_end_the_stream() {
        let runner = ContainerRunner::new("sh", None);
        let result = runner
            .run_container(
                &script(
                    "echo 'Found error markers in solution crm'; \
                     printf -- '- Form K\\374nde broken\\n'; \
                     echo '- err2'; \
                     echo 'Found warning markers in projects for solution crm'; \
                     echo '- warn1'; \
                     printf 'caf\\351\\n' >&2; echo after >&2; exit 1",
                ),
                &runtime(),
            )
            .await
            .unwrap();

        let classification = crate::classify::classify(&result.stdout);
        assert_eq!(classification.error_lines.len(), 2);
        assert_eq!(classification.error_lines[0], "- Form K\u{FFFD}nde broken");
        assert_eq!(classification.error_lines[1], "- err2");
        assert_eq!(classification.warning_lines, ["- warn1"]);
        assert_eq!(result.stderr_lines, ["caf\u{FFFD}", "after"]);
    }

    #[tokio::test]
    async fn crlf_line_endings_are_stripped() {
        let runner = ContainerRunner::new("sh", None);
        let result = runner
            .run_container(&script("printf 'one\\r\\ntwo'"), &runtime())
            .await
            .unwrap();
        assert_eq!(result.stdout, "one\ntwo\n");
    }

    #[tokio::test]
    async fn success_within_timeout() {
        let runner = ContainerRunner::new("sh", Some(Duration::from_secs(30)));
        let result = runner
            .run_container(&script("echo done"), &runtime())
            .await
            .unwrap();
        assert!(result.status.success());
    }

    #[tokio::test]
    async fn timeout_kills_the_process() {
        let runner = ContainerRunner::new("sh", Some(Duration::from_millis(200)));
        let started = std::time::Instant::now();
        let err = runner
            .run_container(&script("sleep 30"), &runtime())
            .await
            .unwrap_err();
        assert!(matches!(err, BuilderError::Cli(CliError::BuildTimeout { .. })));
        assert_eq!(err.to_string(), "Build timeout exceeded");
        assert!(started.elapsed() < Duration::from_secs(20));
    }

    #[tokio::test]
    async fn missing_binary_is_an_execution_error() {
        let runner = ContainerRunner::new("/nonexistent/docker", None);
        let err = runner.run_container(&[], &runtime()).await.unwrap_err();
        assert!(matches!(err, BuilderError::Cli(CliError::ExecutionFailed { .. })));
    }
}
