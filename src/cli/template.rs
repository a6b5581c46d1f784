//! `${VAR}` substitution in properties files.
//!
//! Each file is piped through the `envsubst` binary, which resolves
//! placeholders against the inherited process environment, and rewritten
//! in place before the builder container mounts the workspace.

use crate::cli::RuntimeConfig;
use crate::error::{BuilderError, CliError};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Substitutes every existing file in `files`; missing files are skipped.
pub async fn substitute_templates(
    files: &[PathBuf],
    runtime_config: &RuntimeConfig,
) -> Result<(), BuilderError> {
    for file in files {
        if !tokio::fs::try_exists(file).await.unwrap_or(false) {
            runtime_config.info(&format!(
                "Properties file not found, skipping template substitution: {}",
                file.display()
            ));
            continue;
        }

        runtime_config.info(&format!("Substituting variables in {}", file.display()));
        substitute_file(runtime_config.envsubst(), file).await?;
    }
    Ok(())
}

/// Rewrites `file` with the output of `envsubst < file`.
pub async fn substitute_file(envsubst: &Path, file: &Path) -> Result<(), BuilderError> {
    let failed = |reason: String| CliError::TemplateFailed {
        file: file.to_path_buf(),
        reason,
    };

    let template = tokio::fs::read(file).await?;

    let mut child = Command::new(envsubst)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| failed(format!("cannot run {}: {}", envsubst.display(), e)))?;

    let stdin = child.stdin.take();
    let feed = async move {
        if let Some(mut stdin) = stdin {
            // A tool that exits early closes the pipe; its exit status decides
            if let Err(e) = stdin.write_all(&template).await {
                log::debug!("envsubst stdin closed early: {}", e);
            }
        }
    };
    let ((), output) = tokio::join!(feed, child.wait_with_output());
    let output = output.map_err(|e| failed(e.to_string()))?;

    match output.status.code() {
        Some(0) => {}
        Some(code) => {
            return Err(failed(format!(
                "exit code {}: {}",
                code,
                String::from_utf8_lossy(&output.stderr).trim()
            ))
            .into());
        }
        None => return Err(failed("terminated by signal".to_string()).into()),
    }

    tokio::fs::write(file, &output.stdout).await?;
    Ok(())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn runtime(envsubst: &str) -> RuntimeConfig {
        RuntimeConfig::new(PathBuf::from("docker"), PathBuf::from(envsubst), None)
    }

    #[tokio::test]
    async fn file_is_rewritten_with_tool_output() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("servoy.properties");
        std::fs::write(&file, "server.url=${DB_URL}\n").unwrap();

        // `cat` stands in for a tool that leaves the text unchanged
        substitute_templates(&[file.clone()], &runtime("cat"))
            .await
            .unwrap();
        assert_eq!(
            std::fs::read_to_string(&file).unwrap(),
            "server.url=${DB_URL}\n"
        );
    }

    #[tokio::test]
    async fn missing_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.properties");
        substitute_templates(&[missing.clone()], &runtime("false"))
            .await
            .unwrap();
        assert!(!missing.exists());
    }

    #[tokio::test]
    async fn failure_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("war.properties");
        std::fs::write(&file, "a=b\n").unwrap();

        let err = substitute_templates(&[file.clone()], &runtime("false"))
            .await
            .unwrap_err();
        assert!(matches!(
            &err,
            BuilderError::Cli(CliError::TemplateFailed { file: failed, .. }) if failed == &file
        ));
        assert!(err.to_string().contains("war.properties"));
        assert_eq!(std::fs::read_to_string(&file).unwrap(), "a=b\n");
    }

    #[tokio::test]
    async fn missing_tool_is_a_template_failure() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("servoy.properties");
        std::fs::write(&file, "a=b\n").unwrap();
        let err = substitute_file(Path::new("/nonexistent/envsubst"), &file)
            .await
            .unwrap_err();
        assert!(matches!(err, BuilderError::Cli(CliError::TemplateFailed { .. })));
    }
}
