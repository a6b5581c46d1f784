//! Main step: build the WAR in the builder container.

use crate::classify::{ClassificationResult, classify};
use crate::cli::RuntimeConfig;
use crate::cli::docker::ContainerRunner;
use crate::cli::docker::oom_detector::OomDetector;
use crate::cli::output::write_classification;
use crate::cli::template::substitute_templates;
use crate::compose::compose;
use crate::config::BuildConfig;
use crate::error::{CliError, Result};

/// Placeholder for secrets in logged command lines
const REDACTED: &str = "***";

/// Runs the WAR build described by `config`.
///
/// On a non-zero exit the builder's stdout is classified; marker lines are
/// annotated and written to the step outputs before the step fails.
pub async fn build(config: &BuildConfig, runtime_config: &RuntimeConfig) -> Result<()> {
    config.validate_mounts()?;
    let docker_args = compose(config)?;

    substitute_templates(&config.properties_files(), runtime_config).await?;

    runtime_config.debug(&format!(
        "{} {}",
        runtime_config.docker().display(),
        redact(&docker_args, config).join(" ")
    ));

    runtime_config.section(&format!(
        "Building WAR for solution {} (Servoy {})",
        config.solution_name, config.version
    ));
    let runner = ContainerRunner::new(runtime_config.docker(), config.timeout);
    let result = runner.run_container(&docker_args, runtime_config).await;
    runtime_config.end_section();
    let result = result?;

    if result.status.success() {
        runtime_config.success("WAR build finished");
        return Ok(());
    }

    let exit_code = result.status.code();
    log::debug!("builder exited with {:?}", exit_code);

    let classification = classify(&result.stdout);
    report(&classification, runtime_config)?;

    let detector = OomDetector::new(config.max_memory.clone());
    if detector.is_oom_failure(exit_code, &result.stdout, &result.stderr_lines) {
        runtime_config.warn(&detector.hint());
    }

    Err(CliError::BuildFailed { exit_code }.into())
}

/// Annotates marker lines and writes them to the step outputs.
fn report(classification: &ClassificationResult, runtime_config: &RuntimeConfig) -> Result<()> {
    for line in &classification.error_lines {
        runtime_config.error(line);
    }
    for line in &classification.warning_lines {
        runtime_config.warn(line);
    }

    match runtime_config.github_output() {
        Some(path) => write_classification(path, classification)?,
        None if !classification.is_empty() => {
            log::warn!("GITHUB_OUTPUT is not set; ERROR_OUTPUT and WARNING_OUTPUT not written")
        }
        None => {}
    }
    Ok(())
}

/// Command line with the API key and admin password masked.
fn redact(docker_args: &[String], config: &BuildConfig) -> Vec<String> {
    let secrets = [&config.api_key, &config.default_admin_password];
    docker_args
        .iter()
        .map(|arg| {
            if secrets.contains(&arg) {
                REDACTED.to_string()
            } else {
                arg.clone()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::config_with;

    #[test]
    fn secrets_are_redacted() {
        let config = config_with(&[]);
        let args = compose(&config).unwrap();
        let redacted = redact(&args, &config);
        assert!(!redacted.contains(&"key-123".to_string()));
        assert!(!redacted.contains(&"s3cret".to_string()));
        assert!(redacted.contains(&"admin".to_string()));
        assert_eq!(redacted.len(), args.len());
    }
}

#[cfg(all(test, unix))]
mod run_tests {
    use super::*;
    use crate::config::tests::{required_inputs, runner};
    use crate::config::ActionInputs;
    use crate::error::BuilderError;
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};

    fn fake_docker(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("fake-docker");
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn workspace_config(workspace: &Path) -> BuildConfig {
        BuildConfig::from_inputs(
            &ActionInputs::from_inputs(required_inputs()),
            runner(workspace),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn failed_build_writes_classified_outputs() {
        let workspace = tempfile::tempdir().unwrap();
        let tools = tempfile::tempdir().unwrap();
        let output_file = workspace.path().join("github_output");
        let docker = fake_docker(
            tools.path(),
            "echo 'Found error markers in solution crm'\n\
             echo '  - Form main: element missing'\n\
             echo 'Found warning markers in projects for solution crm'\n\
             echo '- unused variable'\n\
             exit 1",
        );
        let runtime = RuntimeConfig::new(docker, PathBuf::from("cat"), Some(output_file.clone()));

        let err = build(&workspace_config(workspace.path()), &runtime)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            BuilderError::Cli(CliError::BuildFailed { exit_code: Some(1) })
        ));
        assert_eq!(
            std::fs::read_to_string(&output_file).unwrap(),
            "ERROR_OUTPUT=- Form main: element missing\nWARNING_OUTPUT=- unused variable\n"
        );
    }

    #[tokio::test]
    async fn successful_build_receives_composed_arguments() {
        let workspace = tempfile::tempdir().unwrap();
        let tools = tempfile::tempdir().unwrap();
        let args_file = tools.path().join("args");
        let docker = fake_docker(
            tools.path(),
            &format!("printf '%s\\n' \"$@\" > {}", args_file.display()),
        );
        let runtime = RuntimeConfig::new(docker, PathBuf::from("cat"), None);
        let config = workspace_config(workspace.path());

        build(&config, &runtime).await.unwrap();

        let received = std::fs::read_to_string(&args_file).unwrap();
        let expected = compose(&config).unwrap().join("\n") + "\n";
        assert_eq!(received, expected);
    }

    #[tokio::test]
    async fn bad_mounts_fail_before_docker_runs() {
        let workspace = tempfile::tempdir().unwrap();
        let mut inputs = required_inputs();
        inputs.push(("extras-directory", "missing-extras"));
        let config = BuildConfig::from_inputs(
            &ActionInputs::from_inputs(inputs),
            runner(workspace.path()),
        )
        .unwrap();
        let runtime = RuntimeConfig::new(
            PathBuf::from("/nonexistent/docker"),
            PathBuf::from("cat"),
            None,
        );

        let err = build(&config, &runtime).await.unwrap_err();
        assert!(err.is_configuration_error());
    }
}
