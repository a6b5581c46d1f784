//! Pre step: make sure the builder image for the requested version exists
//! and is available locally.

use crate::cli::RuntimeConfig;
use crate::cli::docker::image::{check_docker_available, inspect_manifest, pull_image};
use crate::config::BuildConfig;
use crate::error::Result;

/// Checks the registry for the builder image and pulls it.
///
/// The configuration is already validated, so a bad version or license
/// never reaches the network.
pub async fn setup(config: &BuildConfig, runtime_config: &RuntimeConfig) -> Result<()> {
    let version = &config.version;
    let image = config.image_reference();

    runtime_config.info(&format!(
        "Checking for existence of WAR builder for Servoy version: {}",
        version
    ));
    let docker = check_docker_available(runtime_config.docker()).await?;
    inspect_manifest(&docker, version, &image, runtime_config).await?;

    runtime_config.info(&format!(
        "Downloading WAR builder for Servoy version: {}",
        version
    ));
    pull_image(&docker, version, &image).await?;

    runtime_config.success(&format!("WAR builder ready: {}", image));
    Ok(())
}
