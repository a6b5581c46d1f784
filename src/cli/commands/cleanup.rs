//! Post step: remove the local builder image.
//!
//! Cleanup never fails the workflow; problems are only logged.

use crate::cli::RuntimeConfig;
use crate::cli::docker::image::{ImageRemoval, remove_local_image};
use crate::config::{ServoyVersion, image_reference};

/// Removes the builder image of `version` if it is present locally.
pub async fn cleanup(version: &str, image_repository: &str, runtime_config: &RuntimeConfig) {
    let version = match ServoyVersion::parse(version) {
        Ok(version) => version,
        Err(e) => {
            runtime_config.info(&format!("Skipping WAR builder cleanup: {}", e));
            return;
        }
    };
    let image = image_reference(image_repository, &version);

    let docker = runtime_config.docker().to_path_buf();
    let removal = {
        let image = image.clone();
        tokio::task::spawn_blocking(move || remove_local_image(&docker, &image)).await
    };

    match removal {
        Ok(ImageRemoval::NotPresent) => {
            log::debug!("{} is not present locally", image);
        }
        Ok(ImageRemoval::Removed { age }) => {
            runtime_config.info(&format!(
                "Deleted local WAR builder for Servoy version: {}{}",
                version,
                age.map(|age| format!(" (image built {} ago)", age))
                    .unwrap_or_default()
            ));
        }
        Ok(ImageRemoval::Failed { reason }) => {
            runtime_config.info(&format!(
                "Failed to remove local WAR builder for Servoy version: {} ({})",
                version, reason
            ));
        }
        Err(e) => {
            log::error!("cleanup task failed: {}", e);
        }
    }
}
