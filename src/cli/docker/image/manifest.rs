//! Registry manifests as printed by `docker manifest inspect`.

use crate::error::Result;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Manifest {
    #[serde(default)]
    media_type: Option<String>,
    #[serde(default)]
    manifests: Vec<ManifestEntry>,
}

#[derive(Debug, Deserialize)]
struct ManifestEntry {
    #[serde(default)]
    platform: Option<Platform>,
}

#[derive(Debug, Deserialize)]
struct Platform {
    os: String,
    architecture: String,
    #[serde(default)]
    variant: Option<String>,
}

/// Platforms listed in a manifest list, as `os/arch[/variant]`.
///
/// A single-platform manifest yields its media type instead.
pub fn manifest_platforms(json: &str) -> Result<Vec<String>> {
    let manifest: Manifest = serde_json::from_str(json)?;

    if manifest.manifests.is_empty() {
        return Ok(manifest.media_type.into_iter().collect());
    }

    Ok(manifest
        .manifests
        .into_iter()
        .filter_map(|entry| entry.platform)
        // Attestation manifests carry an unknown/unknown platform
        .filter(|p| p.os != "unknown")
        .map(|p| match p.variant {
            Some(variant) => format!("{}/{}/{}", p.os, p.architecture, variant),
            None => format!("{}/{}", p.os, p.architecture),
        })
        .collect())
}
