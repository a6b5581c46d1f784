//! Docker timeouts and help texts.

use std::time::Duration;

/// Timeout for Docker info check (5 seconds)
/// Quick daemon availability check shouldn't take long
pub const DOCKER_INFO_TIMEOUT: Duration = Duration::from_secs(5);

/// Timeout for a registry manifest lookup (1 minute)
pub const MANIFEST_INSPECT_TIMEOUT: Duration = Duration::from_secs(60);

/// Timeout for pulling the builder image (30 minutes)
/// Builder images ship a full Servoy installation and are large
pub const DOCKER_PULL_TIMEOUT: Duration = Duration::from_secs(1800);

/// Timeout for local image inspection and removal during cleanup
pub const IMAGE_CLEANUP_TIMEOUT: Duration = Duration::from_secs(60);

/// Platform-specific Docker startup instructions
#[cfg(target_os = "macos")]
pub const DOCKER_START_HELP: &str = "Start Docker Desktop from Applications or Spotlight";

#[cfg(not(target_os = "macos"))]
pub const DOCKER_START_HELP: &str = "Start Docker daemon: sudo systemctl start docker";
