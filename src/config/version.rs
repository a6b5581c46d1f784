//! Servoy version tags of the builder image.

use crate::error::ConfigError;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Tag format of published builder images. Also keeps shell metacharacters
/// out of the image reference.
static VERSION_FORMAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{1,4}\.[0-9]{1,2}(\.[0-9]+)?\.[0-9]{4}$").expect("version pattern is valid")
});

/// A validated builder image version tag, e.g. `2023.03.1.3844`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServoyVersion(String);

impl ServoyVersion {
    pub fn parse(version: &str) -> Result<Self, ConfigError> {
        if VERSION_FORMAT.is_match(version) {
            Ok(Self(version.to_string()))
        } else {
            Err(ConfigError::InvalidVersion {
                version: version.to_string(),
            })
        }
    }
}

impl fmt::Display for ServoyVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
