//! Build configuration.
//!
//! [`BuildConfig`] is built once from the action inputs and the runner
//! context, validated eagerly, and then passed by reference into the
//! composer. Nothing past this boundary reads the environment.

pub mod fields;
pub mod inputs;
pub mod version;

pub use inputs::ActionInputs;
pub use version::ServoyVersion;

use crate::compose::license::parse_licenses;
use crate::error::ConfigError;
use fields::{BOOLEAN_FIELDS, PROPERTIES_FILE_WAR, STRING_FIELDS};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Registry path of the published builder images
pub const DEFAULT_IMAGE_REPOSITORY: &str = "ghcr.io/itechpros/servoy_builder";

/// Heap size handed to the builder when `max-memory` is not set
pub const DEFAULT_MAX_MEMORY: &str = "2g";

/// Subdirectory every extras directory must provide
pub const EXTRAS_REQUIRED_SUBDIRECTORY: &str = "application_server";

/// Values supplied by the runner rather than by action inputs.
#[derive(Debug, Clone)]
pub struct RunnerContext {
    /// Checked-out repository on the host
    pub workspace: PathBuf,
    /// `owner/name` of the calling repository
    pub repository: String,
    /// Registry path the version tag is appended to
    pub image_repository: String,
}

impl Default for RunnerContext {
    fn default() -> Self {
        Self {
            workspace: PathBuf::from("."),
            repository: String::new(),
            image_repository: DEFAULT_IMAGE_REPOSITORY.to_string(),
        }
    }
}

/// Validated, immutable configuration of a single WAR build.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    pub version: ServoyVersion,
    pub image_repository: String,
    pub workspace: PathBuf,
    pub repository: String,

    pub api_key: String,
    pub solution_name: String,
    pub default_admin_user: String,
    pub default_admin_password: String,
    pub properties_file: String,
    pub max_memory: String,

    /// Non-empty string options keyed by input name
    pub options: BTreeMap<&'static str, String>,
    /// Input names of boolean switches that are on
    pub switches: BTreeSet<&'static str>,
    /// Raw license lines; each tokenizes into exactly three values
    pub licenses: Vec<String>,

    pub extras_directory: Option<PathBuf>,
    pub post_war_extras_directory: Option<PathBuf>,
    pub timeout: Option<Duration>,
}

impl BuildConfig {
    /// Reads and validates every input of the action.
    ///
    /// Version format and license lines are checked here so a bad
    /// configuration fails before any pull starts.
    pub fn from_inputs(inputs: &ActionInputs, runner: RunnerContext) -> Result<Self, ConfigError> {
        let version = ServoyVersion::parse(inputs.get("servoy-version"))?;

        let properties_file = inputs.get_required("properties-file")?;

        let mut options = BTreeMap::new();
        for field in STRING_FIELDS {
            if let Some(value) = inputs.get_optional(field.input) {
                options.insert(field.input, value);
            }
        }
        options
            .entry(PROPERTIES_FILE_WAR)
            .or_insert_with(|| properties_file.clone());

        let mut switches = BTreeSet::new();
        for field in BOOLEAN_FIELDS {
            if inputs.get_bool(field.input)? {
                switches.insert(field.input);
            }
        }

        let licenses = inputs.get_multiline("licenses");
        parse_licenses(&licenses)?;

        let timeout = parse_timeout(inputs.get("timeout"))?;

        Ok(Self {
            version,
            image_repository: runner.image_repository,
            workspace: runner.workspace,
            repository: runner.repository,
            api_key: inputs.get_required("api-key")?,
            solution_name: inputs.get_required("solution-name")?,
            default_admin_user: inputs.get_required("default-admin-user")?,
            default_admin_password: inputs.get_required("default-admin-password")?,
            properties_file,
            max_memory: inputs
                .get_optional("max-memory")
                .unwrap_or_else(|| DEFAULT_MAX_MEMORY.to_string()),
            options,
            switches,
            licenses,
            extras_directory: inputs.get_optional("extras-directory").map(PathBuf::from),
            post_war_extras_directory: inputs
                .get_optional("post-war-extras-directory")
                .map(PathBuf::from),
            timeout,
        })
    }

    /// Full image reference, `<repository>:<version>`.
    pub fn image_reference(&self) -> String {
        image_reference(&self.image_repository, &self.version)
    }

    /// Value of a string option, if set.
    pub fn option(&self, input: &str) -> Option<&str> {
        self.options.get(input).map(String::as_str)
    }

    pub fn switch(&self, input: &str) -> bool {
        self.switches.contains(input)
    }

    /// Host path of the extras directory, resolved against the workspace.
    pub fn extras_path(&self) -> Option<PathBuf> {
        self.extras_directory.as_deref().map(|p| self.resolve(p))
    }

    /// Host path of the post-WAR extras directory, resolved against the workspace.
    pub fn post_war_extras_path(&self) -> Option<PathBuf> {
        self.post_war_extras_directory
            .as_deref()
            .map(|p| self.resolve(p))
    }

    /// Properties files that take part in template substitution, deduplicated.
    pub fn properties_files(&self) -> Vec<PathBuf> {
        let mut files = vec![self.workspace.join(&self.properties_file)];
        if let Some(war) = self.option(PROPERTIES_FILE_WAR) {
            let war = self.workspace.join(war);
            if !files.contains(&war) {
                files.push(war);
            }
        }
        files
    }

    /// Checks the extras mounts on the host filesystem.
    pub fn validate_mounts(&self) -> Result<(), ConfigError> {
        if let Some(extras) = self.extras_path() {
            if !extras.is_dir() {
                return Err(ConfigError::ExtrasNotFound { path: extras });
            }
            if !extras.join(EXTRAS_REQUIRED_SUBDIRECTORY).is_dir() {
                return Err(ConfigError::ExtrasMissingSubdirectory {
                    path: extras,
                    subdirectory: EXTRAS_REQUIRED_SUBDIRECTORY.to_string(),
                });
            }
        }

        if let Some(post_war) = self.post_war_extras_path()
            && !post_war.is_dir()
        {
            return Err(ConfigError::PostWarExtrasNotFound { path: post_war });
        }

        Ok(())
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.workspace.join(path)
        }
    }
}

/// `<repository>:<version>`
pub fn image_reference(image_repository: &str, version: &ServoyVersion) -> String {
    format!("{}:{}", image_repository, version)
}

/// Seconds; empty or zero disables the timeout.
fn parse_timeout(value: &str) -> Result<Option<Duration>, ConfigError> {
    if value.is_empty() {
        return Ok(None);
    }
    let seconds: u64 = value.parse().map_err(|_| ConfigError::InvalidTimeout {
        value: value.to_string(),
    })?;
    Ok((seconds > 0).then(|| Duration::from_secs(seconds)))
}
