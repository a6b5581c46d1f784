//! Composes the `docker run` command line of a WAR build.
//!
//! [`compose`] is a pure function of the [`BuildConfig`]: the same
//! configuration always yields the same tokens in the same order.

pub mod license;

use crate::config::BuildConfig;
use crate::config::fields::{
    ALL_SENTINEL, ALLOW_DATA_MODEL_CHANGES, ALLOW_DATA_MODEL_CHANGES_ALL, BOOLEAN_FIELDS,
    FieldKind, PROPERTIES_FILE_WAR, STRING_FIELDS,
};
use crate::error::ConfigError;
use license::parse_licenses;

/// Mount point of the workspace inside the builder container
pub const CONTAINER_WORKSPACE: &str = "/servoy_code";

/// Mount point of the extras directory
pub const CONTAINER_EXTRAS: &str = "/servoy_extras";

/// Mount point of the post-WAR extras directory
pub const CONTAINER_POST_WAR_EXTRAS: &str = "/servoy_post_war_extras";

/// Flag preceding each license entry
pub const LICENSE_FLAG: &str = "-license";

/// Workspace-relative path as seen from inside the container.
pub fn container_path(relative: &str) -> String {
    format!("{}/{}", CONTAINER_WORKSPACE, relative)
}

/// Builds the argument list passed to `docker`.
///
/// Fails with [`ConfigError::MalformedLicense`] when a license line does
/// not tokenize into exactly three values; nothing is returned in that case.
pub fn compose(config: &BuildConfig) -> Result<Vec<String>, ConfigError> {
    let licenses = parse_licenses(&config.licenses)?;

    let mut args: Vec<String> = vec![
        "run".into(),
        "--rm".into(),
        "-e".into(),
        format!("GITHUB_REPOSITORY={}", config.repository),
        "-v".into(),
        format!("{}:{}", config.workspace.display(), CONTAINER_WORKSPACE),
    ];

    if let Some(extras) = config.extras_path() {
        args.push("-v".into());
        args.push(format!("{}:{}", extras.display(), CONTAINER_EXTRAS));
    }

    if let Some(post_war) = config.post_war_extras_path() {
        args.push("-v".into());
        args.push(format!("{}:{}", post_war.display(), CONTAINER_POST_WAR_EXTRAS));
    }

    args.push(config.image_reference());

    args.extend([
        "-k".into(),
        config.api_key.clone(),
        "-s".into(),
        config.solution_name.clone(),
        "-o".into(),
        CONTAINER_WORKSPACE.into(),
        "-data".into(),
        CONTAINER_WORKSPACE.into(),
        "-defaultAdminUser".into(),
        config.default_admin_user.clone(),
        "-defaultAdminPassword".into(),
        config.default_admin_password.clone(),
        "-p".into(),
        container_path(&config.properties_file),
        "-maxMemory".into(),
        config.max_memory.clone(),
    ]);

    for field in STRING_FIELDS {
        let Some(value) = config.option(field.input).filter(|v| !v.is_empty()) else {
            continue;
        };

        // Carried over from allow-data-model-changes; see DESIGN.md.
        if field.input == PROPERTIES_FILE_WAR && value == ALL_SENTINEL {
            log::warn!(
                "{} is '{}'; {} is not passed to the builder",
                PROPERTIES_FILE_WAR,
                ALL_SENTINEL,
                field.flag
            );
            continue;
        }

        args.push(field.flag.into());
        match field.kind {
            FieldKind::MultiValue => args.extend(value.split(' ').map(String::from)),
            FieldKind::WorkspacePath => args.push(container_path(value)),
            FieldKind::Single
                if field.input == ALLOW_DATA_MODEL_CHANGES && value == ALL_SENTINEL =>
            {
                args.push(ALLOW_DATA_MODEL_CHANGES_ALL.into())
            }
            FieldKind::Single => args.push(value.into()),
        }
    }

    for field in BOOLEAN_FIELDS {
        if config.switch(field.input) {
            args.push(field.flag.into());
        }
    }

    for entry in &licenses {
        args.push(LICENSE_FLAG.into());
        args.extend(entry.tokens().map(String::from));
    }

    Ok(args)
}
