//! Ordered input-to-flag tables for the WAR builder command line.
//!
//! Iteration order is output order, so these stay slices rather than maps.

/// How a string option's value is rendered after its flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Value emitted as-is
    Single,
    /// Value split on single spaces, each piece a separate token
    MultiValue,
    /// Value is a workspace-relative path, rewritten into the container
    WorkspacePath,
}

/// Optional string option.
#[derive(Debug, Clone, Copy)]
pub struct StringField {
    pub input: &'static str,
    pub flag: &'static str,
    pub kind: FieldKind,
}

/// Optional boolean switch.
#[derive(Debug, Clone, Copy)]
pub struct BooleanField {
    pub input: &'static str,
    pub flag: &'static str,
}

const fn string(input: &'static str, flag: &'static str, kind: FieldKind) -> StringField {
    StringField { input, flag, kind }
}

const fn boolean(input: &'static str, flag: &'static str) -> BooleanField {
    BooleanField { input, flag }
}

/// Input holding the WAR properties file.
pub const PROPERTIES_FILE_WAR: &str = "properties-file-war";

/// Input whose value `all` is rewritten to [`ALLOW_DATA_MODEL_CHANGES_ALL`].
pub const ALLOW_DATA_MODEL_CHANGES: &str = "allow-data-model-changes";

/// Builder spelling of "allow changes on every server".
pub const ALLOW_DATA_MODEL_CHANGES_ALL: &str = "true";

/// Sentinel value meaning "every server".
pub const ALL_SENTINEL: &str = "all";

pub static STRING_FIELDS: &[StringField] = &[
    string(PROPERTIES_FILE_WAR, "-pfw", FieldKind::WorkspacePath),
    string("beans", "-b", FieldKind::MultiValue),
    string("exclude-beans", "-excludeBeans", FieldKind::MultiValue),
    string("lafs", "-l", FieldKind::MultiValue),
    string("exclude-lafs", "-excludeLafs", FieldKind::MultiValue),
    string("drivers", "-d", FieldKind::MultiValue),
    string("exclude-drivers", "-excludeDrivers", FieldKind::MultiValue),
    string("plugins", "-pi", FieldKind::MultiValue),
    string("exclude-plugins", "-excludePlugins", FieldKind::MultiValue),
    string("components", "-crefs", FieldKind::MultiValue),
    string("exclude-components", "-excludeComponentPkgs", FieldKind::MultiValue),
    string("services", "-srefs", FieldKind::MultiValue),
    string("exclude-services", "-excludeServicePkgs", FieldKind::MultiValue),
    string("sample-data-row-count", "-sdcount", FieldKind::Single),
    string(ALLOW_DATA_MODEL_CHANGES, "-allowDataModelChanges", FieldKind::Single),
    string("import-user-policy", "-importUserPolicy", FieldKind::Single),
    string("context-file-name", "-contextFileName", FieldKind::WorkspacePath),
    string("log4j-configuration-file", "-log4jConfigurationFile", FieldKind::WorkspacePath),
    string("web-xml-file-name", "-webXmlFileName", FieldKind::WorkspacePath),
    string("ng2", "-ng2", FieldKind::Single),
    string("war-file-name", "-warFileName", FieldKind::Single),
    string("additional-solutions", "-nas", FieldKind::Single),
];

pub static BOOLEAN_FIELDS: &[BooleanField] = &[
    boolean("ignore-build-errors", "-ie"),
    boolean("skip-build", "-sb"),
    boolean("dbi", "-dbi"),
    boolean("export-metadata", "-md"),
    boolean("check-metadata", "-checkmd"),
    boolean("sample-data", "-sd"),
    boolean("i18n", "-i18n"),
    boolean("users", "-users"),
    boolean("tables", "-tables"),
    boolean("overwrite-groups", "-overwriteGroups"),
    boolean("allow-sql-keywords", "-allowSQLKeywords"),
    boolean("stop-on-data-model-changes", "-stopOnDataModelChanges"),
    boolean("skip-database-views-update", "-skipDatabaseViewsUpdate"),
    boolean("override-sequence-types", "-overrideSequenceTypes"),
    boolean("override-default-values", "-overrideDefaultValues"),
    boolean("insert-new-i18n-keys-only", "-insertNewI18NKeysOnly"),
    boolean("add-users-to-admin-group", "-addUsersToAdminGroup"),
    boolean("update-sequences", "-updateSequences"),
    boolean("upgrade-repository", "-upgradeRepository"),
    boolean("use-as-real-admin-user", "-useAsRealAdminUser"),
    boolean("do-not-overwrite-db-server-properties", "-doNotOverwriteDBServerProperties"),
    boolean("overwrite-all-properties", "-overwriteAllProperties"),
    boolean("ng1", "-ng1"),
];
