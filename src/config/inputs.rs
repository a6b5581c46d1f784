//! Named action inputs.
//!
//! The runner passes each action input as an `INPUT_<NAME>` environment
//! variable. They are snapshotted once into [`ActionInputs`] so nothing
//! downstream reads the process environment.

use crate::error::ConfigError;
use std::collections::BTreeMap;

const TRUE_VALUES: [&str; 3] = ["true", "True", "TRUE"];
const FALSE_VALUES: [&str; 3] = ["false", "False", "FALSE"];

/// Snapshot of the action inputs, keyed by environment variable name.
#[derive(Debug, Clone, Default)]
pub struct ActionInputs {
    values: BTreeMap<String, String>,
}

/// Environment variable carrying the input `name`.
///
/// Spaces become underscores and the name is upper-cased; hyphens are kept.
pub fn input_variable_name(name: &str) -> String {
    format!("INPUT_{}", name.replace(' ', "_").to_uppercase())
}

impl ActionInputs {
    /// Captures every `INPUT_*` variable of the current process.
    pub fn from_env() -> Self {
        Self::from_variables(std::env::vars())
    }

    /// Builds inputs from `(variable, value)` pairs, keeping `INPUT_*` only.
    pub fn from_variables<I, K, V>(variables: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let values = variables
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .filter(|(k, _)| k.starts_with("INPUT_"))
            .collect();
        Self { values }
    }

    /// Builds inputs from `(input name, value)` pairs.
    pub fn from_inputs<I, K, V>(inputs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let values = inputs
            .into_iter()
            .map(|(k, v)| (input_variable_name(k.as_ref()), v.into()))
            .collect();
        Self { values }
    }

    /// Trimmed input value; empty when absent.
    pub fn get(&self, name: &str) -> &str {
        self.values
            .get(&input_variable_name(name))
            .map(|v| v.trim())
            .unwrap_or("")
    }

    /// Trimmed value, `None` when absent or empty.
    pub fn get_optional(&self, name: &str) -> Option<String> {
        let value = self.get(name);
        (!value.is_empty()).then(|| value.to_string())
    }

    /// Trimmed value, failing when absent or empty.
    pub fn get_required(&self, name: &str) -> Result<String, ConfigError> {
        self.get_optional(name).ok_or_else(|| ConfigError::MissingInput {
            name: name.to_string(),
        })
    }

    /// Boolean input. Absent or empty reads as `false`.
    pub fn get_bool(&self, name: &str) -> Result<bool, ConfigError> {
        let value = self.get(name);
        if value.is_empty() || FALSE_VALUES.contains(&value) {
            Ok(false)
        } else if TRUE_VALUES.contains(&value) {
            Ok(true)
        } else {
            Err(ConfigError::InvalidBoolean {
                name: name.to_string(),
                value: value.to_string(),
            })
        }
    }

    /// Non-blank lines of a multiline input, each trimmed.
    pub fn get_multiline(&self, name: &str) -> Vec<String> {
        self.get(name)
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variable_names_keep_hyphens() {
        assert_eq!(input_variable_name("servoy-version"), "INPUT_SERVOY-VERSION");
        assert_eq!(input_variable_name("my input"), "INPUT_MY_INPUT");
    }

    #[test]
    fn only_input_variables_are_captured() {
        let inputs = ActionInputs::from_variables([
            ("INPUT_API-KEY", "  secret  "),
            ("HOME", "/root"),
        ]);
        assert_eq!(inputs.get("api-key"), "secret");
        assert_eq!(inputs.get("home"), "");
        assert_eq!(inputs.get_optional("HOME"), None);
    }

    #[test]
    fn empty_input_does_not_satisfy_required() {
        let inputs = ActionInputs::from_inputs([("solution-name", "")]);
        assert_eq!(inputs.get_optional("solution-name"), None);
        assert_eq!(
            inputs.get_required("solution-name"),
            Err(ConfigError::MissingInput {
                name: "solution-name".to_string()
            })
        );
    }

    #[test]
    fn booleans_follow_core_schema() {
        let inputs = ActionInputs::from_inputs([
            ("a", "TRUE"),
            ("b", "False"),
            ("c", ""),
            ("d", "yes"),
        ]);
        assert_eq!(inputs.get_bool("a"), Ok(true));
        assert_eq!(inputs.get_bool("b"), Ok(false));
        assert_eq!(inputs.get_bool("c"), Ok(false));
        assert_eq!(inputs.get_bool("missing"), Ok(false));
        assert!(matches!(
            inputs.get_bool("d"),
            Err(ConfigError::InvalidBoolean { .. })
        ));
    }

    #[test]
    fn multiline_skips_blank_lines() {
        let inputs = ActionInputs::from_inputs([("licenses", "one\n\n  two  \n")]);
        assert_eq!(inputs.get_multiline("licenses"), vec!["one", "two"]);
    }
}
