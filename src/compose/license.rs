//! License line tokenization.

use crate::error::ConfigError;
use regex::Regex;
use std::sync::LazyLock;

/// A bare run of non-space non-quote characters, or a double-quoted run.
static LICENSE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""([^"]*)"|([^\s"]+)"#).expect("license token pattern is valid")
});

/// One `-license` entry of the builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseEntry {
    pub code: String,
    pub company: String,
    pub password: String,
}

impl LicenseEntry {
    /// Parses `code company password`, where any part may be double-quoted
    /// to include spaces.
    pub fn parse(line: &str) -> Result<Self, ConfigError> {
        let mut tokens = tokenize(line);
        if tokens.len() != 3 {
            return Err(ConfigError::MalformedLicense {
                line: line.to_string(),
                found: tokens.len(),
            });
        }
        let password = tokens.pop().unwrap_or_default();
        let company = tokens.pop().unwrap_or_default();
        let code = tokens.pop().unwrap_or_default();
        Ok(Self {
            code,
            company,
            password,
        })
    }

    /// Tokens in command-line order.
    pub fn tokens(&self) -> [&str; 3] {
        [&self.code, &self.company, &self.password]
    }
}

/// Splits on whitespace, keeping double-quoted runs together without quotes.
pub fn tokenize(line: &str) -> Vec<String> {
    LICENSE_TOKEN
        .captures_iter(line)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Parses every line, failing on the first malformed one.
pub fn parse_licenses(lines: &[String]) -> Result<Vec<LicenseEntry>, ConfigError> {
    lines.iter().map(|line| LicenseEntry::parse(line)).collect()
}
