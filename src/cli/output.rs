//! Action output: workflow commands on stdout and the `$GITHUB_OUTPUT` file.

use crate::classify::ClassificationResult;
use anyhow::Context;
use std::io::Write;
use std::path::Path;

/// Output name carrying the classified error lines
pub const ERROR_OUTPUT: &str = "ERROR_OUTPUT";

/// Output name carrying the classified warning lines
pub const WARNING_OUTPUT: &str = "WARNING_OUTPUT";

/// Escapes a workflow command message so it stays on one line.
pub fn escape_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// `::<command>::<message>`
pub fn workflow_command(command: &str, message: &str) -> String {
    format!("::{}::{}", command, escape_data(message))
}

/// Joins lines for a single-line output value: `"` becomes `\"` and each
/// line break becomes the two characters `\n`.
pub fn format_output_value(lines: &[String]) -> String {
    lines.join("\n").replace('"', "\\\"").replace('\n', "\\n")
}

/// Writes user-facing messages the way the runner expects them.
#[derive(Debug, Clone, Default)]
pub struct OutputManager {
    verbose: bool,
}

impl OutputManager {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Plain log line
    pub fn info(&self, message: &str) {
        println!("{}", message);
    }

    /// Debug line; the runner hides these unless step debugging is on
    pub fn debug(&self, message: &str) {
        if self.verbose {
            println!("{}", message);
        } else {
            println!("{}", workflow_command("debug", message));
        }
    }

    pub fn warn(&self, message: &str) {
        println!("{}", workflow_command("warning", message));
    }

    pub fn error(&self, message: &str) {
        println!("{}", workflow_command("error", message));
    }

    pub fn success(&self, message: &str) {
        println!("✓ {}", message);
    }

    /// Line relayed from a child process
    pub fn indent(&self, line: &str) {
        println!("{}", line);
    }

    /// Opens a collapsible log group
    pub fn section(&self, title: &str) {
        println!("{}", workflow_command("group", title));
    }

    pub fn end_section(&self) {
        println!("::endgroup::");
    }
}

/// Appends `ERROR_OUTPUT` / `WARNING_OUTPUT` records for non-empty buckets.
pub fn write_classification(path: &Path, result: &ClassificationResult) -> anyhow::Result<()> {
    let mut records = String::new();
    if !result.error_lines.is_empty() {
        records.push_str(&format!(
            "{}={}\n",
            ERROR_OUTPUT,
            format_output_value(&result.error_lines)
        ));
    }
    if !result.warning_lines.is_empty() {
        records.push_str(&format!(
            "{}={}\n",
            WARNING_OUTPUT,
            format_output_value(&result.warning_lines)
        ));
    }
    if records.is_empty() {
        return Ok(());
    }

    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open output file {}", path.display()))?;
    file.write_all(records.as_bytes())
        .with_context(|| format!("failed to append to output file {}", path.display()))?;
    Ok(())
}
