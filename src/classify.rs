//! Classification of WAR builder output into error and warning lines.
//!
//! The builder prints a banner before listing error markers and another
//! before listing warning markers; each marker is a line starting with `-`.

/// Banner preceding the error markers
pub const ERROR_BANNER: &str = "Found error markers in solution";

/// Banner preceding the warning markers
pub const WARNING_BANNER: &str = "Found warning markers in projects for solution";

/// Marker lines found in a build log, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassificationResult {
    pub error_lines: Vec<String>,
    pub warning_lines: Vec<String>,
}

impl ClassificationResult {
    pub fn is_empty(&self) -> bool {
        self.error_lines.is_empty() && self.warning_lines.is_empty()
    }
}

/// Scans `output` once, bucketing hyphen-prefixed lines by the most recent banner.
///
/// Only the warning banner ends the error section; any other line is
/// skipped without changing the section.
pub fn classify(output: &str) -> ClassificationResult {
    let mut result = ClassificationResult::default();
    let mut in_errors = false;
    let mut in_warnings = false;

    for line in output.lines().map(str::trim) {
        if line.starts_with(ERROR_BANNER) {
            in_errors = true;
        } else if line.starts_with(WARNING_BANNER) {
            in_errors = false;
            in_warnings = true;
        } else if !line.starts_with('-') {
            continue;
        } else if in_errors {
            result.error_lines.push(line.to_string());
        } else if in_warnings {
            result.warning_lines.push(line.to_string());
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOG: &str = "\
Exporting solution crm
Found error markers in solution crm
   - err1
- err2
Found warning markers in projects for solution crm
- warn1
Export finished
";

    #[test]
    fn splits_sections() {
        let result = classify(LOG);
        assert_eq!(result.error_lines, ["- err1", "- err2"]);
        assert_eq!(result.warning_lines, ["- warn1"]);
    }

    #[test]
    fn no_banners_no_lines() {
        let result = classify("- stray\nbuilding...\n- another\n");
        assert!(result.is_empty());
        assert_eq!(classify(""), ClassificationResult::default());
    }

    #[test]
    fn reclassifying_output_finds_nothing() {
        let first = classify(LOG);
        let mut again = first.error_lines.clone();
        again.extend(first.warning_lines.clone());
        assert!(classify(&again.join("\n")).is_empty());
    }

    #[test]
    fn non_hyphen_lines_keep_the_section_open() {
        let log = "Found error markers in solution crm\n- e1\nsome log line\n- e2\n";
        assert_eq!(classify(log).error_lines, ["- e1", "- e2"]);
    }

    #[test]
    fn warnings_before_errors() {
        let log = "\
Found warning markers in projects for solution crm
- w1
Found error markers in solution crm
- e1
";
        let result = classify(log);
        assert_eq!(result.warning_lines, ["- w1"]);
        assert_eq!(result.error_lines, ["- e1"]);
    }

    #[test]
    fn banner_lines_are_never_recorded() {
        let log = "Found error markers in solution -x\n-e\r\n";
        let result = classify(log);
        assert_eq!(result.error_lines, ["-e"]);
        assert!(result.warning_lines.is_empty());
    }
}
