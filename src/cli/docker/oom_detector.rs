//! Out-of-memory detection for failed builder runs.

/// Output fragments printed by the JVM or the kernel when memory runs out
const OOM_MARKERS: [&str; 4] = [
    "OutOfMemoryError",
    "Java heap space",
    "GC overhead limit exceeded",
    "Cannot allocate memory",
];

/// Exit code of a process killed with SIGKILL, as reported by docker
const SIGKILL_EXIT_CODE: i32 = 137;

/// Out-of-memory detector for the builder container.
pub struct OomDetector {
    max_memory: String,
}

impl OomDetector {
    /// Creates a new OOM detector.
    ///
    /// * `max_memory` - Heap limit the builder ran with (e.g., "2g")
    pub fn new(max_memory: impl Into<String>) -> Self {
        Self {
            max_memory: max_memory.into(),
        }
    }

    /// Detects if the build failure was due to memory exhaustion.
    ///
    /// Checks exit code 137 and the JVM's out-of-memory messages on both streams.
    pub fn is_oom_failure(
        &self,
        exit_code: Option<i32>,
        stdout: &str,
        stderr_lines: &[String],
    ) -> bool {
        exit_code == Some(SIGKILL_EXIT_CODE)
            || OOM_MARKERS.iter().any(|marker| {
                stdout.contains(marker) || stderr_lines.iter().any(|line| line.contains(marker))
            })
    }

    /// Hint shown next to the build failure.
    pub fn hint(&self) -> String {
        format!(
            "The WAR builder appears to have run out of memory (max-memory: {}). \
             Increase the max-memory input and re-run the workflow.",
            self.max_memory
        )
    }
}
