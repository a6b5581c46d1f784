//! Builder image age.

use crate::error::{BuilderError, CliError};
use chrono::{DateTime, TimeDelta, Utc};

/// Parses the `{{.Created}}` timestamp docker prints for an image.
pub fn parse_created(created: &str) -> Result<DateTime<Utc>, BuilderError> {
    let created = created.trim();
    DateTime::parse_from_rfc3339(created)
        .map(|time| time.with_timezone(&Utc))
        .map_err(|e| {
            CliError::ExecutionFailed {
                command: "parse_timestamp".to_string(),
                reason: format!("Invalid timestamp from Docker '{}': {}", created, e),
            }
            .into()
        })
}

/// Time elapsed between image creation and `now`.
pub fn image_age(created: &str, now: DateTime<Utc>) -> Result<TimeDelta, BuilderError> {
    Ok(now - parse_created(created)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_docker_timestamps() {
        let now = DateTime::parse_from_rfc3339("2024-05-10T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let age = image_age("2024-05-07T11:59:59.123456789Z\n", now).unwrap();
        assert_eq!(age.num_days(), 3);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_created("yesterday").is_err());
    }
}
