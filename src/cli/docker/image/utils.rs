//! Duration formatting for image age messages.

use chrono::TimeDelta;

/// Largest whole unit of `age`, e.g. "3 days", "1 hour", "45 seconds".
///
/// Negative ages (clock skew between registry and runner) read as "0 seconds".
pub fn humanize_age(age: TimeDelta) -> String {
    let seconds = age.num_seconds().max(0);

    let (value, unit) = match seconds {
        s if s < 60 => (s, "second"),
        s if s < 3_600 => (s / 60, "minute"),
        s if s < 86_400 => (s / 3_600, "hour"),
        s => (s / 86_400, "day"),
    };

    if value == 1 {
        format!("1 {}", unit)
    } else {
        format!("{} {}s", value, unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_largest_unit() {
        assert_eq!(humanize_age(TimeDelta::seconds(1)), "1 second");
        assert_eq!(humanize_age(TimeDelta::seconds(90)), "1 minute");
        assert_eq!(humanize_age(TimeDelta::hours(5)), "5 hours");
        assert_eq!(humanize_age(TimeDelta::days(12)), "12 days");
    }

    #[test]
    fn negative_is_zero() {
        assert_eq!(humanize_age(TimeDelta::seconds(-30)), "0 seconds");
    }
}
