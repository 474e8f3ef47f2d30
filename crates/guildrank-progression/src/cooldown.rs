//! Cooldown arithmetic for timestamp-based rewards.

use chrono::{DateTime, Duration, Utc};

/// Time left before an action last taken at `last` may run again.
///
/// `None` means the action is available now.
pub fn cooldown_remaining(
    last: Option<DateTime<Utc>>,
    period: Duration,
    now: DateTime<Utc>,
) -> Option<Duration> {
    let ready_at = last?.checked_add_signed(period)?;
    (now < ready_at).then(|| ready_at - now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use guildrank_common::test_utils::mock_timestamp;

    #[test]
    fn test_never_used_is_ready() {
        let now = mock_timestamp(2024, 1, 1, 0, 0, 0);
        assert!(cooldown_remaining(None, Duration::hours(24), now).is_none());
    }

    #[test]
    fn test_remaining_time() {
        let last = mock_timestamp(2024, 1, 1, 0, 0, 0);
        let now = mock_timestamp(2024, 1, 1, 20, 30, 0);
        assert_eq!(
            cooldown_remaining(Some(last), Duration::hours(24), now),
            Some(Duration::minutes(210))
        );
    }

    #[test]
    fn test_ready_exactly_at_boundary() {
        let last = mock_timestamp(2024, 1, 1, 0, 0, 0);
        let now = mock_timestamp(2024, 1, 2, 0, 0, 0);
        assert!(cooldown_remaining(Some(last), Duration::hours(24), now).is_none());
    }
}
