//! Age computation and retention classification
//!
//! Copy requires `age < days` and delete requires `age > days`. A snapshot
//! exactly at the threshold is neither copied nor deleted.

use jiff::Timestamp;

/// Default threshold for the delete workflow
pub const DEFAULT_RETENTION_DAYS: i64 = 7;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Day threshold separating fresh snapshots from expired ones
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionPolicy {
    pub days: i64,
}

impl RetentionPolicy {
    pub const fn new(days: i64) -> Self {
        Self { days }
    }

    /// Whether a snapshot of the given age should still be copied
    pub fn copy_eligible(&self, age_days: f64) -> bool {
        age_days < self.days as f64
    }

    /// Whether a snapshot of the given age has expired
    pub fn delete_eligible(&self, age_days: f64) -> bool {
        age_days > self.days as f64
    }
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_RETENTION_DAYS)
    }
}

/// Fractional days elapsed between `created` and `now`
///
/// Negative when `created` lies in the future.
pub fn age_days(created: Timestamp, now: Timestamp) -> f64 {
    (now.as_millisecond() - created.as_millisecond()) as f64 / MILLIS_PER_DAY
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> Timestamp {
        s.parse().unwrap()
    }

    #[test]
    fn test_age_days_fractional() {
        let age = age_days(ts("2024-01-01T00:00:00Z"), ts("2024-01-03T12:00:00Z"));
        assert!((age - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_young_snapshot_is_copied_not_deleted() {
        let policy = RetentionPolicy::new(7);
        let age = age_days(ts("2024-01-01T00:00:00Z"), ts("2024-01-03T00:00:00Z"));
        assert!(policy.copy_eligible(age));
        assert!(!policy.delete_eligible(age));
    }

    #[test]
    fn test_old_snapshot_is_deleted_not_copied() {
        let policy = RetentionPolicy::new(7);
        let age = age_days(ts("2024-01-01T00:00:00Z"), ts("2024-01-10T00:00:00Z"));
        assert!(!policy.copy_eligible(age));
        assert!(policy.delete_eligible(age));
    }

    #[test]
    fn test_boundary_is_open_on_both_sides() {
        let policy = RetentionPolicy::new(7);
        let age = age_days(ts("2024-01-01T00:00:00Z"), ts("2024-01-08T00:00:00Z"));
        assert_eq!(age, 7.0);
        assert!(!policy.copy_eligible(age));
        assert!(!policy.delete_eligible(age));
    }

    #[test]
    fn test_default_policy() {
        assert_eq!(RetentionPolicy::default().days, DEFAULT_RETENTION_DAYS);
    }
}
