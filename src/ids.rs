use chrono::{DateTime, Utc};

/// Source of the current instant. Swapped for a fixed clock in tests.
pub(crate) type Clock = fn() -> DateTime<Utc>;

pub(crate) fn system_clock() -> DateTime<Utc> {
    Utc::now()
}

/// Hands out strictly increasing ids based on epoch milliseconds.
///
/// Two creations in the same millisecond (or a clock that steps backwards)
/// still get distinct ids: the next id is never below `last + 1`.
#[derive(Debug, Clone, Default)]
pub(crate) struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    /// Resume after the largest id already in use.
    pub(crate) fn after<I: IntoIterator<Item = i64>>(ids: I) -> Self {
        Self {
            last: ids.into_iter().max().unwrap_or(0),
        }
    }

    pub(crate) fn next_id(&mut self, now: DateTime<Utc>) -> i64 {
        let id = now.timestamp_millis().max(self.last.saturating_add(1));
        self.last = id;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(ms).single().unwrap_or(DateTime::UNIX_EPOCH)
    }

    #[test]
    fn test_ids_follow_clock() {
        let mut ids = IdGenerator::default();
        assert_eq!(ids.next_id(at(1_000)), 1_000);
        assert_eq!(ids.next_id(at(2_500)), 2_500);
    }

    #[test]
    fn test_same_tick_still_unique() {
        let mut ids = IdGenerator::default();
        let a = ids.next_id(at(5_000));
        let b = ids.next_id(at(5_000));
        let c = ids.next_id(at(5_000));
        assert_eq!((a, b, c), (5_000, 5_001, 5_002));
    }

    #[test]
    fn test_clock_going_backwards() {
        let mut ids = IdGenerator::default();
        let a = ids.next_id(at(9_000));
        let b = ids.next_id(at(3_000));
        assert!(b > a);
    }

    #[test]
    fn test_resume_after_existing() {
        let mut ids = IdGenerator::after([10, 7_000, 42]);
        assert_eq!(ids.next_id(at(100)), 7_001);
    }
}
