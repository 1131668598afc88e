//! Grouping key: rounded capture minute plus normalized base name.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

const MINUTE_SECS: i64 = 60;
const HALF_MINUTE_NANOS: i64 = 30_000_000_000;

/// Two assets belong to the same stack iff their keys are equal.
///
/// Ordering is by time first, then base name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupingKey {
    pub minute: DateTime<Utc>,
    pub base: String,
}

impl GroupingKey {
    pub fn new(base: impl Into<String>, captured: &DateTime<Utc>) -> Self {
        Self {
            minute: round_to_minute(captured),
            base: base.into(),
        }
    }
}

/// Round to the nearest whole minute; exactly 30s rounds up.
pub fn round_to_minute(t: &DateTime<Utc>) -> DateTime<Utc> {
    let secs = t.timestamp();
    let into_minute = secs.rem_euclid(MINUTE_SECS);
    let floor = secs - into_minute;
    let nanos_into_minute = into_minute * 1_000_000_000 + i64::from(t.timestamp_subsec_nanos());
    let rounded = if nanos_into_minute >= HALF_MINUTE_NANOS {
        floor + MINUTE_SECS
    } else {
        floor
    };
    Utc.timestamp_opt(rounded, 0).single().unwrap_or(*t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, Timelike};

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2020, 1, 1, h, m, s).unwrap()
    }

    #[test]
    fn rounds_down_before_half_minute() {
        assert_eq!(round_to_minute(&at(12, 0, 29)), at(12, 0, 0));
        let almost = at(12, 0, 29) + TimeDelta::milliseconds(999);
        assert_eq!(round_to_minute(&almost), at(12, 0, 0));
    }

    #[test]
    fn half_minute_rounds_up() {
        assert_eq!(round_to_minute(&at(12, 0, 30)), at(12, 1, 0));
        assert_eq!(round_to_minute(&at(12, 59, 45)), at(13, 0, 0));
    }

    #[test]
    fn whole_minutes_are_unchanged() {
        assert_eq!(round_to_minute(&at(8, 15, 0)), at(8, 15, 0));
    }

    #[test]
    fn pre_epoch_timestamps_round_the_same_way() {
        let t = Utc.with_ymd_and_hms(1965, 6, 1, 10, 20, 40).unwrap();
        let rounded = round_to_minute(&t);
        assert_eq!(rounded.minute(), 21);
        assert_eq!(rounded.second(), 0);
    }

    #[test]
    fn keys_collide_within_the_same_rounded_minute() {
        let a = GroupingKey::new("IMG_0001", &at(12, 0, 10));
        let b = GroupingKey::new("IMG_0001", &at(11, 59, 50));
        let c = GroupingKey::new("IMG_0001", &at(12, 0, 40));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn keys_differ_by_base() {
        let t = at(12, 0, 0);
        assert_ne!(GroupingKey::new("a", &t), GroupingKey::new("b", &t));
    }
}
