//! Date gating in the app's reference timezone.
//!
//! Days unlock on civil dates, not instants: the comparison is between
//! calendar dates in a fixed UTC+05:30 offset. A developer flag or an
//! explicit override date can bypass the wall clock; malformed overrides
//! fall back to the real current time.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

/// Seconds east of UTC for the reference timezone (+05:30).
const REFERENCE_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

fn reference_offset() -> FixedOffset {
    FixedOffset::east_opt(REFERENCE_OFFSET_SECS).expect("offset within bounds")
}

/// Today's civil date. An override in `%Y-%m-%d` form wins; anything else
/// (including a malformed override) resolves the current instant in the
/// reference timezone.
pub fn today(override_ymd: Option<&str>) -> NaiveDate {
    civil_date(override_ymd, Utc::now())
}

pub(crate) fn civil_date(override_ymd: Option<&str>, now: DateTime<Utc>) -> NaiveDate {
    if let Some(raw) = override_ymd {
        if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return d;
        }
    }
    now.with_timezone(&reference_offset()).date_naive()
}

/// A day is unlocked once today reaches its unlock date, or unconditionally
/// under the developer flag.
pub fn is_unlocked(today: NaiveDate, unlock_date: NaiveDate, dev_unlock: bool) -> bool {
    dev_unlock || today >= unlock_date
}

/// Whole days until the unlock date (0 once unlocked). Used for badges.
pub fn unlocks_in_days(today: NaiveDate, unlock_date: NaiveDate) -> i64 {
    (unlock_date - today).num_days().max(0)
}
