//! Property tests for the unlock resolver.

use chrono::NaiveDate;
use proptest::prelude::*;
use valweek_core::unlock;

fn any_date() -> impl Strategy<Value = NaiveDate> {
    (2020i32..2032, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

proptest! {
    #[test]
    fn unlocked_iff_on_or_after_the_date(today in any_date(), unlock_date in any_date()) {
        prop_assert_eq!(
            unlock::is_unlocked(today, unlock_date, false),
            today >= unlock_date
        );
    }

    #[test]
    fn dev_flag_always_unlocks(today in any_date(), unlock_date in any_date()) {
        prop_assert!(unlock::is_unlocked(today, unlock_date, true));
    }

    #[test]
    fn valid_overrides_are_honored(y in 2020i32..2032, m in 1u32..=12, d in 1u32..=28) {
        let raw = format!("{y:04}-{m:02}-{d:02}");
        prop_assert_eq!(
            unlock::today(Some(&raw)),
            NaiveDate::from_ymd_opt(y, m, d).unwrap()
        );
    }

    #[test]
    fn garbage_overrides_never_panic(raw in "\\PC*") {
        let _ = unlock::today(Some(&raw));
    }

    #[test]
    fn countdown_is_zero_exactly_when_unlocked(today in any_date(), unlock_date in any_date()) {
        let days = unlock::unlocks_in_days(today, unlock_date);
        prop_assert_eq!(days == 0, unlock::is_unlocked(today, unlock_date, false));
        prop_assert!(days >= 0);
    }
}
