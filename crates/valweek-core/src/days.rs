//! The eight themed days of the week.
//!
//! The day list is static and immutable: one entry per themed day, each
//! pairing a calendar unlock date with exactly one minigame. `DayKey` is the
//! join key between the day list, the progress store, and the game registry.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Identifier for one themed day. Lowercase names are the wire/CLI form.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum DayKey {
    Rose,
    Propose,
    Chocolate,
    Teddy,
    Promise,
    Hug,
    Kiss,
    Valentine,
}

impl DayKey {
    /// Every day, in unlock order.
    pub const ALL: [DayKey; 8] = [
        DayKey::Rose,
        DayKey::Propose,
        DayKey::Chocolate,
        DayKey::Teddy,
        DayKey::Promise,
        DayKey::Hug,
        DayKey::Kiss,
        DayKey::Valentine,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DayKey::Rose => "rose",
            DayKey::Propose => "propose",
            DayKey::Chocolate => "chocolate",
            DayKey::Teddy => "teddy",
            DayKey::Promise => "promise",
            DayKey::Hug => "hug",
            DayKey::Kiss => "kiss",
            DayKey::Valentine => "valentine",
        }
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DayKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rose" => Ok(DayKey::Rose),
            "propose" => Ok(DayKey::Propose),
            "chocolate" => Ok(DayKey::Chocolate),
            "teddy" => Ok(DayKey::Teddy),
            "promise" => Ok(DayKey::Promise),
            "hug" => Ok(DayKey::Hug),
            "kiss" => Ok(DayKey::Kiss),
            "valentine" => Ok(DayKey::Valentine),
            _ => Err(CoreError::UnknownDay(s.to_string())),
        }
    }
}

/// One themed day: unlock date plus display copy.
#[derive(Debug, Clone, Serialize)]
pub struct DayDescriptor {
    pub key: DayKey,
    pub unlock_date: NaiveDate,
    pub title: &'static str,
    pub blurb: &'static str,
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid calendar date")
}

/// The full week, in unlock order.
pub fn all() -> Vec<DayDescriptor> {
    vec![
        DayDescriptor {
            key: DayKey::Rose,
            unlock_date: date(2026, 2, 7),
            title: "Rose Day 🌹",
            blurb: "Tap petals to collect",
        },
        DayDescriptor {
            key: DayKey::Propose,
            unlock_date: date(2026, 2, 8),
            title: "Propose Day 💍",
            blurb: "Photo Jigsaw",
        },
        DayDescriptor {
            key: DayKey::Chocolate,
            unlock_date: date(2026, 2, 9),
            title: "Chocolate Day 🍫",
            blurb: "Stack Choccy pieces",
        },
        DayDescriptor {
            key: DayKey::Teddy,
            unlock_date: date(2026, 2, 10),
            title: "Teddy Day 🧸",
            blurb: "Teddy Hide & Seek",
        },
        DayDescriptor {
            key: DayKey::Promise,
            unlock_date: date(2026, 2, 11),
            title: "Promise Day 🤝",
            blurb: "Choose a promise and sign it",
        },
        DayDescriptor {
            key: DayKey::Hug,
            unlock_date: date(2026, 2, 12),
            title: "Hug Day 🤗",
            blurb: "Hold the screen to warm",
        },
        DayDescriptor {
            key: DayKey::Kiss,
            unlock_date: date(2026, 2, 13),
            title: "Kiss Day 💋",
            blurb: "Timing kiss meter",
        },
        DayDescriptor {
            key: DayKey::Valentine,
            unlock_date: date(2026, 2, 14),
            title: "Valentine's Day ❤️",
            blurb: "Memory Lane",
        },
    ]
}

/// Descriptor lookup for a single day.
pub fn descriptor(key: DayKey) -> DayDescriptor {
    // ALL and all() are index-aligned.
    let idx = DayKey::ALL
        .iter()
        .position(|k| *k == key)
        .unwrap_or_default();
    all().swap_remove(idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip_through_strings() {
        for key in DayKey::ALL {
            assert_eq!(key.as_str().parse::<DayKey>().unwrap(), key);
        }
        assert!("brunch".parse::<DayKey>().is_err());
    }

    #[test]
    fn week_is_eight_consecutive_days() {
        let days = all();
        assert_eq!(days.len(), 8);
        for pair in days.windows(2) {
            assert_eq!(
                pair[1].unlock_date - pair[0].unlock_date,
                chrono::Duration::days(1)
            );
        }
        assert_eq!(days[0].unlock_date, date(2026, 2, 7));
        assert_eq!(days[7].unlock_date, date(2026, 2, 14));
    }

    #[test]
    fn descriptor_matches_key() {
        for key in DayKey::ALL {
            assert_eq!(descriptor(key).key, key);
        }
    }
}
