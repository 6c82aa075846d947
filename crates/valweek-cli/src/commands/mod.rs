pub mod card;
pub mod days;
pub mod photos;
pub mod play;
pub mod progress;

use chrono::NaiveDate;

/// Unlock parameters read once at startup.
pub struct UnlockArgs {
    pub dev: bool,
    pub date: Option<String>,
}

impl UnlockArgs {
    pub fn today(&self) -> NaiveDate {
        valweek_core::unlock::today(self.date.as_deref())
    }
}

/// `7 Feb` style badge dates.
pub fn short_date(date: NaiveDate) -> String {
    date.format("%-d %b").to_string()
}
