use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::days::DayKey;

/// Every externally visible state change produces an Event.
/// The frontend renders celebrations from them; `--json` output serializes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    SessionOpened {
        day: DayKey,
        at: DateTime<Utc>,
    },
    SessionClosed {
        day: Option<DayKey>,
        at: DateTime<Utc>,
    },
    /// A minigame reached its win state; `message` is the fixed
    /// congratulatory text shown in the celebration overlay.
    GameWon {
        day: DayKey,
        message: String,
        at: DateTime<Utc>,
    },
    ProgressMarked {
        day: DayKey,
        at: DateTime<Utc>,
    },
    /// Try-again feedback that does not end the session.
    RetryPrompt {
        day: DayKey,
        message: String,
        at: DateTime<Utc>,
    },
    CardSaved {
        path: String,
        at: DateTime<Utc>,
    },
    /// The card could not be written; the UI shows a fallback.
    CardFailed {
        message: String,
        at: DateTime<Utc>,
    },
}
