//! Minigame engines.
//!
//! Every game is a short-lived state machine driven by the caller: `input()`
//! for user actions, `tick(dt_ms)` for time. Engines own no timers and do no
//! I/O -- the session owns the ticker and mediates persistence, card writes,
//! and the celebration overlay. Nothing here persists intermediate progress;
//! reopening a day always constructs a fresh engine.

mod hide;
mod hug;
mod jigsaw;
mod kiss;
mod memory;
mod petals;
mod placeholder;
mod pledge;
mod stack;

pub use hide::{HideView, Ripple, TeddyHide};
pub use hug::{HugView, WarmHug};
pub use jigsaw::{Jigsaw, JigsawView, PhotoInfo};
pub use kiss::{KissMeter, KissView};
pub use memory::{MemoryLane, MemoryView, RoundSpec};
pub use petals::{Petal, PetalRush, PetalView};
pub use placeholder::Placeholder;
pub use pledge::{PledgeView, PromisePledge};
pub use stack::{Bar, ChocolateStack, StackView};

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::days::DayKey;
use crate::storage::PhotoStore;

/// Lifecycle phase shared by all engines.
///
/// `Degraded` means a required external asset (a photo) is missing: the view
/// shows a placeholder and the game is inert but alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Setup,
    InProgress,
    Won,
    Degraded,
}

/// Two-way choice used by the memory quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Choice {
    A,
    B,
}

/// Frontend-agnostic user input. Engines ignore variants that do not apply
/// to them.
#[derive(Debug, Clone, PartialEq)]
pub enum GameInput {
    /// Tap/probe at field coordinates.
    Tap { x: f32, y: f32 },
    /// Begin holding (hug warmth, kiss charge).
    Press,
    /// Stop holding.
    Release,
    /// Drop the next bar (chocolate stack).
    Drop,
    /// Release a dragged tile at board coordinates (jigsaw).
    PlaceTile { tile: usize, x: f32, y: f32 },
    /// Switch the jigsaw grid and restart the puzzle.
    SetGrid { rows: u8, cols: u8 },
    /// Answer the current memory round.
    Answer(Choice),
    /// Select a pledge by index.
    SelectPledge(usize),
    /// Append a signature stroke (points in capture-box coordinates).
    Stroke(Vec<(f32, f32)>),
    /// Clear the signature.
    ClearSignature,
    /// Ask to save the pledge card.
    SaveCard,
    /// Session feedback: the card file was written.
    CardWritten,
    /// Restart, where the game offers one.
    Restart,
}

/// What an engine reports back to the session.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Win condition reached. One-shot: an engine never emits this twice.
    Won { message: String },
    /// Try-again feedback (kiss outside the band); the session stays open.
    Retry { message: String },
    /// The pledge is ready to be composed into a card file.
    ComposeCard {
        pledge: String,
        strokes: Vec<Vec<(f32, f32)>>,
    },
}

/// Render model handed to the frontend. Purely descriptive; no handles.
#[derive(Debug, Clone)]
pub enum GameView {
    Petals(PetalView),
    Jigsaw(JigsawView),
    Stack(StackView),
    Hide(HideView),
    Pledge(PledgeView),
    Hug(HugView),
    Kiss(KissView),
    Memory(MemoryView),
    Placeholder { note: String },
}

/// A minigame is a caller-driven state machine with a uniform lifecycle.
pub trait Minigame {
    fn phase(&self) -> Phase;

    fn input(&mut self, input: GameInput) -> Option<GameEvent>;

    fn tick(&mut self, dt_ms: u64) -> Option<GameEvent>;

    fn view(&self) -> GameView;

    /// Back to a fresh Setup/InProgress state. Does not undo a win.
    fn reset(&mut self);
}

/// Photo id the jigsaw cuts up, by convention.
pub const JIGSAW_PHOTO_ID: &str = "1";

/// Construct the engine for a day, resolving its photo needs up front.
///
/// Store failures and missing photos degrade the affected game rather than
/// failing construction.
pub fn for_day(
    key: DayKey,
    config: &Config,
    photos: &dyn PhotoStore,
    seed: u64,
) -> Box<dyn Minigame> {
    match key {
        DayKey::Rose => Box::new(PetalRush::new(config.games.petal_target, seed)),
        DayKey::Propose => {
            let photo = photos
                .get(JIGSAW_PHOTO_ID)
                .ok()
                .flatten()
                .and_then(|bytes| PhotoInfo::from_bytes(&bytes));
            Box::new(Jigsaw::new(photo, seed))
        }
        DayKey::Chocolate => Box::new(ChocolateStack::new(config.games.stack_target, seed)),
        DayKey::Teddy => Box::new(TeddyHide::new(seed)),
        DayKey::Promise => Box::new(PromisePledge::new(config.pledge.pledges.clone())),
        DayKey::Hug => Box::new(WarmHug::new(
            config.games.hug_hold_ms,
            config.games.hug_release_penalty_ms,
        )),
        DayKey::Kiss => Box::new(KissMeter::new(config.games.kiss_band, seed)),
        DayKey::Valentine => {
            let rounds = config
                .memory
                .iter()
                .map(|r| RoundSpec {
                    photo_id: r.photo_id.clone(),
                    photo_available: matches!(photos.get(&r.photo_id), Ok(Some(_))),
                    caption_a: r.caption_a.clone(),
                    caption_b: r.caption_b.clone(),
                    correct: r.correct,
                })
                .collect();
            Box::new(MemoryLane::new(rounds))
        }
    }
}
