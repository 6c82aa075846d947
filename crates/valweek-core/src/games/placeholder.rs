//! Fallback panel for entries with no game behind them.

use super::{GameEvent, GameInput, GameView, Minigame, Phase};

pub struct Placeholder {
    note: String,
}

impl Placeholder {
    pub fn new(note: impl Into<String>) -> Self {
        Self { note: note.into() }
    }
}

impl Minigame for Placeholder {
    fn phase(&self) -> Phase {
        Phase::InProgress
    }

    fn input(&mut self, _input: GameInput) -> Option<GameEvent> {
        None
    }

    fn tick(&mut self, _dt_ms: u64) -> Option<GameEvent> {
        None
    }

    fn view(&self) -> GameView {
        GameView::Placeholder {
            note: self.note.clone(),
        }
    }

    fn reset(&mut self) {}
}
