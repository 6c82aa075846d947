//! One active minigame at a time.
//!
//! The session is the modal surface: `open` builds exactly one engine from
//! the registry with the stores injected, `close` cancels the ticker and
//! leaves the session inert regardless of what the game was doing. Wins are
//! mediated here -- the engine reports, the session marks progress and hands
//! the frontend a celebration event, exactly once per session.

use std::path::PathBuf;

use chrono::Utc;

use crate::card::{self, CardSpec};
use crate::config::Config;
use crate::days::DayKey;
use crate::events::Event;
use crate::games::{self, GameEvent, GameInput, GameView, Minigame, Phase, Placeholder};
use crate::storage::{PhotoStore, ProgressStore};
use crate::ticker::Ticker;

/// Engine tick granularity.
const TICK_MS: u64 = 20;

pub const CARD_FILE_NAME: &str = "promise-card.png";

pub struct GameSession {
    day: Option<DayKey>,
    engine: Box<dyn Minigame>,
    ticker: Ticker,
    progress: Box<dyn ProgressStore>,
    card_dir: PathBuf,
    celebrated: bool,
}

impl GameSession {
    /// Open a day's minigame. Photo lookups happen here, once; the engine
    /// degrades rather than failing if they come up empty.
    pub fn open(
        day: DayKey,
        config: &Config,
        progress: Box<dyn ProgressStore>,
        photos: &dyn PhotoStore,
        card_dir: PathBuf,
        seed: u64,
    ) -> (Self, Event) {
        let engine = games::for_day(day, config, photos, seed);
        tracing::info!(day = %day, "session opened");
        (
            Self {
                day: Some(day),
                engine,
                ticker: Ticker::new(TICK_MS),
                progress,
                card_dir,
                celebrated: false,
            },
            Event::SessionOpened { day, at: Utc::now() },
        )
    }

    /// Open a placeholder panel for an entry with no game behind it.
    pub fn open_unknown(raw: &str, progress: Box<dyn ProgressStore>) -> Self {
        tracing::warn!(key = raw, "no game for key, showing placeholder");
        Self {
            day: None,
            engine: Box::new(Placeholder::new("Not implemented")),
            ticker: Ticker::new(TICK_MS),
            progress,
            card_dir: PathBuf::new(),
            celebrated: false,
        }
    }

    pub fn day(&self) -> Option<DayKey> {
        self.day
    }

    pub fn phase(&self) -> Phase {
        self.engine.phase()
    }

    pub fn view(&self) -> GameView {
        self.engine.view()
    }

    pub fn is_closed(&self) -> bool {
        self.ticker.handle().is_cancelled()
    }

    /// Report elapsed wall time; whole ticks are dispatched to the engine.
    /// A closed session never ticks.
    pub fn advance(&mut self, elapsed_ms: u64) -> Vec<Event> {
        let steps = self.ticker.advance(elapsed_ms);
        let mut out = Vec::new();
        for _ in 0..steps {
            if let Some(ev) = self.engine.tick(self.ticker.step_ms()) {
                out.extend(self.handle(ev));
            }
        }
        out
    }

    /// Feed a user input to the engine. A closed session is inert.
    pub fn input(&mut self, input: GameInput) -> Vec<Event> {
        if self.is_closed() {
            return Vec::new();
        }
        match self.engine.input(input) {
            Some(ev) => self.handle(ev),
            None => Vec::new(),
        }
    }

    /// Tear the session down: cancel the ticker, drop nothing on the floor.
    /// Safe to call in any state, including mid-hold or mid-drag.
    pub fn close(&mut self) -> Event {
        self.ticker.handle().cancel();
        tracing::info!(day = ?self.day, "session closed");
        Event::SessionClosed {
            day: self.day,
            at: Utc::now(),
        }
    }

    fn handle(&mut self, ev: GameEvent) -> Vec<Event> {
        match ev {
            GameEvent::Won { message } => {
                let mut out = Vec::new();
                if self.celebrated {
                    return out;
                }
                self.celebrated = true;
                if let Some(day) = self.day {
                    match self.progress.mark_complete(day) {
                        Ok(()) => out.push(Event::ProgressMarked { day, at: Utc::now() }),
                        Err(e) => tracing::warn!(day = %day, error = %e, "progress not saved"),
                    }
                    tracing::info!(day = %day, "game won");
                    out.push(Event::GameWon {
                        day,
                        message,
                        at: Utc::now(),
                    });
                }
                out
            }
            GameEvent::Retry { message } => match self.day {
                Some(day) => vec![Event::RetryPrompt {
                    day,
                    message,
                    at: Utc::now(),
                }],
                None => Vec::new(),
            },
            GameEvent::ComposeCard { pledge, strokes } => {
                let path = self.card_dir.join(CARD_FILE_NAME);
                let spec = CardSpec {
                    pledge: &pledge,
                    strokes: &strokes,
                };
                match card::render_to(&path, &spec) {
                    Ok(()) => {
                        let mut out = vec![Event::CardSaved {
                            path: path.display().to_string(),
                            at: Utc::now(),
                        }];
                        out.extend(self.input(GameInput::CardWritten));
                        out
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "card not written");
                        vec![Event::CardFailed {
                            message: e.to_string(),
                            at: Utc::now(),
                        }]
                    }
                }
            }
        }
    }
}
