//! Teddy day: he hides somewhere in the scene; probe around to find him.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

use super::{GameEvent, GameInput, GameView, Minigame, Phase};

pub const FIELD_W: f32 = 360.0;
pub const FIELD_H: f32 = 420.0;

const TEDDY_R: f32 = 26.0;
/// A probe this close counts as a find.
const FIND_SLACK: f32 = 18.0;
const RIPPLE_STEP: f32 = 6.0;
const RIPPLE_MAX: f32 = 50.0;
/// Ripples grow one step per 40 ms.
const RIPPLE_TICK_MS: f32 = 40.0;

const WIN_MESSAGE: &str = "Found him! You're the best seeker ❤️";

#[derive(Debug, Clone)]
pub struct Ripple {
    pub x: f32,
    pub y: f32,
    pub r: f32,
}

#[derive(Debug, Clone)]
pub struct HideView {
    pub found: bool,
    /// Where the ear peeks out. Visible in the scene even before the find.
    pub hint: (f32, f32),
    pub ripples: Vec<Ripple>,
}

pub struct TeddyHide {
    teddy: (f32, f32),
    found: bool,
    ripples: Vec<Ripple>,
    phase: Phase,
}

impl TeddyHide {
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg64::seed_from_u64(seed);
        let teddy = (
            80.0 + rng.gen_range(0.0..FIELD_W - 160.0),
            120.0 + rng.gen_range(0.0..FIELD_H - 180.0),
        );
        Self {
            teddy,
            found: false,
            ripples: Vec::new(),
            phase: Phase::InProgress,
        }
    }
}

impl Minigame for TeddyHide {
    fn phase(&self) -> Phase {
        self.phase
    }

    fn input(&mut self, input: GameInput) -> Option<GameEvent> {
        match input {
            GameInput::Tap { x, y } => {
                if self.phase == Phase::Won {
                    return None;
                }
                let dist = (x - self.teddy.0).hypot(y - self.teddy.1);
                if dist < TEDDY_R + FIND_SLACK {
                    self.found = true;
                    self.phase = Phase::Won;
                    Some(GameEvent::Won {
                        message: WIN_MESSAGE.to_string(),
                    })
                } else {
                    self.ripples.push(Ripple { x, y, r: RIPPLE_STEP });
                    None
                }
            }
            _ => None,
        }
    }

    fn tick(&mut self, dt_ms: u64) -> Option<GameEvent> {
        let grow = RIPPLE_STEP * dt_ms as f32 / RIPPLE_TICK_MS;
        self.ripples.retain_mut(|ripple| {
            ripple.r += grow;
            ripple.r <= RIPPLE_MAX
        });
        None
    }

    fn view(&self) -> GameView {
        GameView::Hide(HideView {
            found: self.found,
            hint: (self.teddy.0, self.teddy.1 + 10.0),
            ripples: self.ripples.clone(),
        })
    }

    fn reset(&mut self) {
        self.ripples.clear();
    }
}
