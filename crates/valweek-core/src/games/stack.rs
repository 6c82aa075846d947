//! Chocolate day: drop bars and stack them up.
//!
//! The physics is deliberately approximate: bars fall under gravity, nudge
//! off bars beneath them, and settle on the platform. The only contract is
//! that dropped bars accumulate and the count is visible.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

use super::{GameEvent, GameInput, GameView, Minigame, Phase};

pub const FIELD_W: f32 = 360.0;
pub const FIELD_H: f32 = 420.0;

const GRAVITY: f32 = 0.7;
const BAR_H: f32 = 18.0;
const PLATFORM_TOP: f32 = FIELD_H - 28.0;
const WIN_MESSAGE: &str = "Stacked 10 bars — sweet win!";

/// Velocities are per 20 ms physics step.
const STEP_MS: f32 = 20.0;

#[derive(Debug, Clone)]
pub struct Bar {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub rot: f32,
    pub w: f32,
    pub h: f32,
    pub settled: bool,
}

#[derive(Debug, Clone)]
pub struct StackView {
    pub bars: Vec<Bar>,
    pub dropped: u32,
    pub target: u32,
}

pub struct ChocolateStack {
    rng: Pcg64,
    bars: Vec<Bar>,
    target: u32,
    phase: Phase,
}

impl ChocolateStack {
    pub fn new(target: u32, seed: u64) -> Self {
        let mut game = Self {
            rng: Pcg64::seed_from_u64(seed),
            bars: Vec::new(),
            target: target.max(1),
            phase: Phase::InProgress,
        };
        game.spawn_bar();
        game
    }

    fn spawn_bar(&mut self) {
        let bar = Bar {
            x: FIELD_W / 2.0,
            y: 40.0,
            vx: self.rng.gen_range(-0.5..0.5),
            vy: 0.0,
            rot: self.rng.gen_range(-0.01..0.01),
            w: 120.0 + self.rng.gen_range(0.0..40.0),
            h: BAR_H,
            settled: false,
        };
        self.bars.push(bar);
    }
}

impl Minigame for ChocolateStack {
    fn phase(&self) -> Phase {
        self.phase
    }

    fn input(&mut self, input: GameInput) -> Option<GameEvent> {
        match input {
            GameInput::Drop => {
                self.spawn_bar();
                if self.bars.len() as u32 >= self.target && self.phase != Phase::Won {
                    self.phase = Phase::Won;
                    return Some(GameEvent::Won {
                        message: WIN_MESSAGE.to_string(),
                    });
                }
                None
            }
            _ => None,
        }
    }

    fn tick(&mut self, dt_ms: u64) -> Option<GameEvent> {
        let f = dt_ms as f32 / STEP_MS;
        for i in 0..self.bars.len() {
            if self.bars[i].settled {
                continue;
            }
            let mut b = self.bars[i].clone();
            b.vy += GRAVITY * f;
            b.x += b.vx * f;
            b.y += b.vy * f;
            b.rot += self.rng.gen_range(-0.002..0.002) * f;

            if b.y + b.h / 2.0 > PLATFORM_TOP {
                b.y = PLATFORM_TOP - b.h / 2.0;
                b.vy = 0.0;
                b.vx *= 0.2;
                b.rot *= 0.2;
                b.settled = true;
            } else {
                for j in 0..i {
                    let other = &self.bars[j];
                    let dx = b.x - other.x;
                    let dy = b.y - other.y;
                    if dx.abs() < (b.w + other.w) / 2.0 && dy.abs() < (b.h + other.h) / 2.0 {
                        b.vy = -b.vy.abs() * 0.3;
                        b.x += dx * 0.02;
                    }
                }
            }
            self.bars[i] = b;
        }
        None
    }

    fn view(&self) -> GameView {
        GameView::Stack(StackView {
            bars: self.bars.clone(),
            dropped: self.bars.len() as u32,
            target: self.target,
        })
    }

    fn reset(&mut self) {
        self.bars.clear();
        self.spawn_bar();
        if self.phase != Phase::Won {
            self.phase = Phase::InProgress;
        }
    }
}
