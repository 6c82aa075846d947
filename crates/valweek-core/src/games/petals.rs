//! Rose day: tap falling petals to collect them.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

use super::{GameEvent, GameInput, GameView, Minigame, Phase};

pub const FIELD_W: f32 = 360.0;
pub const FIELD_H: f32 = 420.0;

const SEEDED_PETALS: usize = 12;
const WIN_MESSAGE: &str = "A Rose for my Rose 🌹 (since I cannot give you a real one)";

/// Velocities are per 16 ms frame.
const FRAME_MS: f32 = 16.0;

#[derive(Debug, Clone)]
pub struct Petal {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub r: f32,
    pub rot: f32,
    pub rot_speed: f32,
}

#[derive(Debug, Clone)]
pub struct PetalView {
    pub petals: Vec<Petal>,
    pub collected: u32,
    pub target: u32,
}

pub struct PetalRush {
    rng: Pcg64,
    petals: Vec<Petal>,
    collected: u32,
    target: u32,
    phase: Phase,
}

impl PetalRush {
    pub fn new(target: u32, seed: u64) -> Self {
        let mut game = Self {
            rng: Pcg64::seed_from_u64(seed),
            petals: Vec::new(),
            collected: 0,
            target: target.max(1),
            phase: Phase::InProgress,
        };
        game.seed_field();
        game
    }

    fn seed_field(&mut self) {
        self.petals.clear();
        self.collected = 0;
        for _ in 0..SEEDED_PETALS {
            self.spawn(true);
        }
    }

    fn spawn(&mut self, above_fold: bool) {
        let y = if above_fold {
            self.rng.gen_range(0.0..FIELD_H * 0.3) - 40.0
        } else {
            -20.0 - self.rng.gen_range(0.0..200.0)
        };
        let petal = Petal {
            x: self.rng.gen_range(0.0..FIELD_W),
            y,
            vx: self.rng.gen_range(-0.3..0.3),
            vy: 0.5 + self.rng.gen_range(0.0..1.2),
            r: 8.0 + self.rng.gen_range(0.0..10.0),
            rot: self.rng.gen_range(0.0..std::f32::consts::TAU),
            rot_speed: self.rng.gen_range(-0.03..0.03),
        };
        self.petals.push(petal);
    }
}

impl Minigame for PetalRush {
    fn phase(&self) -> Phase {
        self.phase
    }

    fn input(&mut self, input: GameInput) -> Option<GameEvent> {
        match input {
            GameInput::Tap { x, y } => {
                // Topmost petal first (drawn last).
                let hit = self.petals.iter().rposition(|p| {
                    let dx = p.x - x;
                    let dy = p.y - y;
                    dx * dx + dy * dy < (p.r * 1.8) * (p.r * 1.8)
                })?;
                self.petals.remove(hit);
                self.collected += 1;
                self.spawn(false);
                if self.collected >= self.target && self.phase != Phase::Won {
                    self.phase = Phase::Won;
                    return Some(GameEvent::Won {
                        message: WIN_MESSAGE.to_string(),
                    });
                }
                None
            }
            GameInput::Restart => {
                self.seed_field();
                None
            }
            _ => None,
        }
    }

    fn tick(&mut self, dt_ms: u64) -> Option<GameEvent> {
        let f = dt_ms as f32 / FRAME_MS;
        let mut respawn = 0;
        self.petals.retain_mut(|p| {
            p.x += p.vx * f;
            p.y += p.vy * f;
            p.rot += p.rot_speed * f;
            if p.y > FIELD_H + 20.0 {
                respawn += 1;
                false
            } else {
                true
            }
        });
        for _ in 0..respawn {
            self.spawn(false);
        }
        None
    }

    fn view(&self) -> GameView {
        GameView::Petals(PetalView {
            petals: self.petals.clone(),
            collected: self.collected,
            target: self.target,
        })
    }

    fn reset(&mut self) {
        self.seed_field();
        if self.phase != Phase::Won {
            self.phase = Phase::InProgress;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tap_first(game: &mut PetalRush) -> Option<GameEvent> {
        let (x, y) = {
            let p = &game.petals[game.petals.len() - 1];
            (p.x, p.y)
        };
        game.input(GameInput::Tap { x, y })
    }

    #[test]
    fn tap_on_a_petal_collects_it() {
        let mut game = PetalRush::new(20, 7);
        assert_eq!(game.collected, 0);
        tap_first(&mut game);
        assert_eq!(game.collected, 1);
        // The field stays populated.
        assert_eq!(game.petals.len(), SEEDED_PETALS);
    }

    #[test]
    fn tap_in_empty_space_misses() {
        let mut game = PetalRush::new(20, 7);
        // Well below the field: nothing there.
        assert!(game
            .input(GameInput::Tap {
                x: 0.0,
                y: FIELD_H + 1000.0
            })
            .is_none());
        assert_eq!(game.collected, 0);
    }

    #[test]
    fn collecting_the_target_wins_exactly_once() {
        let mut game = PetalRush::new(3, 11);
        assert!(tap_first(&mut game).is_none());
        assert!(tap_first(&mut game).is_none());
        let won = tap_first(&mut game);
        assert!(matches!(won, Some(GameEvent::Won { .. })));
        assert_eq!(game.phase(), Phase::Won);
        // Collecting past the target never re-triggers.
        assert!(tap_first(&mut game).is_none());
        assert!(tap_first(&mut game).is_none());
    }

    #[test]
    fn ticks_advance_petals_downward() {
        let mut game = PetalRush::new(20, 3);
        let before: f32 = game.petals.iter().map(|p| p.y).sum();
        game.tick(160);
        let after: f32 = game.petals.iter().map(|p| p.y).sum();
        assert!(after > before);
    }

    #[test]
    fn fallen_petals_respawn_above_the_field() {
        let mut game = PetalRush::new(20, 3);
        // Long enough for every petal to fall off at least once.
        for _ in 0..10_000 {
            game.tick(16);
        }
        assert_eq!(game.petals.len(), SEEDED_PETALS);
        assert!(game.petals.iter().all(|p| p.y <= FIELD_H + 20.0));
    }

    #[test]
    fn restart_clears_the_count() {
        let mut game = PetalRush::new(20, 5);
        tap_first(&mut game);
        game.input(GameInput::Restart);
        assert_eq!(game.collected, 0);
        assert_eq!(game.phase(), Phase::InProgress);
    }
}
