//! Kiss day: press to fill the meter, release inside the sweet band.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

use super::{GameEvent, GameInput, GameView, Minigame, Phase};

/// Percent gained per 20 ms while charging, before jitter.
const CHARGE_RATE: f32 = 0.6;
const CHARGE_JITTER: f32 = 0.6;
const CHARGE_TICK_MS: f32 = 20.0;
/// Percent lost per 40 ms after a failed release.
const DECAY_RATE: f32 = 4.0;
const DECAY_TICK_MS: f32 = 40.0;

const WIN_MESSAGE: &str = "Perfect kiss! 😘";
const TOO_SHY: &str = "Too shy! Try again.";
const TOO_EAGER: &str = "Too overenthusiastic! Try again.";

#[derive(Debug, Clone)]
pub struct KissView {
    pub pct: f32,
    pub band: [f32; 2],
    pub charging: bool,
}

pub struct KissMeter {
    rng: Pcg64,
    pct: f32,
    band: [f32; 2],
    charging: bool,
    phase: Phase,
}

impl KissMeter {
    pub fn new(band: [f32; 2], seed: u64) -> Self {
        Self {
            rng: Pcg64::seed_from_u64(seed),
            pct: 0.0,
            band,
            charging: false,
            phase: Phase::InProgress,
        }
    }
}

impl Minigame for KissMeter {
    fn phase(&self) -> Phase {
        self.phase
    }

    fn input(&mut self, input: GameInput) -> Option<GameEvent> {
        if self.phase == Phase::Won {
            return None;
        }
        match input {
            GameInput::Press => {
                self.charging = true;
                None
            }
            GameInput::Release => {
                if !self.charging {
                    return None;
                }
                self.charging = false;
                if self.pct >= self.band[0] && self.pct <= self.band[1] {
                    self.phase = Phase::Won;
                    Some(GameEvent::Won {
                        message: WIN_MESSAGE.to_string(),
                    })
                } else if self.pct < self.band[0] {
                    Some(GameEvent::Retry {
                        message: TOO_SHY.to_string(),
                    })
                } else {
                    Some(GameEvent::Retry {
                        message: TOO_EAGER.to_string(),
                    })
                }
            }
            _ => None,
        }
    }

    fn tick(&mut self, dt_ms: u64) -> Option<GameEvent> {
        if self.phase == Phase::Won {
            return None;
        }
        if self.charging {
            let gain = (CHARGE_RATE + self.rng.gen::<f32>() * CHARGE_JITTER)
                * dt_ms as f32
                / CHARGE_TICK_MS;
            self.pct = (self.pct + gain).min(100.0);
        } else if self.pct > 0.0 {
            self.pct = (self.pct - DECAY_RATE * dt_ms as f32 / DECAY_TICK_MS).max(0.0);
        }
        None
    }

    fn view(&self) -> GameView {
        GameView::Kiss(KissView {
            pct: self.pct,
            band: self.band,
            charging: self.charging,
        })
    }

    fn reset(&mut self) {
        self.pct = 0.0;
        self.charging = false;
        if self.phase != Phase::Won {
            self.phase = Phase::InProgress;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn charge_until(game: &mut KissMeter, pct: f32) {
        game.input(GameInput::Press);
        while game.pct < pct {
            game.tick(20);
        }
    }

    #[test]
    fn release_in_the_band_is_the_perfect_kiss() {
        let mut game = KissMeter::new([45.0, 65.0], 1);
        charge_until(&mut game, 50.0);
        let out = game.input(GameInput::Release);
        assert!(matches!(out, Some(GameEvent::Won { .. })));
        assert_eq!(game.phase(), Phase::Won);
        // A won meter is inert.
        game.input(GameInput::Press);
        assert!(game.tick(1000).is_none());
        assert!(game.input(GameInput::Release).is_none());
    }

    #[test]
    fn shy_release_asks_for_a_retry() {
        let mut game = KissMeter::new([45.0, 65.0], 1);
        charge_until(&mut game, 10.0);
        match game.input(GameInput::Release) {
            Some(GameEvent::Retry { message }) => assert_eq!(message, TOO_SHY),
            other => panic!("expected retry, got {other:?}"),
        }
        assert_eq!(game.phase(), Phase::InProgress);
    }

    #[test]
    fn eager_release_asks_for_a_retry() {
        let mut game = KissMeter::new([45.0, 65.0], 1);
        charge_until(&mut game, 90.0);
        match game.input(GameInput::Release) {
            Some(GameEvent::Retry { message }) => assert_eq!(message, TOO_EAGER),
            other => panic!("expected retry, got {other:?}"),
        }
    }

    #[test]
    fn meter_decays_after_a_failed_release() {
        let mut game = KissMeter::new([45.0, 65.0], 1);
        charge_until(&mut game, 90.0);
        game.input(GameInput::Release);
        let mut last = game.pct;
        while game.pct > 0.0 {
            game.tick(40);
            assert!(game.pct <= last);
            last = game.pct;
        }
        assert_eq!(game.pct, 0.0);
    }

    #[test]
    fn meter_caps_at_one_hundred() {
        let mut game = KissMeter::new([45.0, 65.0], 1);
        game.input(GameInput::Press);
        for _ in 0..10_000 {
            game.tick(20);
        }
        assert!(game.pct <= 100.0);
    }
}
