//! Hug day: hold to warm the scene.
//!
//! Charge accrues while held, tick by tick. Releasing early costs a fixed
//! penalty and the remainder drains toward zero while idle; reaching the
//! hold duration wins exactly once.

use super::{GameEvent, GameInput, GameView, Minigame, Phase};

const WIN_MESSAGE: &str = "That was a warm hug ❤️";

#[derive(Debug, Clone)]
pub struct HugView {
    pub charge_ms: u64,
    pub hold_ms: u64,
    /// 0.0 .. 1.0 of the way to a full hug.
    pub warmth: f32,
    pub holding: bool,
}

pub struct WarmHug {
    hold_ms: u64,
    release_penalty_ms: u64,
    charge_ms: u64,
    holding: bool,
    phase: Phase,
}

impl WarmHug {
    pub fn new(hold_ms: u64, release_penalty_ms: u64) -> Self {
        Self {
            hold_ms: hold_ms.max(1),
            release_penalty_ms,
            charge_ms: 0,
            holding: false,
            phase: Phase::InProgress,
        }
    }

    fn warmth(&self) -> f32 {
        (self.charge_ms as f32 / self.hold_ms as f32).min(1.0)
    }
}

impl Minigame for WarmHug {
    fn phase(&self) -> Phase {
        self.phase
    }

    fn input(&mut self, input: GameInput) -> Option<GameEvent> {
        if self.phase == Phase::Won {
            return None;
        }
        match input {
            GameInput::Press => {
                self.holding = true;
                None
            }
            GameInput::Release => {
                if self.holding {
                    self.holding = false;
                    self.charge_ms = self.charge_ms.saturating_sub(self.release_penalty_ms);
                }
                None
            }
            _ => None,
        }
    }

    fn tick(&mut self, dt_ms: u64) -> Option<GameEvent> {
        if self.phase == Phase::Won {
            return None;
        }
        if self.holding {
            self.charge_ms = self.charge_ms.saturating_add(dt_ms);
            if self.charge_ms >= self.hold_ms {
                self.charge_ms = self.hold_ms;
                self.holding = false;
                self.phase = Phase::Won;
                return Some(GameEvent::Won {
                    message: WIN_MESSAGE.to_string(),
                });
            }
        } else {
            self.charge_ms = self.charge_ms.saturating_sub(dt_ms);
        }
        None
    }

    fn view(&self) -> GameView {
        GameView::Hug(HugView {
            charge_ms: self.charge_ms,
            hold_ms: self.hold_ms,
            warmth: self.warmth(),
            holding: self.holding,
        })
    }

    fn reset(&mut self) {
        self.charge_ms = 0;
        self.holding = false;
        if self.phase != Phase::Won {
            self.phase = Phase::InProgress;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn holding_long_enough_wins_exactly_once() {
        let mut game = WarmHug::new(6000, 800);
        game.input(GameInput::Press);
        let mut wins = 0;
        for _ in 0..400 {
            if let Some(GameEvent::Won { .. }) = game.tick(20) {
                wins += 1;
            }
        }
        assert_eq!(wins, 1);
        assert_eq!(game.phase(), Phase::Won);
        // Further holding does nothing.
        game.input(GameInput::Press);
        assert!(game.tick(10_000).is_none());
    }

    #[test]
    fn early_release_pays_the_penalty() {
        let mut game = WarmHug::new(6000, 800);
        game.input(GameInput::Press);
        for _ in 0..100 {
            game.tick(20); // 2000 ms of warmth
        }
        game.input(GameInput::Release);
        assert_eq!(game.charge_ms, 1200);
    }

    #[test]
    fn idle_charge_decays_monotonically_to_zero() {
        let mut game = WarmHug::new(6000, 800);
        game.input(GameInput::Press);
        for _ in 0..150 {
            game.tick(20); // 3000 ms
        }
        game.input(GameInput::Release);
        let mut last = game.charge_ms;
        for _ in 0..200 {
            game.tick(20);
            assert!(game.charge_ms <= last);
            last = game.charge_ms;
        }
        assert_eq!(game.charge_ms, 0);
        assert_eq!(game.phase(), Phase::InProgress);
    }

    #[test]
    fn release_without_holding_is_a_no_op() {
        let mut game = WarmHug::new(6000, 800);
        game.input(GameInput::Release);
        assert_eq!(game.charge_ms, 0);
    }
}
