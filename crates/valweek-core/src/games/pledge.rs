//! Promise day: choose a pledge, sign it, save the card.
//!
//! The engine only collects the pledge choice and the signature strokes;
//! composing and writing the PNG is the session's job. The win lands when
//! the session confirms the card file was written.

use super::{GameEvent, GameInput, GameView, Minigame, Phase};

const WIN_MESSAGE: &str = "Saved your promise!";

#[derive(Debug, Clone)]
pub struct PledgeView {
    pub pledges: Vec<String>,
    pub selected: usize,
    pub stroke_count: usize,
    pub signed: bool,
}

pub struct PromisePledge {
    pledges: Vec<String>,
    selected: usize,
    strokes: Vec<Vec<(f32, f32)>>,
    phase: Phase,
}

impl PromisePledge {
    pub fn new(pledges: Vec<String>) -> Self {
        let phase = if pledges.is_empty() {
            Phase::Degraded
        } else {
            Phase::InProgress
        };
        Self {
            pledges,
            selected: 0,
            strokes: Vec::new(),
            phase,
        }
    }
}

impl Minigame for PromisePledge {
    fn phase(&self) -> Phase {
        self.phase
    }

    fn input(&mut self, input: GameInput) -> Option<GameEvent> {
        if self.phase == Phase::Degraded {
            return None;
        }
        match input {
            GameInput::SelectPledge(idx) => {
                if idx < self.pledges.len() {
                    self.selected = idx;
                }
                None
            }
            GameInput::Stroke(points) => {
                if !points.is_empty() {
                    self.strokes.push(points);
                }
                None
            }
            GameInput::ClearSignature => {
                self.strokes.clear();
                None
            }
            GameInput::SaveCard => {
                if self.phase == Phase::Won {
                    return None;
                }
                Some(GameEvent::ComposeCard {
                    pledge: self.pledges[self.selected].clone(),
                    strokes: self.strokes.clone(),
                })
            }
            GameInput::CardWritten => {
                if self.phase == Phase::Won {
                    return None;
                }
                self.phase = Phase::Won;
                Some(GameEvent::Won {
                    message: WIN_MESSAGE.to_string(),
                })
            }
            _ => None,
        }
    }

    fn tick(&mut self, _dt_ms: u64) -> Option<GameEvent> {
        None
    }

    fn view(&self) -> GameView {
        GameView::Pledge(PledgeView {
            pledges: self.pledges.clone(),
            selected: self.selected,
            stroke_count: self.strokes.len(),
            signed: !self.strokes.is_empty(),
        })
    }

    fn reset(&mut self) {
        self.selected = 0;
        self.strokes.clear();
        if self.phase != Phase::Won && !self.pledges.is_empty() {
            self.phase = Phase::InProgress;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pledges() -> Vec<String> {
        vec!["promise one".to_string(), "promise two".to_string()]
    }

    #[test]
    fn save_proposes_the_selected_pledge_and_strokes() {
        let mut game = PromisePledge::new(pledges());
        game.input(GameInput::SelectPledge(1));
        game.input(GameInput::Stroke(vec![(0.0, 0.0), (10.0, 12.0)]));
        match game.input(GameInput::SaveCard) {
            Some(GameEvent::ComposeCard { pledge, strokes }) => {
                assert_eq!(pledge, "promise two");
                assert_eq!(strokes.len(), 1);
            }
            other => panic!("expected compose, got {other:?}"),
        }
        // Not won yet; the card has not been confirmed written.
        assert_eq!(game.phase(), Phase::InProgress);
    }

    #[test]
    fn card_written_wins_exactly_once() {
        let mut game = PromisePledge::new(pledges());
        let won = game.input(GameInput::CardWritten);
        assert!(matches!(won, Some(GameEvent::Won { .. })));
        assert_eq!(game.phase(), Phase::Won);
        assert!(game.input(GameInput::CardWritten).is_none());
        assert!(game.input(GameInput::SaveCard).is_none());
    }

    #[test]
    fn clear_empties_the_signature() {
        let mut game = PromisePledge::new(pledges());
        game.input(GameInput::Stroke(vec![(1.0, 1.0)]));
        game.input(GameInput::ClearSignature);
        match game.view() {
            GameView::Pledge(v) => assert!(!v.signed),
            _ => unreachable!(),
        }
    }

    #[test]
    fn out_of_range_selection_is_ignored() {
        let mut game = PromisePledge::new(pledges());
        game.input(GameInput::SelectPledge(9));
        match game.view() {
            GameView::Pledge(v) => assert_eq!(v.selected, 0),
            _ => unreachable!(),
        }
    }

    #[test]
    fn empty_strokes_are_dropped() {
        let mut game = PromisePledge::new(pledges());
        game.input(GameInput::Stroke(Vec::new()));
        match game.view() {
            GameView::Pledge(v) => assert_eq!(v.stroke_count, 0),
            _ => unreachable!(),
        }
    }
}
