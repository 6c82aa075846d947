//! Valentine's day: a caption quiz over shared photos.
//!
//! Every round shows a photo and two captions; only one is true. The quiz
//! never fails: finishing all rounds wins, and the closing letter is tiered
//! by how many captions were remembered.

use super::{Choice, GameEvent, GameInput, GameView, Minigame, Phase};

/// Pause between answering and the next round.
const ADVANCE_DELAY_MS: u64 = 300;

const PERFECT_LETTER: &str = "Perfect score ❤️\n\nYou remember the little things.\nThat's why I love you.\nHappy Valentine's Day.";
const MOST_LETTER: &str = "You got most of them right.\n\nWhat matters is that these moments exist —\nand that we keep making more together ❤️";
const FADING_LETTER: &str =
    "Some memories fade,\nbut what we have doesn't.\n\nHappy Valentine's Day ❤️";

/// One quiz round, with photo availability resolved up front.
#[derive(Debug, Clone)]
pub struct RoundSpec {
    pub photo_id: String,
    pub photo_available: bool,
    pub caption_a: String,
    pub caption_b: String,
    pub correct: Choice,
}

#[derive(Debug, Clone)]
pub struct MemoryView {
    pub round: usize,
    pub total: usize,
    pub current: Option<RoundSpec>,
    pub letter: Option<String>,
}

pub struct MemoryLane {
    rounds: Vec<RoundSpec>,
    index: usize,
    score: u32,
    /// Countdown to the next round after an answer.
    pending_advance_ms: Option<u64>,
    phase: Phase,
    letter: Option<String>,
}

impl MemoryLane {
    pub fn new(rounds: Vec<RoundSpec>) -> Self {
        let phase = if rounds.is_empty() {
            Phase::Degraded
        } else {
            Phase::InProgress
        };
        Self {
            rounds,
            index: 0,
            score: 0,
            pending_advance_ms: None,
            phase,
            letter: None,
        }
    }

    fn letter_for_score(&self) -> &'static str {
        let total = self.rounds.len() as u32;
        let most = (0.6 * total as f64).ceil() as u32;
        if self.score == total {
            PERFECT_LETTER
        } else if self.score >= most {
            MOST_LETTER
        } else {
            FADING_LETTER
        }
    }
}

impl Minigame for MemoryLane {
    fn phase(&self) -> Phase {
        self.phase
    }

    fn input(&mut self, input: GameInput) -> Option<GameEvent> {
        match input {
            GameInput::Answer(choice) => {
                if self.phase != Phase::InProgress || self.pending_advance_ms.is_some() {
                    return None;
                }
                if choice == self.rounds[self.index].correct {
                    self.score += 1;
                }
                self.pending_advance_ms = Some(ADVANCE_DELAY_MS);
                None
            }
            _ => None,
        }
    }

    fn tick(&mut self, dt_ms: u64) -> Option<GameEvent> {
        let Some(remaining) = self.pending_advance_ms else {
            return None;
        };
        if dt_ms < remaining {
            self.pending_advance_ms = Some(remaining - dt_ms);
            return None;
        }
        self.pending_advance_ms = None;
        self.index += 1;
        if self.index >= self.rounds.len() {
            let letter = self.letter_for_score().to_string();
            self.letter = Some(letter.clone());
            self.phase = Phase::Won;
            return Some(GameEvent::Won { message: letter });
        }
        None
    }

    fn view(&self) -> GameView {
        GameView::Memory(MemoryView {
            round: self.index.min(self.rounds.len()),
            total: self.rounds.len(),
            current: self.rounds.get(self.index).cloned(),
            letter: self.letter.clone(),
        })
    }

    fn reset(&mut self) {
        self.index = 0;
        self.score = 0;
        self.pending_advance_ms = None;
        self.letter = None;
        if self.phase != Phase::Won && !self.rounds.is_empty() {
            self.phase = Phase::InProgress;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rounds(n: usize) -> Vec<RoundSpec> {
        (0..n)
            .map(|i| RoundSpec {
                photo_id: format!("{i}"),
                photo_available: true,
                caption_a: "then".to_string(),
                caption_b: "now".to_string(),
                correct: Choice::A,
            })
            .collect()
    }

    fn answer(game: &mut MemoryLane, choice: Choice) -> Option<GameEvent> {
        game.input(GameInput::Answer(choice));
        game.tick(ADVANCE_DELAY_MS)
    }

    #[test]
    fn all_correct_earns_the_perfect_letter() {
        let mut game = MemoryLane::new(rounds(3));
        assert!(answer(&mut game, Choice::A).is_none());
        assert!(answer(&mut game, Choice::A).is_none());
        match answer(&mut game, Choice::A) {
            Some(GameEvent::Won { message }) => assert_eq!(message, PERFECT_LETTER),
            other => panic!("expected win, got {other:?}"),
        }
        assert_eq!(game.phase(), Phase::Won);
    }

    #[test]
    fn two_of_three_earns_the_most_letter() {
        let mut game = MemoryLane::new(rounds(3));
        answer(&mut game, Choice::A);
        answer(&mut game, Choice::B);
        match answer(&mut game, Choice::A) {
            Some(GameEvent::Won { message }) => assert_eq!(message, MOST_LETTER),
            other => panic!("expected win, got {other:?}"),
        }
    }

    #[test]
    fn zero_correct_still_wins_with_the_fading_letter() {
        let mut game = MemoryLane::new(rounds(3));
        answer(&mut game, Choice::B);
        answer(&mut game, Choice::B);
        match answer(&mut game, Choice::B) {
            Some(GameEvent::Won { message }) => assert_eq!(message, FADING_LETTER),
            other => panic!("expected win, got {other:?}"),
        }
    }

    #[test]
    fn answers_during_the_advance_pause_are_ignored() {
        let mut game = MemoryLane::new(rounds(3));
        game.input(GameInput::Answer(Choice::A));
        // Second answer lands while the round is still advancing.
        game.input(GameInput::Answer(Choice::A));
        assert_eq!(game.score, 1);
        game.tick(ADVANCE_DELAY_MS);
        assert_eq!(game.index, 1);
    }

    #[test]
    fn advance_waits_for_the_full_delay() {
        let mut game = MemoryLane::new(rounds(3));
        game.input(GameInput::Answer(Choice::A));
        assert!(game.tick(ADVANCE_DELAY_MS / 2).is_none());
        assert_eq!(game.index, 0);
        game.tick(ADVANCE_DELAY_MS / 2);
        assert_eq!(game.index, 1);
    }

    #[test]
    fn no_rounds_means_a_degraded_quiz() {
        let game = MemoryLane::new(Vec::new());
        assert_eq!(game.phase(), Phase::Degraded);
    }
}
