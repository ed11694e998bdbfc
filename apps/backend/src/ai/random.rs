//! Random strategy: uniform letters, uniform empty cells.

use std::sync::Arc;

use crate::ai::trait_def::Strategy;
use crate::domain::{Board, Game, Position};
use crate::infra::RandomSource;

/// The default shipping strategy.
pub struct RandomStrategy {
    random: Arc<dyn RandomSource>,
}

impl RandomStrategy {
    pub const NAME: &'static str = "random";

    pub fn new(random: Arc<dyn RandomSource>) -> Self {
        Self { random }
    }
}

impl Strategy for RandomStrategy {
    fn choose_letter(&self, _game: &Game) -> char {
        (b'A' + self.random.int_below(26) as u8) as char
    }

    fn choose_position(&self, _game: &Game, board: &Board) -> Position {
        let empty = board.empty_positions();
        if empty.is_empty() {
            // Unreachable during a well-formed game; the machine rejects it.
            return Position::new(0, 0);
        }
        empty[self.random.int_below(empty.len())]
    }
}
