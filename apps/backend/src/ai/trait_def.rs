//! Bot strategy trait definition.

use crate::domain::{Board, Game, Position};

/// Decision policy for a bot player.
///
/// Implementations receive the full game (and the bot's own board for
/// placement) and must return a move; legality is enforced by the game
/// state machine, and a rejected move stops the bot loop rather than being
/// retried.
pub trait Strategy: Send + Sync {
    /// Pick a letter to announce.
    fn choose_letter(&self, game: &Game) -> char;

    /// Pick a position to place the announced letter.
    fn choose_position(&self, game: &Game, board: &Board) -> Position;
}
