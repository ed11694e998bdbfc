//! Board creation and grid mutation.

use std::sync::Arc;

use crate::domain::{Board, GameId, PlayerId, Position};
use crate::errors::domain::{DomainError, PreconditionKind};
use crate::storage::Storage;

/// Grid-mutation sub-service; owns bounds/occupancy/letter validation.
pub struct BoardService {
    storage: Arc<dyn Storage>,
}

impl BoardService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Initialize an empty board for a player in a game.
    pub async fn create_board(
        &self,
        game_id: &GameId,
        player_id: &PlayerId,
        size: usize,
    ) -> Result<Board, DomainError> {
        let board = Board::new(game_id.clone(), player_id.clone(), size);
        self.storage.save_board(&board).await?;
        Ok(board)
    }

    pub async fn get_board(
        &self,
        game_id: &GameId,
        player_id: &PlayerId,
    ) -> Result<Board, DomainError> {
        self.storage.get_board(game_id, player_id).await
    }

    pub async fn boards_for_game(&self, game_id: &GameId) -> Result<Vec<Board>, DomainError> {
        self.storage.boards_for_game(game_id).await
    }

    /// Place a letter on the board and save it. The letter is stored
    /// upper-cased.
    pub async fn place_letter(
        &self,
        board: &mut Board,
        letter: char,
        pos: Position,
    ) -> Result<(), DomainError> {
        self.validate_placement(board, pos)?;
        validate_letter(letter)?;

        board.set(pos, letter.to_ascii_uppercase());
        self.storage.save_board(board).await
    }

    /// Check that a position is in bounds and the cell is empty.
    pub fn validate_placement(&self, board: &Board, pos: Position) -> Result<(), DomainError> {
        if !board.is_valid_position(pos) {
            return Err(DomainError::precondition(
                PreconditionKind::OutOfBounds,
                format!("({}, {}) outside {}x{} grid", pos.row, pos.col, board.size, board.size),
            ));
        }
        if !board.is_empty(pos) {
            return Err(DomainError::precondition(
                PreconditionKind::CellOccupied,
                format!("cell ({}, {}) already holds a letter", pos.row, pos.col),
            ));
        }
        Ok(())
    }
}

/// Check that a character is a letter A-Z (case-insensitive).
pub fn validate_letter(letter: char) -> Result<(), DomainError> {
    if letter.is_ascii_alphabetic() {
        Ok(())
    } else {
        Err(DomainError::invalid_input(format!(
            "{letter:?} is not a letter"
        )))
    }
}
