use serde::{Deserialize, Serialize};

use crate::domain::game::GameId;
use crate::domain::player::PlayerId;

/// A cell coordinate on a board, 0-indexed from the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// A player's private grid for one game.
///
/// Cells are row-major; `None` means empty. Read-mostly once the game
/// reaches Scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    pub game_id: GameId,
    pub player_id: PlayerId,
    pub size: usize,
    cells: Vec<Vec<Option<char>>>,
}

impl Board {
    /// An empty board of the given size.
    pub fn new(game_id: GameId, player_id: PlayerId, size: usize) -> Self {
        Self {
            game_id,
            player_id,
            size,
            cells: vec![vec![None; size]; size],
        }
    }

    /// The letter at `pos`, or None when empty or out of bounds.
    pub fn get(&self, pos: Position) -> Option<char> {
        if !self.is_valid_position(pos) {
            return None;
        }
        self.cells[pos.row][pos.col]
    }

    /// Place a letter at `pos`. Out-of-bounds writes are ignored; callers
    /// validate through the board service first.
    pub fn set(&mut self, pos: Position, letter: char) {
        if self.is_valid_position(pos) {
            self.cells[pos.row][pos.col] = Some(letter);
        }
    }

    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos).is_none()
    }

    pub fn is_valid_position(&self, pos: Position) -> bool {
        pos.row < self.size && pos.col < self.size
    }

    /// True once every cell holds a letter.
    pub fn is_full(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row.iter().all(|cell| cell.is_some()))
    }

    pub fn empty_count(&self) -> usize {
        self.cells
            .iter()
            .flat_map(|row| row.iter())
            .filter(|cell| cell.is_none())
            .count()
    }

    /// All positions currently empty, in row-major order.
    pub fn empty_positions(&self) -> Vec<Position> {
        let mut empty = Vec::new();
        for row in 0..self.size {
            for col in 0..self.size {
                if self.cells[row][col].is_none() {
                    empty.push(Position::new(row, col));
                }
            }
        }
        empty
    }

    /// The letters in the given row, left to right.
    pub fn row(&self, row: usize) -> Vec<Option<char>> {
        if row >= self.size {
            return Vec::new();
        }
        self.cells[row].clone()
    }

    /// The letters in the given column, top to bottom.
    pub fn col(&self, col: usize) -> Vec<Option<char>> {
        if col >= self.size {
            return Vec::new();
        }
        (0..self.size).map(|row| self.cells[row][col]).collect()
    }
}

/// A dictionary word found on a board during scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordMatch {
    pub word: String,
    pub start: Position,
    /// True for left-to-right words, false for top-to-bottom
    pub horizontal: bool,
    pub length: usize,
    pub score: u32,
}

/// The complete scoring result for one board. Derived on demand, never
/// persisted as primary state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardScore {
    pub player_id: PlayerId,
    pub words: Vec<WordMatch>,
    pub total: u32,
}
