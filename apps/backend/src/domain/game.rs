use std::collections::{BTreeMap, HashSet};
use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::lobby::LobbyCode;
use crate::domain::player::PlayerId;

/// Unique identifier for a game.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(String);

impl GameId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for GameId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl From<&str> for GameId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Phase of a single game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Waiting for the announcer to pick a letter
    Announcing,
    /// Players placing the announced letter
    Placing,
    /// All turns played; boards ready for scoring. Terminal.
    Scoring,
    /// Game was cancelled. Terminal.
    Abandoned,
}

impl GamePhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Scoring | Self::Abandoned)
    }
}

/// One playthrough of the letter-placement game.
///
/// `players` is a snapshot taken at game start; late lobby joiners never
/// enter it. `current_turn` never exceeds `total_turns()`.
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    pub id: GameId,
    pub lobby_code: LobbyCode,
    pub phase: GamePhase,
    pub grid_size: usize,
    /// Roster snapshot, in lobby join order at start
    pub players: Vec<PlayerId>,
    /// 0-indexed turn number
    pub current_turn: usize,
    /// Index into `players` for the current announcer
    pub announcer_idx: usize,
    /// The letter announced this turn; None while awaiting announcement
    pub current_letter: Option<char>,
    /// Players who have placed this turn; cleared on every announcement
    pub placements: HashSet<PlayerId>,
    pub turn_started_at: OffsetDateTime,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl Game {
    /// Total number of turns in the game (one per grid cell).
    pub fn total_turns(&self) -> usize {
        self.grid_size * self.grid_size
    }

    /// True once all turns have been played.
    pub fn is_complete(&self) -> bool {
        self.current_turn >= self.total_turns()
    }

    /// The player whose turn it is to announce, if the roster is non-empty.
    pub fn current_announcer(&self) -> Option<&PlayerId> {
        self.players.get(self.announcer_idx)
    }

    pub fn is_in_roster(&self, player_id: &PlayerId) -> bool {
        self.players.contains(player_id)
    }

    pub fn has_placed(&self, player_id: &PlayerId) -> bool {
        self.placements.contains(player_id)
    }

    /// True when every roster player has placed this turn.
    pub fn all_players_placed(&self) -> bool {
        self.players.iter().all(|p| self.placements.contains(p))
    }
}

/// Lightweight record of a completed game, kept in lobby history.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSummary {
    pub id: GameId,
    pub final_scores: BTreeMap<PlayerId, u32>,
    /// None when two or more players tie for the highest score
    pub winner: Option<PlayerId>,
    pub completed_at: OffsetDateTime,
}
