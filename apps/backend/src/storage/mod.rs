//! Persistence collaborator contract.
//!
//! The state machines are not internally concurrent: every operation is a
//! read-modify-write of one aggregate, relying on the storage adapter's own
//! consistency. Callers are expected to serialize actions per lobby.

use async_trait::async_trait;

use crate::domain::{Board, Game, GameId, Lobby, LobbyCode, Player, PlayerId};
use crate::errors::domain::DomainError;

pub mod memory;

pub use memory::MemStorage;

/// Get/save/delete access for every aggregate, keyed by its natural id.
///
/// Lookups of absent records fail with `DomainError::NotFound` carrying the
/// entity kind; deletes are idempotent.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn get_player(&self, id: &PlayerId) -> Result<Player, DomainError>;
    async fn save_player(&self, player: &Player) -> Result<(), DomainError>;
    async fn delete_player(&self, id: &PlayerId) -> Result<(), DomainError>;

    async fn get_lobby(&self, code: &LobbyCode) -> Result<Lobby, DomainError>;
    async fn save_lobby(&self, lobby: &Lobby) -> Result<(), DomainError>;
    async fn delete_lobby(&self, code: &LobbyCode) -> Result<(), DomainError>;
    async fn lobby_exists(&self, code: &LobbyCode) -> Result<bool, DomainError>;

    async fn get_game(&self, id: &GameId) -> Result<Game, DomainError>;
    async fn save_game(&self, game: &Game) -> Result<(), DomainError>;
    async fn delete_game(&self, id: &GameId) -> Result<(), DomainError>;

    async fn get_board(
        &self,
        game_id: &GameId,
        player_id: &PlayerId,
    ) -> Result<Board, DomainError>;
    async fn save_board(&self, board: &Board) -> Result<(), DomainError>;
    async fn delete_board(
        &self,
        game_id: &GameId,
        player_id: &PlayerId,
    ) -> Result<(), DomainError>;
    /// All boards belonging to a game, ordered by player id.
    async fn boards_for_game(&self, game_id: &GameId) -> Result<Vec<Board>, DomainError>;

    async fn get_dictionary_words(&self) -> Result<Vec<String>, DomainError>;
    async fn save_dictionary_words(&self, words: &[String]) -> Result<(), DomainError>;
}
