//! In-memory storage adapter.
//!
//! Durable persistence is out of scope; this adapter backs tests and
//! embedding callers. Aggregates are stored by value, so a loaded record is
//! a private copy until saved back.

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::RwLock;

use crate::domain::{Board, Game, GameId, Lobby, LobbyCode, Player, PlayerId};
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::storage::Storage;

#[derive(Default)]
pub struct MemStorage {
    players: DashMap<PlayerId, Player>,
    lobbies: DashMap<LobbyCode, Lobby>,
    games: DashMap<GameId, Game>,
    boards: DashMap<(GameId, PlayerId), Board>,
    dictionary: RwLock<Vec<String>>,
}

impl MemStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for MemStorage {
    async fn get_player(&self, id: &PlayerId) -> Result<Player, DomainError> {
        self.players
            .get(id)
            .map(|p| p.clone())
            .ok_or_else(|| DomainError::not_found(NotFoundKind::Player, id.to_string()))
    }

    async fn save_player(&self, player: &Player) -> Result<(), DomainError> {
        self.players.insert(player.id.clone(), player.clone());
        Ok(())
    }

    async fn delete_player(&self, id: &PlayerId) -> Result<(), DomainError> {
        self.players.remove(id);
        Ok(())
    }

    async fn get_lobby(&self, code: &LobbyCode) -> Result<Lobby, DomainError> {
        self.lobbies
            .get(code)
            .map(|l| l.clone())
            .ok_or_else(|| DomainError::not_found(NotFoundKind::Lobby, code.to_string()))
    }

    async fn save_lobby(&self, lobby: &Lobby) -> Result<(), DomainError> {
        self.lobbies.insert(lobby.code.clone(), lobby.clone());
        Ok(())
    }

    async fn delete_lobby(&self, code: &LobbyCode) -> Result<(), DomainError> {
        self.lobbies.remove(code);
        Ok(())
    }

    async fn lobby_exists(&self, code: &LobbyCode) -> Result<bool, DomainError> {
        Ok(self.lobbies.contains_key(code))
    }

    async fn get_game(&self, id: &GameId) -> Result<Game, DomainError> {
        self.games
            .get(id)
            .map(|g| g.clone())
            .ok_or_else(|| DomainError::not_found(NotFoundKind::Game, id.to_string()))
    }

    async fn save_game(&self, game: &Game) -> Result<(), DomainError> {
        self.games.insert(game.id.clone(), game.clone());
        Ok(())
    }

    async fn delete_game(&self, id: &GameId) -> Result<(), DomainError> {
        self.games.remove(id);
        Ok(())
    }

    async fn get_board(
        &self,
        game_id: &GameId,
        player_id: &PlayerId,
    ) -> Result<Board, DomainError> {
        self.boards
            .get(&(game_id.clone(), player_id.clone()))
            .map(|b| b.clone())
            .ok_or_else(|| {
                DomainError::not_found(
                    NotFoundKind::Board,
                    format!("{game_id}/{player_id}"),
                )
            })
    }

    async fn save_board(&self, board: &Board) -> Result<(), DomainError> {
        self.boards.insert(
            (board.game_id.clone(), board.player_id.clone()),
            board.clone(),
        );
        Ok(())
    }

    async fn delete_board(
        &self,
        game_id: &GameId,
        player_id: &PlayerId,
    ) -> Result<(), DomainError> {
        self.boards.remove(&(game_id.clone(), player_id.clone()));
        Ok(())
    }

    async fn boards_for_game(&self, game_id: &GameId) -> Result<Vec<Board>, DomainError> {
        let mut boards: Vec<Board> = self
            .boards
            .iter()
            .filter(|entry| entry.key().0 == *game_id)
            .map(|entry| entry.value().clone())
            .collect();
        boards.sort_by(|a, b| a.player_id.cmp(&b.player_id));
        Ok(boards)
    }

    async fn get_dictionary_words(&self) -> Result<Vec<String>, DomainError> {
        Ok(self.dictionary.read().clone())
    }

    async fn save_dictionary_words(&self, words: &[String]) -> Result<(), DomainError> {
        *self.dictionary.write() = words.to_vec();
        Ok(())
    }
}
