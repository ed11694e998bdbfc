//! Lobby state machine and member operations.

use std::sync::Arc;

use tracing::info;

use crate::config::AppConfig;
use crate::domain::{
    Game, GamePhase, Lobby, LobbyCode, LobbyConfig, LobbyMember, LobbyState, MemberRole, Player,
    PlayerId,
};
use crate::errors::domain::{AuthorizationKind, DomainError, PreconditionKind};
use crate::infra::{Clock, RandomSource};
use crate::services::games::GameService;
use crate::storage::Storage;

/// Characters used in lobby codes; ambiguous glyphs (I, O, 0, 1) excluded.
pub const LOBBY_CODE_ALPHABET: &str = "ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

pub struct LobbyService {
    storage: Arc<dyn Storage>,
    games: Arc<GameService>,
    clock: Arc<dyn Clock>,
    random: Arc<dyn RandomSource>,
    code_length: usize,
    default_config: LobbyConfig,
}

impl LobbyService {
    pub fn new(
        storage: Arc<dyn Storage>,
        games: Arc<GameService>,
        clock: Arc<dyn Clock>,
        random: Arc<dyn RandomSource>,
        config: &AppConfig,
    ) -> Self {
        Self {
            storage,
            games,
            clock,
            random,
            code_length: config.lobby_code_length,
            default_config: LobbyConfig {
                grid_size: config.default_grid_size,
            },
        }
    }

    /// Create a lobby with the given player as sole member and host.
    /// Random codes are drawn until an unused one is found.
    pub async fn create_lobby(&self, host: Player) -> Result<Lobby, DomainError> {
        let now = self.clock.now();

        let code = loop {
            let candidate =
                LobbyCode::new(self.random.string(self.code_length, LOBBY_CODE_ALPHABET));
            if !self.storage.lobby_exists(&candidate).await? {
                break candidate;
            }
        };

        let lobby = Lobby {
            code: code.clone(),
            state: LobbyState::Waiting,
            members: vec![LobbyMember {
                player: host,
                role: MemberRole::Player,
                is_host: true,
                joined_at: now,
            }],
            config: self.default_config,
            game_history: Vec::new(),
            current_game: None,
            created_at: now,
            updated_at: now,
        };

        self.storage.save_lobby(&lobby).await?;

        info!(lobby_code = %code, "lobby created");

        Ok(lobby)
    }

    pub async fn get_lobby(&self, code: &LobbyCode) -> Result<Lobby, DomainError> {
        self.storage.get_lobby(code).await
    }

    /// Add a player to a lobby. Joiners during a live game become
    /// spectators so the turn order is never affected.
    pub async fn join_lobby(&self, code: &LobbyCode, player: Player) -> Result<(), DomainError> {
        let mut lobby = self.storage.get_lobby(code).await?;

        if lobby.member(&player.id).is_some() {
            return Err(DomainError::precondition(
                PreconditionKind::AlreadyInLobby,
                format!("{} is already in lobby {code}", player.id),
            ));
        }

        let role = match lobby.state {
            LobbyState::Waiting => MemberRole::Player,
            LobbyState::InGame => MemberRole::Spectator,
        };

        let now = self.clock.now();
        lobby.members.push(LobbyMember {
            player,
            role,
            is_host: false,
            joined_at: now,
        });
        lobby.updated_at = now;

        self.storage.save_lobby(&lobby).await
    }

    /// Remove a member. An emptied lobby abandons any active game and is
    /// deleted; a departing host passes the role to the first remaining
    /// member; a departing game player is dropped from the game, which can
    /// advance the turn or abandon the game within this same call.
    pub async fn leave_lobby(
        &self,
        code: &LobbyCode,
        player_id: &PlayerId,
    ) -> Result<(), DomainError> {
        let mut lobby = self.storage.get_lobby(code).await?;

        let Some(member) = lobby.member(player_id) else {
            return Err(DomainError::authorization(
                AuthorizationKind::NotAMember,
                format!("{player_id} is not in lobby {code}"),
            ));
        };
        let was_host = member.is_host;
        let was_player = member.role == MemberRole::Player;

        lobby.members.retain(|m| m.player.id != *player_id);

        if lobby.members.is_empty() {
            if let Some(game_id) = &lobby.current_game {
                self.games.abandon_game(game_id).await?;
            }
            info!(lobby_code = %code, "last member left, lobby deleted");
            return self.storage.delete_lobby(code).await;
        }

        if was_host {
            lobby.members[0].is_host = true;
        }

        if was_player {
            if let Some(game_id) = lobby.current_game.clone() {
                self.games.remove_player(&game_id, player_id).await?;
                let game = self.games.get_game(&game_id).await?;
                if game.phase == GamePhase::Abandoned {
                    lobby.state = LobbyState::Waiting;
                    lobby.current_game = None;
                }
            }
        }

        lobby.updated_at = self.clock.now();
        self.storage.save_lobby(&lobby).await
    }

    /// Change a member's role. Legal only while Waiting.
    pub async fn set_role(
        &self,
        code: &LobbyCode,
        player_id: &PlayerId,
        role: MemberRole,
    ) -> Result<(), DomainError> {
        let mut lobby = self.storage.get_lobby(code).await?;

        if lobby.state == LobbyState::InGame {
            return Err(DomainError::precondition(
                PreconditionKind::GameInProgress,
                "roles cannot change during a game",
            ));
        }

        let Some(member) = lobby.member_mut(player_id) else {
            return Err(DomainError::authorization(
                AuthorizationKind::NotAMember,
                format!("{player_id} is not in lobby {code}"),
            ));
        };
        member.role = role;
        lobby.updated_at = self.clock.now();

        self.storage.save_lobby(&lobby).await
    }

    /// Make another member the host. Host authority; legal only while
    /// Waiting.
    pub async fn transfer_host(
        &self,
        code: &LobbyCode,
        requester: &PlayerId,
        new_host: &PlayerId,
    ) -> Result<(), DomainError> {
        let mut lobby = self.storage.get_lobby(code).await?;

        require_host(&lobby, requester)?;
        if lobby.state == LobbyState::InGame {
            return Err(DomainError::precondition(
                PreconditionKind::GameInProgress,
                "host cannot change during a game",
            ));
        }
        if lobby.member(new_host).is_none() {
            return Err(DomainError::authorization(
                AuthorizationKind::NotAMember,
                format!("{new_host} is not in lobby {code}"),
            ));
        }

        for member in &mut lobby.members {
            member.is_host = member.player.id == *new_host;
        }
        lobby.updated_at = self.clock.now();

        self.storage.save_lobby(&lobby).await
    }

    /// Update lobby configuration. Host authority; rejected while a game
    /// is in progress.
    pub async fn update_config(
        &self,
        code: &LobbyCode,
        requester: &PlayerId,
        config: LobbyConfig,
    ) -> Result<(), DomainError> {
        let mut lobby = self.storage.get_lobby(code).await?;

        require_host(&lobby, requester)?;
        if lobby.state == LobbyState::InGame {
            return Err(DomainError::precondition(
                PreconditionKind::GameInProgress,
                "config cannot change during a game",
            ));
        }
        if config.grid_size < 2 {
            return Err(DomainError::invalid_input(format!(
                "grid size must be at least 2, got {}",
                config.grid_size
            )));
        }

        lobby.config = config;
        lobby.updated_at = self.clock.now();

        self.storage.save_lobby(&lobby).await
    }

    /// Start a game with a snapshot of the current player-role members.
    pub async fn start_game(
        &self,
        code: &LobbyCode,
        requester: &PlayerId,
    ) -> Result<Game, DomainError> {
        let mut lobby = self.storage.get_lobby(code).await?;

        require_host(&lobby, requester)?;
        if lobby.state == LobbyState::InGame {
            return Err(DomainError::precondition(
                PreconditionKind::GameInProgress,
                "a game is already in progress",
            ));
        }

        let players: Vec<PlayerId> = lobby.players().map(|m| m.player.id.clone()).collect();
        if players.is_empty() {
            return Err(DomainError::precondition(
                PreconditionKind::InsufficientPlayers,
                "at least one player-role member is required",
            ));
        }

        let game = self
            .games
            .create_game(code, players, lobby.config.grid_size)
            .await?;

        lobby.state = LobbyState::InGame;
        lobby.current_game = Some(game.id.clone());
        lobby.updated_at = self.clock.now();
        self.storage.save_lobby(&lobby).await?;

        info!(lobby_code = %code, game_id = %game.id, "game started");

        Ok(game)
    }

    /// Abandon the active game and return to Waiting. Host authority.
    pub async fn abandon_game(
        &self,
        code: &LobbyCode,
        requester: &PlayerId,
    ) -> Result<(), DomainError> {
        let mut lobby = self.storage.get_lobby(code).await?;

        require_host(&lobby, requester)?;
        let Some(game_id) = lobby.current_game.clone() else {
            return Err(DomainError::precondition(
                PreconditionKind::NoGameInProgress,
                "no game to abandon",
            ));
        };

        self.games.abandon_game(&game_id).await?;

        lobby.state = LobbyState::Waiting;
        lobby.current_game = None;
        lobby.updated_at = self.clock.now();

        self.storage.save_lobby(&lobby).await
    }

    /// Record the completed game in lobby history and return to Waiting.
    /// Host authority.
    pub async fn complete_game(
        &self,
        code: &LobbyCode,
        requester: &PlayerId,
    ) -> Result<(), DomainError> {
        let mut lobby = self.storage.get_lobby(code).await?;

        require_host(&lobby, requester)?;
        let Some(game_id) = lobby.current_game.clone() else {
            return Err(DomainError::precondition(
                PreconditionKind::NoGameInProgress,
                "no game to complete",
            ));
        };

        let summary = self.games.create_game_summary(&game_id).await?;

        lobby.game_history.push(summary);
        lobby.state = LobbyState::Waiting;
        lobby.current_game = None;
        lobby.updated_at = self.clock.now();

        self.storage.save_lobby(&lobby).await
    }
}

fn require_host(lobby: &Lobby, requester: &PlayerId) -> Result<(), DomainError> {
    if lobby.is_host(requester) {
        Ok(())
    } else {
        Err(DomainError::authorization(
            AuthorizationKind::NotHost,
            format!("{requester} is not the host of {}", lobby.code),
        ))
    }
}
