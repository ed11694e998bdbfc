//! Bot players and the automation loop that drives their moves.

use std::sync::Arc;

use tracing::info;

use crate::ai::StrategyRegistry;
use crate::domain::{GameId, GamePhase, LobbyCode, LobbyState, Player, PlayerId, Position};
use crate::errors::domain::{AuthorizationKind, DomainError, PreconditionKind};
use crate::infra::{Clock, RandomSource};
use crate::services::boards::BoardService;
use crate::services::games::GameService;
use crate::services::lobbies::LobbyService;
use crate::storage::Storage;

/// Character set for generated bot player ids.
const PLAYER_ID_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz0123456789";
/// Length of generated bot player ids.
const PLAYER_ID_LENGTH: usize = 16;
/// Hard ceiling on the automation loop, guaranteeing termination
/// regardless of strategy behavior.
const MAX_BOT_ITERATIONS: usize = 1000;

/// One action taken during a bot-loop run. `TurnComplete` and
/// `GameComplete` are synthetic markers so callers can broadcast the
/// matching events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotAction {
    Announce { player_id: PlayerId, letter: char },
    Place { player_id: PlayerId, position: Position },
    TurnComplete,
    GameComplete,
}

/// Outcome of a bot-loop run: every action taken before the loop stopped,
/// plus the error that stopped it early, if any. A rejected move is never
/// retried with a different choice.
#[derive(Debug)]
pub struct BotRun {
    pub actions: Vec<BotAction>,
    pub error: Option<DomainError>,
}

pub struct BotService {
    storage: Arc<dyn Storage>,
    lobbies: Arc<LobbyService>,
    games: Arc<GameService>,
    boards: Arc<BoardService>,
    registry: Arc<StrategyRegistry>,
    clock: Arc<dyn Clock>,
    random: Arc<dyn RandomSource>,
}

impl BotService {
    pub fn new(
        storage: Arc<dyn Storage>,
        lobbies: Arc<LobbyService>,
        games: Arc<GameService>,
        boards: Arc<BoardService>,
        registry: Arc<StrategyRegistry>,
        clock: Arc<dyn Clock>,
        random: Arc<dyn RandomSource>,
    ) -> Self {
        Self {
            storage,
            lobbies,
            games,
            boards,
            registry,
            clock,
            random,
        }
    }

    /// Create and persist a new bot player with the given strategy tag.
    pub async fn create_bot_player(
        &self,
        display_name: impl Into<String>,
        strategy: &str,
    ) -> Result<Player, DomainError> {
        let player = Player {
            id: PlayerId::new(format!(
                "bot-{}",
                self.random.string(PLAYER_ID_LENGTH, PLAYER_ID_ALPHABET)
            )),
            display_name: display_name.into(),
            is_guest: true,
            is_bot: true,
            bot_strategy: Some(strategy.to_string()),
            created_at: self.clock.now(),
        };

        self.storage.save_player(&player).await?;
        Ok(player)
    }

    /// Create a bot and add it to the lobby. Host authority; only while
    /// Waiting; the strategy name must be registered.
    pub async fn add_bot_to_lobby(
        &self,
        code: &LobbyCode,
        requester: &PlayerId,
        strategy: &str,
    ) -> Result<Player, DomainError> {
        if !self.registry.contains(strategy) {
            return Err(DomainError::invalid_input(format!(
                "unknown bot strategy: {strategy}"
            )));
        }

        let lobby = self.lobbies.get_lobby(code).await?;

        if !lobby.is_host(requester) {
            return Err(DomainError::authorization(
                AuthorizationKind::NotHost,
                format!("{requester} is not the host of {code}"),
            ));
        }
        if lobby.state == LobbyState::InGame {
            return Err(DomainError::precondition(
                PreconditionKind::GameInProgress,
                "bots cannot be added during a game",
            ));
        }

        let bot_count = lobby.members.iter().filter(|m| m.player.is_bot).count();
        let display_name = format!("Bot {}", bot_count + 1);

        let bot = self.create_bot_player(display_name.clone(), strategy).await?;
        self.lobbies.join_lobby(code, bot.clone()).await?;

        info!(lobby_code = %code, bot_id = %bot.id, bot_name = %display_name, "bot added to lobby");

        Ok(bot)
    }

    /// Remove a bot from the lobby. Host authority; only while Waiting;
    /// the target must actually be a bot.
    pub async fn remove_bot_from_lobby(
        &self,
        code: &LobbyCode,
        requester: &PlayerId,
        bot_id: &PlayerId,
    ) -> Result<(), DomainError> {
        let lobby = self.lobbies.get_lobby(code).await?;

        if !lobby.is_host(requester) {
            return Err(DomainError::authorization(
                AuthorizationKind::NotHost,
                format!("{requester} is not the host of {code}"),
            ));
        }
        if lobby.state == LobbyState::InGame {
            return Err(DomainError::precondition(
                PreconditionKind::GameInProgress,
                "bots cannot be removed during a game",
            ));
        }

        let Some(member) = lobby.member(bot_id) else {
            return Err(DomainError::authorization(
                AuthorizationKind::NotAMember,
                format!("{bot_id} is not in lobby {code}"),
            ));
        };
        if !member.player.is_bot {
            return Err(DomainError::authorization(
                AuthorizationKind::NotABot,
                format!("{bot_id} is not a bot"),
            ));
        }

        self.lobbies.leave_lobby(code, bot_id).await
    }

    /// Drive every pending bot move for a game until a human is required
    /// or the game reaches a terminal phase.
    ///
    /// Each pass re-reads the game as the sole source of truth, so a
    /// single trigger per human action lets an all-bot or mixed game
    /// self-drive to completion. Any propagated error is a hard stop with
    /// the actions already taken preserved in the result.
    pub async fn process_bot_actions(&self, game_id: &GameId) -> BotRun {
        let mut actions = Vec::new();
        let error = self.run_loop(game_id, &mut actions).await.err();
        BotRun { actions, error }
    }

    async fn run_loop(
        &self,
        game_id: &GameId,
        actions: &mut Vec<BotAction>,
    ) -> Result<(), DomainError> {
        for _ in 0..MAX_BOT_ITERATIONS {
            let game = self.games.get_game(game_id).await?;

            match game.phase {
                GamePhase::Scoring | GamePhase::Abandoned => {
                    if game.phase == GamePhase::Scoring && !actions.is_empty() {
                        actions.push(BotAction::GameComplete);
                    }
                    return Ok(());
                }

                GamePhase::Announcing => {
                    let Some(announcer_id) = game.current_announcer().cloned() else {
                        return Ok(());
                    };
                    let announcer = self.storage.get_player(&announcer_id).await?;
                    if !announcer.is_bot {
                        // Human's turn to announce.
                        return Ok(());
                    }

                    let strategy = self.strategy_for(&announcer)?;
                    let letter = strategy.choose_letter(&game);
                    self.games
                        .announce_letter(game_id, &announcer_id, letter)
                        .await?;
                    actions.push(BotAction::Announce {
                        player_id: announcer_id,
                        letter,
                    });
                }

                GamePhase::Placing => {
                    let mut any_bot_placed = false;
                    for player_id in &game.players {
                        if game.has_placed(player_id) {
                            continue;
                        }
                        let player = self.storage.get_player(player_id).await?;
                        if !player.is_bot {
                            continue;
                        }

                        let board = self.boards.get_board(game_id, player_id).await?;
                        let strategy = self.strategy_for(&player)?;
                        let position = strategy.choose_position(&game, &board);
                        self.games.place_letter(game_id, player_id, position).await?;
                        actions.push(BotAction::Place {
                            player_id: player_id.clone(),
                            position,
                        });
                        any_bot_placed = true;
                    }

                    if !any_bot_placed {
                        // Only humans left to place.
                        return Ok(());
                    }

                    // Re-read to see whether the turn advanced.
                    let game = self.games.get_game(game_id).await?;
                    match game.phase {
                        GamePhase::Scoring => {
                            actions.push(BotAction::GameComplete);
                            return Ok(());
                        }
                        GamePhase::Announcing => actions.push(BotAction::TurnComplete),
                        _ => {}
                    }
                }
            }
        }

        Ok(())
    }

    fn strategy_for(
        &self,
        player: &Player,
    ) -> Result<Arc<dyn crate::ai::Strategy>, DomainError> {
        self.registry
            .for_player(player)
            .ok_or_else(|| DomainError::invalid_input("no bot strategies registered"))
    }
}
