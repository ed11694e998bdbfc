//! Game (turn) state machine.
//!
//! Phases: Announcing -> Placing -> Announcing(next) -> ... -> Scoring,
//! with Abandoned reachable from either active phase. Every mutating call
//! loads the aggregate, fully validates, and saves once; invalid
//! preconditions are no-op-with-error.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use tracing::info;

use crate::domain::{Board, BoardScore, Game, GameId, GamePhase, GameSummary, LobbyCode, PlayerId, Position};
use crate::errors::domain::{AuthorizationKind, DomainError, PreconditionKind};
use crate::infra::{Clock, RandomSource};
use crate::services::boards::{self, BoardService};
use crate::services::scoring::ScoringService;
use crate::storage::Storage;

/// Length of generated game ids.
const GAME_ID_LENGTH: usize = 12;
/// Alphabet for generated game ids.
const GAME_ID_ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

pub struct GameService {
    storage: Arc<dyn Storage>,
    boards: Arc<BoardService>,
    scoring: Arc<ScoringService>,
    clock: Arc<dyn Clock>,
    random: Arc<dyn RandomSource>,
}

impl GameService {
    pub fn new(
        storage: Arc<dyn Storage>,
        boards: Arc<BoardService>,
        scoring: Arc<ScoringService>,
        clock: Arc<dyn Clock>,
        random: Arc<dyn RandomSource>,
    ) -> Self {
        Self {
            storage,
            boards,
            scoring,
            clock,
            random,
        }
    }

    /// Start a new game with a snapshot of the given players, creating one
    /// empty board per player.
    pub async fn create_game(
        &self,
        lobby_code: &LobbyCode,
        players: Vec<PlayerId>,
        grid_size: usize,
    ) -> Result<Game, DomainError> {
        if players.is_empty() {
            return Err(DomainError::precondition(
                PreconditionKind::InsufficientPlayers,
                "cannot create a game with no players",
            ));
        }

        let now = self.clock.now();
        let id = GameId::new(self.random.string(GAME_ID_LENGTH, GAME_ID_ALPHABET));

        let game = Game {
            id: id.clone(),
            lobby_code: lobby_code.clone(),
            phase: GamePhase::Announcing,
            grid_size,
            players: players.clone(),
            current_turn: 0,
            announcer_idx: 0,
            current_letter: None,
            placements: HashSet::new(),
            turn_started_at: now,
            created_at: now,
            updated_at: now,
        };

        for player_id in &players {
            self.boards.create_board(&id, player_id, grid_size).await?;
        }

        self.storage.save_game(&game).await?;

        info!(
            game_id = %id,
            lobby_code = %lobby_code,
            player_count = players.len(),
            grid_size,
            "game created"
        );

        Ok(game)
    }

    pub async fn get_game(&self, game_id: &GameId) -> Result<Game, DomainError> {
        self.storage.get_game(game_id).await
    }

    /// The announcer picks the letter for this turn. Legal only in the
    /// Announcing phase, only for the current announcer, and only with an
    /// alphabetic character. The letter is stored upper-cased.
    pub async fn announce_letter(
        &self,
        game_id: &GameId,
        player_id: &PlayerId,
        letter: char,
    ) -> Result<(), DomainError> {
        let mut game = self.storage.get_game(game_id).await?;

        require_active(&game)?;
        if game.phase != GamePhase::Announcing {
            return Err(DomainError::precondition(
                PreconditionKind::NotPlayerTurn,
                "a letter has already been announced this turn",
            ));
        }
        if game.current_announcer() != Some(player_id) {
            return Err(DomainError::precondition(
                PreconditionKind::NotPlayerTurn,
                format!("{player_id} is not the current announcer"),
            ));
        }
        boards::validate_letter(letter)?;

        game.current_letter = Some(letter.to_ascii_uppercase());
        game.phase = GamePhase::Placing;
        game.placements.clear();
        game.updated_at = self.clock.now();

        self.storage.save_game(&game).await
    }

    /// A player places the announced letter on their own board. When the
    /// full roster has placed, the turn advances synchronously; this is
    /// the sole liveness mechanism, no scheduler drives turns.
    pub async fn place_letter(
        &self,
        game_id: &GameId,
        player_id: &PlayerId,
        pos: Position,
    ) -> Result<(), DomainError> {
        let mut game = self.storage.get_game(game_id).await?;

        require_active(&game)?;
        if game.phase != GamePhase::Placing {
            return Err(DomainError::precondition(
                PreconditionKind::LetterNotAnnounced,
                "no letter has been announced yet",
            ));
        }
        if !game.is_in_roster(player_id) {
            return Err(DomainError::authorization(
                AuthorizationKind::NotAMember,
                format!("{player_id} is not in this game"),
            ));
        }
        if game.has_placed(player_id) {
            return Err(DomainError::precondition(
                PreconditionKind::AlreadyPlaced,
                format!("{player_id} already placed this turn"),
            ));
        }

        let letter = game.current_letter.ok_or_else(|| {
            DomainError::precondition(
                PreconditionKind::LetterNotAnnounced,
                "no letter has been announced yet",
            )
        })?;

        let mut board = self.boards.get_board(game_id, player_id).await?;
        self.boards.place_letter(&mut board, letter, pos).await?;

        game.placements.insert(player_id.clone());
        game.updated_at = self.clock.now();

        if game.all_players_placed() {
            self.advance_turn(&mut game);
        }
        self.storage.save_game(&game).await
    }

    /// Move to the next turn, or to Scoring once every cell is filled.
    fn advance_turn(&self, game: &mut Game) {
        game.current_turn += 1;

        if game.current_turn >= game.total_turns() {
            game.phase = GamePhase::Scoring;
            info!(
                game_id = %game.id,
                lobby_code = %game.lobby_code,
                total_turns = game.current_turn,
                "game completed"
            );
        } else {
            game.announcer_idx = (game.announcer_idx + 1) % game.players.len();
            game.phase = GamePhase::Announcing;
            game.current_letter = None;
            game.placements.clear();
            game.turn_started_at = self.clock.now();
        }

        game.updated_at = self.clock.now();
    }

    /// End a game prematurely. Calling on an already-terminal game is a
    /// deliberate idempotent no-op.
    pub async fn abandon_game(&self, game_id: &GameId) -> Result<(), DomainError> {
        let mut game = self.storage.get_game(game_id).await?;

        if game.phase.is_terminal() {
            return Ok(());
        }

        game.phase = GamePhase::Abandoned;
        game.updated_at = self.clock.now();

        info!(game_id = %game_id, lobby_code = %game.lobby_code, "game abandoned");

        self.storage.save_game(&game).await
    }

    /// Drop a player from the roster mid-game. Idempotent for terminal
    /// games and unknown players. An emptied roster abandons the game;
    /// otherwise the announcer index is clamped, and a drop that leaves
    /// the turn fully satisfied advances it.
    pub async fn remove_player(
        &self,
        game_id: &GameId,
        player_id: &PlayerId,
    ) -> Result<(), DomainError> {
        let mut game = self.storage.get_game(game_id).await?;

        if game.phase.is_terminal() {
            return Ok(());
        }

        let Some(idx) = game.players.iter().position(|p| p == player_id) else {
            return Ok(());
        };
        game.players.remove(idx);

        if game.players.is_empty() {
            game.phase = GamePhase::Abandoned;
            game.updated_at = self.clock.now();
            info!(game_id = %game_id, "last player removed, game abandoned");
            return self.storage.save_game(&game).await;
        }

        if game.announcer_idx >= game.players.len() {
            game.announcer_idx = 0;
        }

        if game.phase == GamePhase::Placing {
            game.placements.remove(player_id);
            if game.all_players_placed() {
                self.advance_turn(&mut game);
                return self.storage.save_game(&game).await;
            }
        }

        game.updated_at = self.clock.now();
        self.storage.save_game(&game).await
    }

    /// Final scores for a game in the Scoring phase, sorted descending.
    pub async fn final_scores(&self, game_id: &GameId) -> Result<Vec<BoardScore>, DomainError> {
        let game = self.storage.get_game(game_id).await?;

        if game.phase != GamePhase::Scoring {
            return Err(DomainError::precondition(
                PreconditionKind::GameNotComplete,
                "scores are only available once all turns are played",
            ));
        }

        let boards: Vec<Board> = self.boards.boards_for_game(game_id).await?;
        Ok(self.scoring.score_boards(&boards))
    }

    /// Summary record for a completed game: final totals plus the unique
    /// winner, absent on any tie.
    pub async fn create_game_summary(
        &self,
        game_id: &GameId,
    ) -> Result<GameSummary, DomainError> {
        let scores = self.final_scores(game_id).await?;

        let final_scores: BTreeMap<PlayerId, u32> = scores
            .iter()
            .map(|s| (s.player_id.clone(), s.total))
            .collect();

        Ok(GameSummary {
            id: game_id.clone(),
            final_scores,
            winner: self.scoring.determine_winner(&scores),
            completed_at: self.clock.now(),
        })
    }
}

fn require_active(game: &Game) -> Result<(), DomainError> {
    match game.phase {
        GamePhase::Scoring => Err(DomainError::precondition(
            PreconditionKind::GameComplete,
            "game is already complete",
        )),
        GamePhase::Abandoned => Err(DomainError::precondition(
            PreconditionKind::GameAbandoned,
            "game has been abandoned",
        )),
        _ => Ok(()),
    }
}
