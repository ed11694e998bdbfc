#![allow(dead_code)]

// tests/common/mod.rs

use std::sync::Arc;

use backend::ai::StrategyRegistry;
use backend::config::AppConfig;
use backend::domain::{Lobby, Player, Position};
use backend::infra::{Clock, FixedClock, SeededRandom};
use backend::services::{
    BoardService, BotService, DictionaryService, GameService, LobbyService, ScoringService,
};
use backend::storage::{MemStorage, Storage};
use backend::DomainError;

// Logging is auto-installed for every test binary that pulls in common
#[ctor::ctor]
fn init_logging() {
    let filter = std::env::var("TEST_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "warn".to_string());

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_test_writer()
        .without_time()
        .try_init()
        .ok();
}

/// Fully wired service graph over in-memory storage, a fixed clock, and
/// seeded randomness.
pub struct TestApp {
    pub storage: Arc<MemStorage>,
    pub clock: Arc<FixedClock>,
    pub random: Arc<SeededRandom>,
    pub dictionary: Arc<DictionaryService>,
    pub boards: Arc<BoardService>,
    pub scoring: Arc<ScoringService>,
    pub games: Arc<GameService>,
    pub lobbies: Arc<LobbyService>,
    pub bots: Arc<BotService>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_seed(42)
    }

    pub fn with_seed(seed: u64) -> Self {
        let storage = Arc::new(MemStorage::new());
        let clock = Arc::new(FixedClock::at_unix_epoch());
        let random = Arc::new(SeededRandom::seeded(seed));

        let dictionary = Arc::new(DictionaryService::new(storage.clone()));
        let boards = Arc::new(BoardService::new(storage.clone()));
        let scoring = Arc::new(ScoringService::new(dictionary.clone()));
        let games = Arc::new(GameService::new(
            storage.clone(),
            boards.clone(),
            scoring.clone(),
            clock.clone(),
            random.clone(),
        ));

        let config = AppConfig::default();
        let lobbies = Arc::new(LobbyService::new(
            storage.clone(),
            games.clone(),
            clock.clone(),
            random.clone(),
            &config,
        ));

        let registry = Arc::new(StrategyRegistry::with_defaults(random.clone()));
        let bots = Arc::new(BotService::new(
            storage.clone(),
            lobbies.clone(),
            games.clone(),
            boards.clone(),
            registry,
            clock.clone(),
            random.clone(),
        ));

        Self {
            storage,
            clock,
            random,
            dictionary,
            boards,
            scoring,
            games,
            lobbies,
            bots,
        }
    }

    /// A bot service sharing this app's services but using a custom
    /// strategy registry.
    pub fn bots_with_registry(&self, registry: StrategyRegistry) -> BotService {
        BotService::new(
            self.storage.clone(),
            self.lobbies.clone(),
            self.games.clone(),
            self.boards.clone(),
            Arc::new(registry),
            self.clock.clone(),
            self.random.clone(),
        )
    }

    /// Create and persist a human guest player.
    pub async fn guest(&self, id: &str, name: &str) -> Player {
        let player = Player::guest(id, name, self.clock.now());
        self.storage
            .save_player(&player)
            .await
            .expect("save player");
        player
    }

    /// A lobby with the given players already joined; the first id is host.
    pub async fn lobby_with_players(&self, ids: &[&str]) -> Result<Lobby, DomainError> {
        let host = self.guest(ids[0], ids[0]).await;
        let lobby = self.lobbies.create_lobby(host).await?;

        for id in &ids[1..] {
            let player = self.guest(id, id).await;
            self.lobbies.join_lobby(&lobby.code, player).await?;
        }

        self.lobbies.get_lobby(&lobby.code).await
    }

    pub fn load_dictionary(&self, words: &[&str]) {
        let owned: Vec<String> = words.iter().map(|w| w.to_string()).collect();
        self.dictionary.load_words(&owned);
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Play one full turn: the current announcer picks `letter` and every
/// roster player places it at the position produced by `pos_for`.
pub async fn play_turn(
    app: &TestApp,
    game_id: &backend::domain::GameId,
    letter: char,
    mut pos_for: impl FnMut(&backend::domain::PlayerId) -> Position,
) -> Result<(), DomainError> {
    let game = app.games.get_game(game_id).await?;
    let announcer = game
        .current_announcer()
        .expect("game has an announcer")
        .clone();
    app.games.announce_letter(game_id, &announcer, letter).await?;

    for player_id in &game.players {
        let pos = pos_for(player_id);
        app.games.place_letter(game_id, player_id, pos).await?;
    }
    Ok(())
}
