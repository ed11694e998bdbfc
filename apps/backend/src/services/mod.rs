//! Service layer: the state machines and their supporting services.

pub mod boards;
pub mod bots;
pub mod dictionary;
pub mod games;
pub mod lobbies;
pub mod scoring;

pub use boards::BoardService;
pub use bots::{BotAction, BotRun, BotService};
pub use dictionary::DictionaryService;
pub use games::GameService;
pub use lobbies::LobbyService;
pub use scoring::ScoringService;
