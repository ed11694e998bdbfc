//! Domain layer: aggregates and pure game types.

pub mod board;
pub mod game;
pub mod lobby;
pub mod player;

pub use board::{Board, BoardScore, Position, WordMatch};
pub use game::{Game, GameId, GamePhase, GameSummary};
pub use lobby::{Lobby, LobbyCode, LobbyConfig, LobbyMember, LobbyState, MemberRole};
pub use player::{Player, PlayerId};

#[cfg(test)]
mod tests_board;
#[cfg(test)]
mod tests_game;
