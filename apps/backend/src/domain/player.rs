use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Opaque player identifier, unique across the system.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for PlayerId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A game participant. Immutable after creation except for bot metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    pub display_name: String,
    /// True for unregistered players
    pub is_guest: bool,
    /// True for synthetic players driven by a strategy
    pub is_bot: bool,
    /// Registry name of the bot's strategy; None for humans
    pub bot_strategy: Option<String>,
    pub created_at: OffsetDateTime,
}

impl Player {
    /// A human guest player.
    pub fn guest(id: impl Into<PlayerId>, display_name: impl Into<String>, now: OffsetDateTime) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            is_guest: true,
            is_bot: false,
            bot_strategy: None,
            created_at: now,
        }
    }
}
