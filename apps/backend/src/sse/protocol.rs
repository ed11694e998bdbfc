//! SSE wire format: named text frames with prefixed data lines.

use serde_json::json;

use crate::domain::{GameId, PlayerId};

/// Reconnect hint sent once per connection.
pub const RETRY_HINT: &str = "retry: 3000\n\n";

/// Comment frame sent on the keep-alive interval.
pub const KEEPALIVE_FRAME: &str = ": keepalive\n\n";

/// Render a frame: `event:` line, one `data:` line per payload line, blank
/// terminator. CRs are stripped; an empty payload still gets one data line.
pub fn format_frame(event: &str, data: &str) -> String {
    let mut frame = String::with_capacity(event.len() + data.len() + 16);
    frame.push_str("event: ");
    frame.push_str(event);
    frame.push('\n');

    // split always yields at least one item, so an empty payload still
    // produces one empty data line
    for line in data.split('\n') {
        frame.push_str("data: ");
        frame.push_str(line.trim_end_matches('\r'));
        frame.push('\n');
    }

    frame.push('\n');
    frame
}

/// Frame announcing a freshly established stream.
pub fn connected_frame() -> String {
    format_frame("connected", "{\"status\":\"connected\"}")
}

/// Events broadcast to a lobby's subscribers. The payloads carry enough
/// for a viewer to update incrementally; `Refresh` asks it to re-fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerEvent {
    MemberUpdate {
        members: Vec<PlayerId>,
    },
    GameStarted {
        game_id: GameId,
    },
    LetterAnnounced {
        announcer: PlayerId,
        letter: char,
    },
    PlacementUpdate {
        placed: usize,
        total: usize,
    },
    TurnComplete {
        turn: usize,
    },
    GameComplete {
        game_id: GameId,
    },
    GameAbandoned {
        game_id: GameId,
    },
    Refresh,
}

impl ServerEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::MemberUpdate { .. } => "member-update",
            Self::GameStarted { .. } => "game-started",
            Self::LetterAnnounced { .. } => "letter-announced",
            Self::PlacementUpdate { .. } => "placement-update",
            Self::TurnComplete { .. } => "turn-complete",
            Self::GameComplete { .. } => "game-complete",
            Self::GameAbandoned { .. } => "game-abandoned",
            Self::Refresh => "refresh",
        }
    }

    pub fn data(&self) -> String {
        match self {
            Self::MemberUpdate { members } => json!({ "members": members }).to_string(),
            Self::GameStarted { game_id } => json!({ "game_id": game_id }).to_string(),
            Self::LetterAnnounced { announcer, letter } => {
                json!({ "announcer": announcer, "letter": letter.to_string() }).to_string()
            }
            Self::PlacementUpdate { placed, total } => {
                json!({ "placed": placed, "total": total }).to_string()
            }
            Self::TurnComplete { turn } => json!({ "turn": turn }).to_string(),
            Self::GameComplete { game_id } => json!({ "game_id": game_id }).to_string(),
            Self::GameAbandoned { game_id } => json!({ "game_id": game_id }).to_string(),
            Self::Refresh => "refresh".to_string(),
        }
    }

    /// The complete wire frame for this event.
    pub fn frame(&self) -> String {
        format_frame(self.name(), &self.data())
    }
}
