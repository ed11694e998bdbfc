use std::collections::HashSet;

use time::OffsetDateTime;

use crate::domain::game::{Game, GameId, GamePhase};
use crate::domain::lobby::LobbyCode;
use crate::domain::player::PlayerId;

fn game(players: &[&str], grid_size: usize) -> Game {
    let now = OffsetDateTime::UNIX_EPOCH;
    Game {
        id: GameId::from("g1"),
        lobby_code: LobbyCode::from("ABC123"),
        phase: GamePhase::Announcing,
        grid_size,
        players: players.iter().map(|p| PlayerId::from(*p)).collect(),
        current_turn: 0,
        announcer_idx: 0,
        current_letter: None,
        placements: HashSet::new(),
        turn_started_at: now,
        created_at: now,
        updated_at: now,
    }
}

#[test]
fn total_turns_is_grid_squared() {
    assert_eq!(game(&["a"], 5).total_turns(), 25);
    assert_eq!(game(&["a"], 3).total_turns(), 9);
}

#[test]
fn completion_tracks_current_turn() {
    let mut g = game(&["a"], 2);
    assert!(!g.is_complete());
    g.current_turn = 4;
    assert!(g.is_complete());
}

#[test]
fn current_announcer_follows_index() {
    let mut g = game(&["a", "b", "c"], 5);
    assert_eq!(g.current_announcer(), Some(&PlayerId::from("a")));
    g.announcer_idx = 2;
    assert_eq!(g.current_announcer(), Some(&PlayerId::from("c")));
    g.players.clear();
    assert_eq!(g.current_announcer(), None);
}

#[test]
fn all_players_placed_requires_full_roster() {
    let mut g = game(&["a", "b"], 5);
    assert!(!g.all_players_placed());
    g.placements.insert(PlayerId::from("a"));
    assert!(!g.all_players_placed());
    g.placements.insert(PlayerId::from("b"));
    assert!(g.all_players_placed());
}

#[test]
fn terminal_phases() {
    assert!(GamePhase::Scoring.is_terminal());
    assert!(GamePhase::Abandoned.is_terminal());
    assert!(!GamePhase::Announcing.is_terminal());
    assert!(!GamePhase::Placing.is_terminal());
}
