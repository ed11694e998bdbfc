mod common;

use backend::ai::{Strategy, StrategyRegistry};
use backend::domain::{Board, Game, GamePhase, Position};
use backend::errors::domain::{AuthorizationKind, PreconditionKind};
use backend::services::BotAction;
use backend::DomainError;
use common::TestApp;

#[tokio::test]
async fn games_without_bots_produce_no_actions() -> Result<(), DomainError> {
    let app = TestApp::new();
    let game = app
        .games
        .create_game(&"LOBBY1".into(), vec![app.guest("alice", "Alice").await.id], 2)
        .await?;

    let run = app.bots.process_bot_actions(&game.id).await;

    assert!(run.actions.is_empty());
    assert!(run.error.is_none());
    assert_eq!(
        app.games.get_game(&game.id).await?.phase,
        GamePhase::Announcing
    );
    Ok(())
}

#[tokio::test]
async fn all_bot_games_self_drive_to_completion() -> Result<(), DomainError> {
    let app = TestApp::new();
    let bot_a = app.bots.create_bot_player("Bot 1", "random").await?;
    let bot_b = app.bots.create_bot_player("Bot 2", "random").await?;
    let game = app
        .games
        .create_game(&"LOBBY1".into(), vec![bot_a.id, bot_b.id], 2)
        .await?;

    let run = app.bots.process_bot_actions(&game.id).await;
    assert!(run.error.is_none(), "bot loop failed: {:?}", run.error);

    let game = app.games.get_game(&game.id).await?;
    assert_eq!(game.phase, GamePhase::Scoring);

    // 4 turns of one announcement and two placements, three turn
    // boundaries, one completion marker
    let announces = run
        .actions
        .iter()
        .filter(|a| matches!(a, BotAction::Announce { .. }))
        .count();
    let places = run
        .actions
        .iter()
        .filter(|a| matches!(a, BotAction::Place { .. }))
        .count();
    assert_eq!(announces, 4);
    assert_eq!(places, 8);
    assert_eq!(
        run.actions
            .iter()
            .filter(|a| **a == BotAction::TurnComplete)
            .count(),
        3
    );
    assert_eq!(run.actions.last(), Some(&BotAction::GameComplete));

    let boards = app.boards.boards_for_game(&game.id).await?;
    assert!(boards.iter().all(Board::is_full));
    Ok(())
}

#[tokio::test]
async fn bot_loop_stops_when_a_human_must_act() -> Result<(), DomainError> {
    let app = TestApp::new();
    let human = app.guest("alice", "Alice").await;
    let bot = app.bots.create_bot_player("Bot 1", "random").await?;
    let game = app
        .games
        .create_game(&"LOBBY1".into(), vec![human.id.clone(), bot.id.clone()], 2)
        .await?;

    // The human announces first, so the loop has nothing to do yet
    let run = app.bots.process_bot_actions(&game.id).await;
    assert!(run.actions.is_empty());
    assert!(run.error.is_none());

    app.games.announce_letter(&game.id, &human.id, 'A').await?;

    // Now the bot places, then waits for the human
    let run = app.bots.process_bot_actions(&game.id).await;
    assert!(run.error.is_none());
    assert_eq!(run.actions.len(), 1);
    assert!(matches!(
        run.actions[0],
        BotAction::Place { ref player_id, .. } if *player_id == bot.id
    ));

    let game = app.games.get_game(&game.id).await?;
    assert_eq!(game.phase, GamePhase::Placing);
    assert!(game.has_placed(&bot.id));
    assert!(!game.has_placed(&human.id));
    Ok(())
}

#[tokio::test]
async fn human_placement_triggers_the_next_bot_announcement() -> Result<(), DomainError> {
    let app = TestApp::new();
    let human = app.guest("alice", "Alice").await;
    let bot = app.bots.create_bot_player("Bot 1", "random").await?;
    // Bot first in the roster, so it announces turn 0
    let game = app
        .games
        .create_game(&"LOBBY1".into(), vec![bot.id.clone(), human.id.clone()], 2)
        .await?;

    let run = app.bots.process_bot_actions(&game.id).await;
    assert!(run.error.is_none());
    assert!(matches!(run.actions[0], BotAction::Announce { .. }));
    assert!(matches!(run.actions[1], BotAction::Place { .. }));
    assert_eq!(run.actions.len(), 2);

    let game_state = app.games.get_game(&game.id).await?;
    let letter = game_state.current_letter.expect("letter announced");
    assert!(letter.is_ascii_uppercase());
    app.games
        .place_letter(&game.id, &human.id, Position::new(0, 0))
        .await?;

    // The turn advanced to the human announcer, so the loop idles
    let run = app.bots.process_bot_actions(&game.id).await;
    assert!(run.actions.is_empty());
    assert!(run.error.is_none());

    // Once the human announces, the loop places for the bot and waits
    app.games.announce_letter(&game.id, &human.id, 'B').await?;
    let run = app.bots.process_bot_actions(&game.id).await;
    assert!(run.error.is_none());
    assert_eq!(run.actions.len(), 1);
    assert!(matches!(run.actions[0], BotAction::Place { .. }));
    assert_eq!(
        app.games.get_game(&game.id).await?.phase,
        GamePhase::Placing
    );
    Ok(())
}

/// Strategy that always picks the same cell, to exercise error handling.
struct StuckStrategy;

impl Strategy for StuckStrategy {
    fn choose_letter(&self, _game: &Game) -> char {
        'A'
    }

    fn choose_position(&self, _game: &Game, _board: &Board) -> Position {
        Position::new(0, 0)
    }
}

#[tokio::test]
async fn a_rejected_bot_move_stops_the_loop_with_partial_actions() -> Result<(), DomainError> {
    let app = TestApp::new();
    let mut registry = StrategyRegistry::new();
    registry.register("stuck", std::sync::Arc::new(StuckStrategy));
    let bots = app.bots_with_registry(registry);

    let bot = bots.create_bot_player("Bot 1", "stuck").await?;
    let game = app
        .games
        .create_game(&"LOBBY1".into(), vec![bot.id], 2)
        .await?;

    let run = bots.process_bot_actions(&game.id).await;

    // Turn 0 succeeds at (0, 0); turn 1 announces, then placement is
    // rejected on the occupied cell
    assert_eq!(
        run.error.as_ref().and_then(DomainError::precondition_kind),
        Some(PreconditionKind::CellOccupied)
    );
    assert_eq!(run.actions.len(), 4);
    assert!(matches!(run.actions[0], BotAction::Announce { .. }));
    assert!(matches!(run.actions[1], BotAction::Place { .. }));
    assert_eq!(run.actions[2], BotAction::TurnComplete);
    assert!(matches!(run.actions[3], BotAction::Announce { .. }));

    let game = app.games.get_game(&game.id).await?;
    assert_eq!(game.phase, GamePhase::Placing);
    Ok(())
}

#[tokio::test]
async fn adding_bots_requires_host_authority_and_a_known_strategy() -> Result<(), DomainError> {
    let app = TestApp::new();
    let lobby = app.lobby_with_players(&["alice", "bob"]).await?;

    let err = app
        .bots
        .add_bot_to_lobby(&lobby.code, &"alice".into(), "nonsense")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidInput(_)));

    let err = app
        .bots
        .add_bot_to_lobby(&lobby.code, &"bob".into(), "random")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::AuthorizationFailed(AuthorizationKind::NotHost, _)
    ));

    let first = app
        .bots
        .add_bot_to_lobby(&lobby.code, &"alice".into(), "random")
        .await?;
    let second = app
        .bots
        .add_bot_to_lobby(&lobby.code, &"alice".into(), "random")
        .await?;
    assert_eq!(first.display_name, "Bot 1");
    assert_eq!(second.display_name, "Bot 2");
    assert!(first.is_bot);
    assert!(first.id.as_str().starts_with("bot-"));

    let lobby = app.lobbies.get_lobby(&lobby.code).await?;
    assert_eq!(lobby.members.len(), 4);
    Ok(())
}

#[tokio::test]
async fn bots_cannot_be_added_or_removed_mid_game() -> Result<(), DomainError> {
    let app = TestApp::new();
    let lobby = app.lobby_with_players(&["alice"]).await?;
    let bot = app
        .bots
        .add_bot_to_lobby(&lobby.code, &"alice".into(), "random")
        .await?;
    app.lobbies.start_game(&lobby.code, &"alice".into()).await?;

    let err = app
        .bots
        .add_bot_to_lobby(&lobby.code, &"alice".into(), "random")
        .await
        .unwrap_err();
    assert_eq!(err.precondition_kind(), Some(PreconditionKind::GameInProgress));

    let err = app
        .bots
        .remove_bot_from_lobby(&lobby.code, &"alice".into(), &bot.id)
        .await
        .unwrap_err();
    assert_eq!(err.precondition_kind(), Some(PreconditionKind::GameInProgress));
    Ok(())
}

#[tokio::test]
async fn only_bots_can_be_removed_as_bots() -> Result<(), DomainError> {
    let app = TestApp::new();
    let lobby = app.lobby_with_players(&["alice", "bob"]).await?;
    let bot = app
        .bots
        .add_bot_to_lobby(&lobby.code, &"alice".into(), "random")
        .await?;

    let err = app
        .bots
        .remove_bot_from_lobby(&lobby.code, &"alice".into(), &"bob".into())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::AuthorizationFailed(AuthorizationKind::NotABot, _)
    ));

    app.bots
        .remove_bot_from_lobby(&lobby.code, &"alice".into(), &bot.id)
        .await?;
    let lobby = app.lobbies.get_lobby(&lobby.code).await?;
    assert!(lobby.member(&bot.id).is_none());
    Ok(())
}
