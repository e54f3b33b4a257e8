//! Skip votes against a queue's rotation and against a live game.

use rotation_core::commands;
use rotation_core::domain::votes::VoteKind;
use rotation_core::entities::in_progress_games;
use rotation_core::entities::rotation_map_history::PointerChangeReason;
use rotation_core::{AppError, ErrorCode, SkipScope, Voter};
use rotation_test_support::unique_helpers::{unique_id, unique_str};
use sea_orm::EntityTrait;

use crate::support::factory::{seed_game, seed_queue, seed_rotation, voter};
use crate::support::test_state::build_test_state;

fn queue_scope(name: &str) -> SkipScope {
    SkipScope::Queue {
        queue_name: name.to_string(),
    }
}

#[tokio::test]
async fn queue_skip_advances_rotation_at_threshold() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let fx = seed_rotation(&state, 3).await?;
    let queue = seed_queue(&state, fx.name(), 4, Some(2)).await?;
    let [a, b] = [voter(), voter()];

    let first = commands::cast_skip_vote(&state, a, queue_scope(&queue.name)).await?;
    assert_eq!(first.kind, VoteKind::Skip);
    assert_eq!(first.tally, 1);
    assert!(!first.threshold_reached());

    let err = commands::cast_skip_vote(&state, a, queue_scope(&queue.name))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::AlreadyVoted);

    let outcome = commands::cast_skip_vote(&state, b, queue_scope(&queue.name)).await?;
    let passed = outcome.resolution.expect("skip should pass");
    assert_eq!(
        passed.previous_next.map(|e| e.map_short_name).as_deref(),
        Some(fx.map(0))
    );
    assert_eq!(
        passed.next.map(|e| e.map_short_name).as_deref(),
        Some(fx.map(1))
    );
    assert_eq!(passed.votes_cleared, 2);
    assert!(passed.waitlist.is_some());

    let status = commands::vote_status(&state, fx.name()).await?;
    assert_eq!(status.skip_votes, 0);

    let history = commands::rotation_history(&state, fx.name(), 1).await?;
    assert_eq!(history[0].reason, PointerChangeReason::SkipVote);
    Ok(())
}

#[tokio::test]
async fn queue_skip_leaves_map_votes_alone() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let fx = seed_rotation(&state, 3).await?;
    let queue = seed_queue(&state, fx.name(), 3, Some(1)).await?;

    commands::cast_map_vote(&state, voter(), fx.name(), fx.map(2)).await?;
    let outcome = commands::cast_skip_vote(&state, voter(), queue_scope(&queue.name)).await?;
    assert!(outcome.threshold_reached());

    let status = commands::vote_status(&state, fx.name()).await?;
    let tallies: Vec<u64> = status.maps.iter().map(|t| t.votes).collect();
    assert_eq!(tallies, vec![0, 0, 1]);
    Ok(())
}

#[tokio::test]
async fn queue_skip_needs_a_queue_with_a_rotation() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let fx = seed_rotation(&state, 1).await?;
    let queue = seed_queue(&state, fx.name(), 4, Some(2)).await?;
    commands::set_queue_rotation(&state, &queue.name, None).await?;

    let err = commands::cast_skip_vote(&state, voter(), queue_scope(&queue.name))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::RotationNotFound);

    let err = commands::cast_skip_vote(&state, voter(), queue_scope(&unique_str("nope")))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::QueueNotFound);
    Ok(())
}

#[tokio::test]
async fn game_skip_swaps_game_map_to_rotation_next() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let fx = seed_rotation(&state, 3).await?;
    let queue = seed_queue(&state, fx.name(), 2, Some(2)).await?;

    // the game was started on map 0 and the rotation moved on to map 1
    commands::advance_rotation(&state, fx.name()).await?;
    let players = [unique_id(), unique_id()];
    let game_id = seed_game(&state, queue.id, &fx.maps[0], &players, false).await?;
    let [a, b] = players.map(|p| Voter::new(p, unique_id(), unique_id()));

    let first = commands::cast_skip_vote(&state, a, SkipScope::CurrentGame).await?;
    assert!(!first.threshold_reached());

    let outcome = commands::cast_skip_vote(&state, b, SkipScope::CurrentGame).await?;
    let passed = outcome.resolution.expect("game skip should pass");
    let change = passed.game_map_change.expect("game map replaced");
    assert_eq!(change.game_id, game_id);
    assert_eq!(change.map_short_name, fx.map(1));
    assert_eq!(
        passed.next.map(|e| e.map_short_name).as_deref(),
        Some(fx.map(2))
    );
    assert_eq!(passed.waitlist, None);
    assert_eq!(passed.votes_cleared, 2);

    let game = in_progress_games::Entity::find_by_id(game_id)
        .one(state.db())
        .await
        .unwrap()
        .expect("game row");
    assert_eq!(game.map_short_name, fx.map(1));
    assert_eq!(game.map_full_name, fx.maps[1].full_name);
    Ok(())
}

#[tokio::test]
async fn game_skip_after_game_finished_is_rejected() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let fx = seed_rotation(&state, 2).await?;
    let queue = seed_queue(&state, fx.name(), 2, Some(1)).await?;
    let player = unique_id();
    seed_game(&state, queue.id, &fx.maps[0], &[player], true).await?;

    let err = commands::cast_skip_vote(
        &state,
        Voter::new(player, unique_id(), unique_id()),
        SkipScope::CurrentGame,
    )
    .await
    .unwrap_err();
    assert_eq!(err.code(), ErrorCode::GameFinished);
    Ok(())
}

#[tokio::test]
async fn live_game_wins_over_older_finished_one() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let fx = seed_rotation(&state, 2).await?;
    let queue = seed_queue(&state, fx.name(), 2, Some(2)).await?;
    let player = unique_id();
    seed_game(&state, queue.id, &fx.maps[0], &[player], false).await?;
    seed_game(&state, queue.id, &fx.maps[1], &[player], true).await?;

    let outcome = commands::cast_skip_vote(
        &state,
        Voter::new(player, unique_id(), unique_id()),
        SkipScope::CurrentGame,
    )
    .await?;
    assert_eq!(outcome.tally, 1);
    Ok(())
}

#[tokio::test]
async fn game_skip_without_a_game_is_not_found() -> Result<(), AppError> {
    let state = build_test_state().await?;

    let err = commands::cast_skip_vote(&state, voter(), SkipScope::CurrentGame)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::GameNotFound);
    Ok(())
}
