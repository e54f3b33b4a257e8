//! Withdrawing votes.

use rotation_core::commands;
use rotation_core::{AppError, RetractScope, SkipScope};

use crate::support::factory::{seed_queue, seed_rotation, voter};
use crate::support::test_state::build_test_state;

#[tokio::test]
async fn retract_by_map_then_everything() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let fx = seed_rotation(&state, 3).await?;
    let queue = seed_queue(&state, fx.name(), 10, Some(5)).await?;
    let v = voter();

    commands::cast_map_vote(&state, v, fx.name(), fx.map(1)).await?;
    commands::cast_map_vote(&state, v, fx.name(), fx.map(2)).await?;
    commands::cast_skip_vote(
        &state,
        v,
        SkipScope::Queue {
            queue_name: queue.name.clone(),
        },
    )
    .await?;

    let retracted = commands::retract_votes(
        &state,
        v.player_id,
        RetractScope::Map {
            map_short_name: fx.map(1).to_lowercase(),
        },
    )
    .await?;
    assert_eq!(retracted.map_votes, 1);
    assert_eq!(retracted.skip_votes, 0);

    let retracted = commands::retract_votes(&state, v.player_id, RetractScope::All).await?;
    assert_eq!(retracted.map_votes, 1);
    assert_eq!(retracted.skip_votes, 1);
    assert_eq!(retracted.total(), 2);

    // idempotent
    let again = commands::retract_votes(&state, v.player_id, RetractScope::default()).await?;
    assert_eq!(again.total(), 0);

    let status = commands::vote_status(&state, fx.name()).await?;
    assert!(status.maps.iter().all(|t| t.votes == 0));
    assert_eq!(status.skip_votes, 0);
    Ok(())
}

#[tokio::test]
async fn retract_skips_keeps_map_votes() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let fx = seed_rotation(&state, 2).await?;
    let queue = seed_queue(&state, fx.name(), 10, Some(5)).await?;
    let v = voter();

    commands::cast_map_vote(&state, v, fx.name(), fx.map(1)).await?;
    commands::cast_skip_vote(
        &state,
        v,
        SkipScope::Queue {
            queue_name: queue.name.clone(),
        },
    )
    .await?;

    let retracted = commands::retract_votes(&state, v.player_id, RetractScope::Skips).await?;
    assert_eq!(retracted.map_votes, 0);
    assert_eq!(retracted.skip_votes, 1);

    let status = commands::vote_status(&state, fx.name()).await?;
    assert_eq!(status.maps[1].votes, 1);

    // the retracted skip can be cast again
    let outcome = commands::cast_skip_vote(
        &state,
        v,
        SkipScope::Queue {
            queue_name: queue.name.clone(),
        },
    )
    .await?;
    assert_eq!(outcome.tally, 1);
    Ok(())
}

#[tokio::test]
async fn retract_unknown_map_removes_nothing() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let fx = seed_rotation(&state, 1).await?;
    let v = voter();
    commands::cast_map_vote(&state, v, fx.name(), fx.map(0)).await?;

    let retracted = commands::retract_votes(
        &state,
        v.player_id,
        RetractScope::Map {
            map_short_name: "NO_SUCH_MAP".to_string(),
        },
    )
    .await?;
    assert_eq!(retracted.total(), 0);
    assert_eq!(commands::vote_status(&state, fx.name()).await?.maps[0].votes, 1);
    Ok(())
}
