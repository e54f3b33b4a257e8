//! Map-change votes: tallying, thresholds and passing.

use rotation_core::commands;
use rotation_core::domain::votes::VoteKind;
use rotation_core::entities::rotation_map_history::PointerChangeReason;
use rotation_core::{AppError, ErrorCode, SkipScope, VoteSettings};

use crate::support::factory::{flagged, seed_map, seed_queue, seed_rotation, voter, voters};
use crate::support::test_state::{build_test_state, build_test_state_with};

#[tokio::test]
async fn votes_below_threshold_only_accumulate() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let fx = seed_rotation(&state, 3).await?;
    seed_queue(&state, fx.name(), 6, Some(3)).await?;

    let crowd = voters(2);
    for (i, v) in crowd.iter().enumerate() {
        let outcome = commands::cast_map_vote(&state, *v, fx.name(), fx.map(2)).await?;
        assert_eq!(outcome.kind, VoteKind::MapChange);
        assert_eq!(outcome.tally, i as u64 + 1);
        assert_eq!(outcome.threshold, 3);
        assert!(!outcome.threshold_reached());
    }

    let entries = commands::list_rotation_maps(&state, fx.name()).await?;
    assert_eq!(flagged(&entries).as_deref(), Some(fx.map(0)));
    Ok(())
}

#[tokio::test]
async fn second_vote_for_same_map_is_rejected() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let fx = seed_rotation(&state, 2).await?;
    seed_queue(&state, fx.name(), 6, Some(3)).await?;
    let v = voter();

    commands::cast_map_vote(&state, v, fx.name(), fx.map(1)).await?;
    let err = commands::cast_map_vote(&state, v, fx.name(), fx.map(1))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::AlreadyVoted);

    // a vote for a different map is its own tally
    let outcome = commands::cast_map_vote(&state, v, fx.name(), fx.map(0)).await?;
    assert_eq!(outcome.tally, 1);

    let status = commands::vote_status(&state, fx.name()).await?;
    let tallies: Vec<u64> = status.maps.iter().map(|t| t.votes).collect();
    assert_eq!(tallies, vec![1, 1]);
    Ok(())
}

#[tokio::test]
async fn reaching_threshold_sets_next_and_purges_rotation_votes() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let fx = seed_rotation(&state, 3).await?;
    let queue = seed_queue(&state, fx.name(), 4, Some(2)).await?;
    let [a, b, c, d] = [voter(), voter(), voter(), voter()];

    // pending votes that the pass must clear
    commands::cast_map_vote(&state, c, fx.name(), fx.map(1)).await?;
    commands::cast_skip_vote(
        &state,
        d,
        SkipScope::Queue {
            queue_name: queue.name.clone(),
        },
    )
    .await?;

    let first = commands::cast_map_vote(&state, a, fx.name(), fx.map(2)).await?;
    assert!(!first.threshold_reached());

    let outcome = commands::cast_map_vote(&state, b, fx.name(), fx.map(2)).await?;
    assert_eq!(outcome.tally, 2);
    let passed = outcome.resolution.expect("vote should pass");
    assert_eq!(passed.rotation_id, fx.rotation.id);
    assert_eq!(
        passed.previous_next.map(|e| e.map_short_name).as_deref(),
        Some(fx.map(0))
    );
    assert_eq!(
        passed.next.as_ref().map(|e| e.map_short_name.as_str()),
        Some(fx.map(2))
    );
    assert_eq!(passed.affected_queues, vec![queue.name.clone()]);
    assert_eq!(passed.votes_cleared, 4);
    assert_eq!(passed.game_map_change, None);

    let marker = passed.waitlist.expect("map pass leaves a waitlist marker");
    assert_eq!(marker.channel_id, b.channel_id);
    assert_eq!(marker.guild_id, b.guild_id);
    assert_eq!(marker.rotation_id, Some(fx.rotation.id));

    let status = commands::vote_status(&state, fx.name()).await?;
    assert!(status.maps.iter().all(|t| t.votes == 0));
    assert_eq!(status.skip_votes, 0);

    let next = commands::get_next_map(&state, fx.rotation.id).await?;
    assert_eq!(next.map(|e| e.map_short_name).as_deref(), Some(fx.map(2)));

    let history = commands::rotation_history(&state, fx.name(), 1).await?;
    assert_eq!(history[0].reason, PointerChangeReason::MapVote);
    Ok(())
}

#[tokio::test]
async fn voting_starts_over_after_a_pass() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let fx = seed_rotation(&state, 2).await?;
    seed_queue(&state, fx.name(), 4, Some(2)).await?;
    let [a, b] = [voter(), voter()];

    commands::cast_map_vote(&state, a, fx.name(), fx.map(1)).await?;
    let passed = commands::cast_map_vote(&state, b, fx.name(), fx.map(1)).await?;
    assert!(passed.threshold_reached());

    // the same voter may vote again in the new cycle
    let again = commands::cast_map_vote(&state, a, fx.name(), fx.map(1)).await?;
    assert_eq!(again.tally, 1);
    assert!(!again.threshold_reached());
    Ok(())
}

#[tokio::test]
async fn lowering_threshold_waits_for_the_next_cast() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let fx = seed_rotation(&state, 3).await?;
    let queue = seed_queue(&state, fx.name(), 8, Some(5)).await?;

    for v in voters(3) {
        let outcome = commands::cast_map_vote(&state, v, fx.name(), fx.map(2)).await?;
        assert!(!outcome.threshold_reached());
    }

    commands::set_queue_vote_threshold(&state, &queue.name, 2).await?;

    // already-counted votes are not re-evaluated
    let next = commands::get_next_map(&state, fx.rotation.id).await?;
    assert_eq!(next.map(|e| e.map_short_name).as_deref(), Some(fx.map(0)));
    assert_eq!(commands::vote_status(&state, fx.name()).await?.maps[2].votes, 3);

    let outcome = commands::cast_map_vote(&state, voter(), fx.name(), fx.map(2)).await?;
    assert_eq!(outcome.tally, 4);
    assert_eq!(outcome.threshold, 2);
    assert!(outcome.threshold_reached());

    let next = commands::get_next_map(&state, fx.rotation.id).await?;
    assert_eq!(next.map(|e| e.map_short_name).as_deref(), Some(fx.map(2)));
    Ok(())
}

#[tokio::test]
async fn lowest_queue_threshold_sets_the_map_threshold() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let fx = seed_rotation(&state, 2).await?;
    seed_queue(&state, fx.name(), 10, Some(5)).await?;
    seed_queue(&state, fx.name(), 10, Some(2)).await?;

    let status = commands::vote_status(&state, fx.name()).await?;
    assert_eq!(status.map_vote_threshold, 2);
    Ok(())
}

#[tokio::test]
async fn rotation_without_queues_uses_configured_default() -> Result<(), AppError> {
    let state =
        build_test_state_with(VoteSettings::default().with_default_threshold(1)).await?;
    let fx = seed_rotation(&state, 2).await?;

    let outcome = commands::cast_map_vote(&state, voter(), fx.name(), fx.map(1)).await?;
    assert_eq!(outcome.threshold, 1);
    let passed = outcome.resolution.expect("single vote passes at threshold 1");
    assert!(passed.affected_queues.is_empty());
    Ok(())
}

#[tokio::test]
async fn vote_for_flagged_map_still_passes_and_records() -> Result<(), AppError> {
    let state =
        build_test_state_with(VoteSettings::default().with_default_threshold(1)).await?;
    let fx = seed_rotation(&state, 2).await?;

    let outcome = commands::cast_map_vote(&state, voter(), fx.name(), fx.map(0)).await?;
    let passed = outcome.resolution.expect("threshold 1");
    assert_eq!(
        passed.next.map(|e| e.map_short_name).as_deref(),
        Some(fx.map(0))
    );

    let entries = commands::list_rotation_maps(&state, fx.name()).await?;
    assert_eq!(entries.iter().filter(|e| e.is_next).count(), 1);
    Ok(())
}

#[tokio::test]
async fn vote_for_map_outside_rotation_is_not_found() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let fx = seed_rotation(&state, 2).await?;
    let outsider = seed_map(&state).await?;

    let err = commands::cast_map_vote(&state, voter(), fx.name(), &outsider.short_name)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::RotationMapNotFound);

    let err = commands::cast_map_vote(&state, voter(), "missing-rotation", fx.map(0))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::RotationNotFound);
    Ok(())
}
