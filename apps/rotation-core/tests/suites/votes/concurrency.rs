//! Concurrent casts against one rotation.

use std::time::Duration;

use rotation_core::commands;
use rotation_core::{AppError, AppState, VoteOutcome, VoteSettings};
use time::OffsetDateTime;

use crate::support::factory::{seed_queue, seed_rotation, voters};
use crate::support::test_state::build_test_state_with;

fn patient_settings() -> VoteSettings {
    // enough attempts that no contender exhausts its budget
    VoteSettings {
        re_add_delay: Duration::ZERO,
        ..VoteSettings::default().with_max_txn_attempts(30)
    }
}

async fn cast_all(
    state: &AppState,
    rotation: &str,
    map: &str,
    voters: Vec<rotation_core::Voter>,
) -> Result<Vec<VoteOutcome>, AppError> {
    let handles: Vec<_> = voters
        .into_iter()
        .map(|v| {
            let state = state.clone();
            let rotation = rotation.to_string();
            let map = map.to_string();
            tokio::spawn(async move { commands::cast_map_vote(&state, v, &rotation, &map).await })
        })
        .collect();

    let mut outcomes = Vec::new();
    for handle in handles {
        outcomes.push(handle.await.expect("cast task panicked")?);
    }
    Ok(outcomes)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn simultaneous_votes_resolve_exactly_once() -> Result<(), AppError> {
    let state = build_test_state_with(patient_settings()).await?;
    let fx = seed_rotation(&state, 3).await?;
    seed_queue(&state, fx.name(), 4, Some(2)).await?;

    // one vote already counted: either racer alone would cross the threshold
    let mut crowd = voters(3);
    let early = crowd.remove(0);
    let first = commands::cast_map_vote(&state, early, fx.name(), fx.map(2)).await?;
    assert!(!first.threshold_reached());

    let outcomes = cast_all(&state, fx.name(), fx.map(2), crowd).await?;

    let passes = outcomes.iter().filter(|o| o.threshold_reached()).count();
    assert_eq!(passes, 1, "exactly one cast resolves the vote");
    let mut tallies: Vec<u64> = outcomes.iter().map(|o| o.tally).collect();
    tallies.sort_unstable();
    assert_eq!(tallies, vec![1, 2]);

    // the other racer's vote opens the next cycle
    let status = commands::vote_status(&state, fx.name()).await?;
    let remaining: u64 = status.maps.iter().map(|t| t.votes).sum();
    assert_eq!(remaining, 1);
    assert_eq!(status.maps[2].votes, 1);

    let entries = commands::list_rotation_maps(&state, fx.name()).await?;
    assert_eq!(entries.iter().filter(|e| e.is_next).count(), 1);
    assert_eq!(
        commands::get_next_map(&state, fx.rotation.id)
            .await?
            .map(|e| e.map_short_name)
            .as_deref(),
        Some(fx.map(2))
    );
    assert_eq!(
        commands::pending_waitlist_markers(&state, fx.rotation.id)
            .await?
            .len(),
        1
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn overlapping_cycles_each_pass_once() -> Result<(), AppError> {
    let state = build_test_state_with(patient_settings()).await?;
    let fx = seed_rotation(&state, 2).await?;
    seed_queue(&state, fx.name(), 4, Some(2)).await?;

    let outcomes = cast_all(&state, fx.name(), fx.map(1), voters(4)).await?;

    // casts serialize on the rotation claim: two full cycles of two votes
    let passes = outcomes.iter().filter(|o| o.threshold_reached()).count();
    assert_eq!(passes, 2);

    let status = commands::vote_status(&state, fx.name()).await?;
    assert!(status.maps.iter().all(|t| t.votes == 0));

    let due = OffsetDateTime::now_utc() + time::Duration::seconds(1);
    let (first, second) = tokio::join!(
        commands::take_due_waitlist_markers(&state, due),
        commands::take_due_waitlist_markers(&state, due)
    );
    assert_eq!(first?.len() + second?.len(), 2, "markers are never handed out twice");
    Ok(())
}
