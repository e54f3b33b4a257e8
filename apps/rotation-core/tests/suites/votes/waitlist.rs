//! Waitlist markers left by passed votes.

use std::time::Duration;

use rotation_core::commands;
use rotation_core::{AppError, VoteSettings};
use time::OffsetDateTime;

use crate::support::factory::{seed_rotation, voter};
use crate::support::test_state::build_test_state_with;

fn settings(delay_secs: u64) -> VoteSettings {
    VoteSettings {
        re_add_delay: Duration::from_secs(delay_secs),
        ..VoteSettings::default().with_default_threshold(1)
    }
}

#[tokio::test]
async fn marker_is_not_due_before_its_delay() -> Result<(), AppError> {
    let state = build_test_state_with(settings(30)).await?;
    let fx = seed_rotation(&state, 2).await?;

    let outcome = commands::cast_map_vote(&state, voter(), fx.name(), fx.map(1)).await?;
    let marker = outcome
        .resolution
        .and_then(|p| p.waitlist)
        .expect("marker written");
    assert!(marker.end_waitlist_at > OffsetDateTime::now_utc() + time::Duration::seconds(20));

    let pending = commands::pending_waitlist_markers(&state, fx.rotation.id).await?;
    let pending_ids: Vec<i64> = pending.iter().map(|m| m.id).collect();
    assert_eq!(pending_ids, vec![marker.id]);

    let now = OffsetDateTime::now_utc();
    assert!(commands::take_due_waitlist_markers(&state, now).await?.is_empty());

    let later = now + time::Duration::seconds(31);
    let taken = commands::take_due_waitlist_markers(&state, later).await?;
    let taken_ids: Vec<i64> = taken.iter().map(|m| m.id).collect();
    assert_eq!(taken_ids, vec![marker.id]);
    assert_eq!(taken[0].channel_id, marker.channel_id);
    Ok(())
}

#[tokio::test]
async fn each_marker_is_taken_once() -> Result<(), AppError> {
    let state = build_test_state_with(settings(0)).await?;
    let fx = seed_rotation(&state, 2).await?;

    commands::cast_map_vote(&state, voter(), fx.name(), fx.map(1)).await?;
    commands::cast_map_vote(&state, voter(), fx.name(), fx.map(0)).await?;
    assert_eq!(
        commands::pending_waitlist_markers(&state, fx.rotation.id)
            .await?
            .len(),
        2
    );

    let due = OffsetDateTime::now_utc() + time::Duration::seconds(1);
    let taken = commands::take_due_waitlist_markers(&state, due).await?;
    assert_eq!(taken.len(), 2);
    assert!(taken.iter().all(|m| m.rotation_id == Some(fx.rotation.id)));

    assert!(commands::take_due_waitlist_markers(&state, due).await?.is_empty());
    assert!(commands::pending_waitlist_markers(&state, fx.rotation.id)
        .await?
        .is_empty());
    Ok(())
}
