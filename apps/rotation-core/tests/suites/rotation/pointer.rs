//! Next-map flag handling.

use rotation_core::commands;
use rotation_core::entities::rotation_map_history::PointerChangeReason;
use rotation_core::{AppError, ErrorCode};
use rotation_test_support::unique_helpers::unique_str;

use crate::support::factory::{flagged, seed_map, seed_rotation};
use crate::support::test_state::build_test_state;

#[tokio::test]
async fn first_map_becomes_next() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let rotation = commands::create_rotation(&state, &unique_str("pointer"), false).await?;
    let map = seed_map(&state).await?;

    assert_eq!(commands::get_next_map(&state, rotation.id).await?, None);

    let entry = commands::add_map_to_rotation(&state, &rotation.name, &map.short_name, 5).await?;
    assert_eq!(entry.ordinal, 1);
    assert!(entry.is_next);

    let next = commands::get_next_map(&state, rotation.id).await?;
    assert_eq!(next.map(|e| e.id), Some(entry.id));

    let history = commands::rotation_history(&state, &rotation.name, 10).await?;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].reason, PointerChangeReason::Initial);
    Ok(())
}

#[tokio::test]
async fn get_next_map_on_unknown_rotation_is_not_found() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let err = commands::get_next_map(&state, 987_654).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::RotationNotFound);
    Ok(())
}

#[tokio::test]
async fn removing_the_next_map_hands_flag_to_successor() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let fx = seed_rotation(&state, 3).await?;

    commands::set_next_map(&state, fx.name(), fx.map(1)).await?;
    let next = commands::remove_map_from_rotation(&state, fx.name(), fx.map(1)).await?;
    assert_eq!(next.as_ref().map(|e| e.map_short_name.as_str()), Some(fx.map(2)));
    // successor closed the gap
    assert_eq!(next.map(|e| e.ordinal), Some(2));

    let history = commands::rotation_history(&state, fx.name(), 1).await?;
    assert_eq!(history[0].reason, PointerChangeReason::Removal);
    assert_eq!(history[0].map_short_name, fx.map(2));
    Ok(())
}

#[tokio::test]
async fn removing_the_last_ordinal_next_wraps_to_first() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let fx = seed_rotation(&state, 3).await?;

    commands::set_next_map(&state, fx.name(), fx.map(2)).await?;
    let next = commands::remove_map_from_rotation(&state, fx.name(), fx.map(2)).await?;
    assert_eq!(next.map(|e| e.map_short_name), Some(fx.map(0).to_string()));
    Ok(())
}

#[tokio::test]
async fn removing_the_only_map_empties_the_rotation() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let fx = seed_rotation(&state, 1).await?;

    let next = commands::remove_map_from_rotation(&state, fx.name(), fx.map(0)).await?;
    assert_eq!(next, None);
    assert_eq!(commands::get_next_map(&state, fx.rotation.id).await?, None);

    // re-adding to the empty rotation flags the newcomer again
    let entry = commands::add_map_to_rotation(&state, fx.name(), fx.map(0), 1).await?;
    assert!(entry.is_next);
    Ok(())
}

#[tokio::test]
async fn advance_walks_ordinals_and_wraps() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let fx = seed_rotation(&state, 3).await?;

    let mut seen = Vec::new();
    for _ in 0..4 {
        let next = commands::advance_rotation(&state, fx.name()).await?;
        seen.push(next.map(|e| e.map_short_name).unwrap_or_default());
    }
    assert_eq!(
        seen,
        [1, 2, 0, 1].map(|i| fx.map(i).to_string()).to_vec()
    );

    let entries = commands::list_rotation_maps(&state, fx.name()).await?;
    assert_eq!(flagged(&entries).as_deref(), Some(fx.map(1)));
    assert_eq!(entries.iter().filter(|e| e.is_next).count(), 1);
    Ok(())
}

#[tokio::test]
async fn advance_single_map_rotation_keeps_it_and_records_history() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let fx = seed_rotation(&state, 1).await?;

    let next = commands::advance_rotation(&state, fx.name()).await?;
    assert_eq!(next.map(|e| e.map_short_name), Some(fx.map(0).to_string()));

    let history = commands::rotation_history(&state, fx.name(), 10).await?;
    let reasons: Vec<_> = history.iter().map(|h| h.reason).collect();
    assert_eq!(
        reasons,
        vec![PointerChangeReason::Promoted, PointerChangeReason::Initial]
    );
    Ok(())
}

#[tokio::test]
async fn advance_empty_rotation_is_a_no_op() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let rotation = commands::create_rotation(&state, &unique_str("pointer"), false).await?;

    assert_eq!(commands::advance_rotation(&state, &rotation.name).await?, None);
    assert!(commands::rotation_history(&state, &rotation.name, 10)
        .await?
        .is_empty());
    Ok(())
}

#[tokio::test]
async fn set_next_overrides_and_requires_membership() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let fx = seed_rotation(&state, 3).await?;
    let outsider = seed_map(&state).await?;

    let next = commands::set_next_map(&state, fx.name(), fx.map(2)).await?;
    assert!(next.is_next);
    assert_eq!(next.ordinal, 3);

    let entries = commands::list_rotation_maps(&state, fx.name()).await?;
    assert_eq!(flagged(&entries).as_deref(), Some(fx.map(2)));

    let err = commands::set_next_map(&state, fx.name(), &outsider.short_name)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::RotationMapNotFound);

    let history = commands::rotation_history(&state, fx.name(), 1).await?;
    assert_eq!(history[0].reason, PointerChangeReason::Override);
    Ok(())
}
