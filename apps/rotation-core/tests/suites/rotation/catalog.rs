//! Map, rotation and queue administration.

use rotation_core::commands;
use rotation_core::repos;
use rotation_core::{AppError, ErrorCode};
use rotation_test_support::unique_helpers::{unique_map_code, unique_str};

use crate::support::factory::{seed_map, seed_queue, seed_rotation};
use crate::support::test_state::build_test_state;

#[tokio::test]
async fn map_short_names_are_case_insensitive() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let code = unique_map_code("dust");
    let map = commands::create_map(&state, &format!("Dust {code}"), &code.to_lowercase()).await?;
    assert_eq!(map.short_name, code);

    let err = commands::create_map(&state, &format!("Dust Two {code}"), &code).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::DuplicateName);

    let err = commands::create_map(&state, "  ", "X").await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidName);
    Ok(())
}

#[tokio::test]
async fn map_in_a_rotation_cannot_be_removed() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let fx = seed_rotation(&state, 2).await?;

    let err = commands::remove_map(&state, fx.map(0)).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::MapInUse);

    commands::remove_map_from_rotation(&state, fx.name(), fx.map(0)).await?;
    let removed = commands::remove_map(&state, fx.map(0)).await?;
    assert_eq!(removed.short_name, fx.map(0));

    let listed = commands::list_maps(&state).await?;
    assert!(listed.iter().all(|m| m.short_name != fx.map(0)));
    Ok(())
}

#[tokio::test]
async fn restricted_map_delete_reports_map_in_use() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let fx = seed_rotation(&state, 1).await?;

    // a membership committed after the catalog check still leaves the row protected
    let err = AppError::from(
        repos::maps::delete_map(state.db(), fx.maps[0].id)
            .await
            .unwrap_err(),
    );
    assert_eq!(err.code(), ErrorCode::MapInUse);

    let listed = commands::list_rotation_maps(&state, fx.name()).await?;
    assert_eq!(listed.len(), 1);
    Ok(())
}

#[tokio::test]
async fn rotation_names_are_unique_ignoring_case() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let name = unique_str("Rotation");
    commands::create_rotation(&state, &name, false).await?;

    let err = commands::create_rotation(&state, &name.to_uppercase(), true)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::DuplicateName);

    let err = commands::create_rotation(&state, "   ", false).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidName);
    Ok(())
}

#[tokio::test]
async fn rename_and_toggle_random() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let fx = seed_rotation(&state, 1).await?;
    let new_name = unique_str("renamed");

    let renamed = commands::rename_rotation(&state, fx.name(), &new_name).await?;
    assert_eq!(renamed.name, new_name);
    assert!(renamed.lock_version > fx.rotation.lock_version);

    let random = commands::set_rotation_random(&state, &new_name, true).await?;
    assert!(random.is_random);

    let err = commands::list_rotation_maps(&state, fx.name()).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::RotationNotFound);
    assert_eq!(commands::list_rotation_maps(&state, &new_name).await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn removing_a_rotation_detaches_its_queues() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let fx = seed_rotation(&state, 2).await?;
    let queue = seed_queue(&state, fx.name(), 10, None).await?;
    assert_eq!(queue.rotation_id, Some(fx.rotation.id));

    let affected = commands::remove_rotation(&state, fx.name()).await?;
    assert_eq!(affected, vec![queue.name.clone()]);

    let err = commands::get_next_map(&state, fx.rotation.id).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::RotationNotFound);

    // maps survive and are free to remove
    commands::remove_map(&state, fx.map(0)).await?;
    Ok(())
}

#[tokio::test]
async fn queue_threshold_defaults_to_two_thirds_of_size() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let fx = seed_rotation(&state, 1).await?;

    let queue = seed_queue(&state, fx.name(), 10, None).await?;
    assert_eq!(queue.size, 10);
    assert_eq!(queue.vote_threshold, Some(7));

    let small = seed_queue(&state, fx.name(), 1, None).await?;
    assert_eq!(small.vote_threshold, Some(1));

    let err = commands::set_queue_vote_threshold(&state, &queue.name, 0)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidThreshold);

    let queues = commands::queues_for_rotation(&state, fx.name()).await?;
    assert_eq!(queues.len(), 2);
    Ok(())
}

#[tokio::test]
async fn queue_can_be_detached_from_its_rotation() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let fx = seed_rotation(&state, 1).await?;
    let queue = seed_queue(&state, fx.name(), 6, Some(2)).await?;
    assert_eq!(queue.vote_threshold, Some(2));

    let detached = commands::set_queue_rotation(&state, &queue.name, None).await?;
    assert_eq!(detached.rotation_id, None);
    assert!(commands::queues_for_rotation(&state, fx.name())
        .await?
        .is_empty());

    let err = commands::set_queue_rotation(&state, &queue.name, Some("missing-rotation"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::RotationNotFound);
    Ok(())
}

#[tokio::test]
async fn history_lists_newest_first_with_map_names() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let fx = seed_rotation(&state, 3).await?;
    let extra = seed_map(&state).await?;
    commands::add_map_to_rotation(&state, fx.name(), &extra.short_name, 1).await?;

    commands::advance_rotation(&state, fx.name()).await?;
    commands::set_next_map(&state, fx.name(), &extra.short_name).await?;

    let history = commands::rotation_history(&state, fx.name(), 2).await?;
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].map_short_name, extra.short_name);
    assert_eq!(history[0].map_full_name, extra.full_name);
    assert_eq!(history[1].map_short_name, fx.map(1));
    assert!(history[0].selected_at >= history[1].selected_at);
    Ok(())
}
