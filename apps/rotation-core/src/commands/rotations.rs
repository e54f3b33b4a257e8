//! Rotation membership and pointer operations.

use crate::db::txn::with_txn_retry;
use crate::entities::rotation_map_history::PointerChangeReason;
use crate::error::AppError;
use crate::repos::rotation_maps::{self, RotationMapEntry};
use crate::repos::{maps, rotations};
use crate::services::{OrdinalSequencer, RotationPointer};
use crate::state::app_state::AppState;

/// Add a map to a rotation at `ordinal` (clamped to the end).
pub async fn add_map_to_rotation(
    state: &AppState,
    rotation_name: &str,
    map_short_name: &str,
    ordinal: i32,
) -> Result<RotationMapEntry, AppError> {
    let rotation_name = rotation_name.to_string();
    let map_short_name = map_short_name.to_string();

    with_txn_retry(state, "add_map_to_rotation", |txn| {
        let rotation_name = rotation_name.clone();
        let map_short_name = map_short_name.clone();
        Box::pin(async move {
            let rotation = rotations::require_by_name(txn, &rotation_name).await?;
            let map = maps::require_by_short_name(txn, &map_short_name).await?;
            let rotation = rotations::claim(txn, &rotation).await?;

            let entry = OrdinalSequencer::new()
                .insert(txn, rotation.id, map.id, ordinal)
                .await?;
            Ok(entry)
        })
    })
    .await
}

/// Remove a map from a rotation; returns the rotation's next map afterwards.
pub async fn remove_map_from_rotation(
    state: &AppState,
    rotation_name: &str,
    map_short_name: &str,
) -> Result<Option<RotationMapEntry>, AppError> {
    let rotation_name = rotation_name.to_string();
    let map_short_name = map_short_name.to_string();

    with_txn_retry(state, "remove_map_from_rotation", |txn| {
        let rotation_name = rotation_name.clone();
        let map_short_name = map_short_name.clone();
        Box::pin(async move {
            let rotation = rotations::require_by_name(txn, &rotation_name).await?;
            let map = maps::require_by_short_name(txn, &map_short_name).await?;
            let rotation = rotations::claim(txn, &rotation).await?;
            let entry = rotation_maps::require_entry(txn, rotation.id, map.id).await?;

            let next = OrdinalSequencer::new().remove(txn, &entry).await?;
            Ok(next)
        })
    })
    .await
}

/// Move a map to `ordinal` (clamped to the rotation size).
pub async fn set_map_ordinal(
    state: &AppState,
    rotation_name: &str,
    map_short_name: &str,
    ordinal: i32,
) -> Result<RotationMapEntry, AppError> {
    let rotation_name = rotation_name.to_string();
    let map_short_name = map_short_name.to_string();

    with_txn_retry(state, "set_map_ordinal", |txn| {
        let rotation_name = rotation_name.clone();
        let map_short_name = map_short_name.clone();
        Box::pin(async move {
            let rotation = rotations::require_by_name(txn, &rotation_name).await?;
            let map = maps::require_by_short_name(txn, &map_short_name).await?;
            let rotation = rotations::claim(txn, &rotation).await?;
            let entry = rotation_maps::require_entry(txn, rotation.id, map.id).await?;

            let moved = OrdinalSequencer::new().move_to(txn, &entry, ordinal).await?;
            Ok(moved)
        })
    })
    .await
}

/// Admin override of the rotation's next map.
pub async fn set_next_map(
    state: &AppState,
    rotation_name: &str,
    map_short_name: &str,
) -> Result<RotationMapEntry, AppError> {
    let rotation_name = rotation_name.to_string();
    let map_short_name = map_short_name.to_string();

    with_txn_retry(state, "set_next_map", |txn| {
        let rotation_name = rotation_name.clone();
        let map_short_name = map_short_name.clone();
        Box::pin(async move {
            let rotation = rotations::require_by_name(txn, &rotation_name).await?;
            let map = maps::require_by_short_name(txn, &map_short_name).await?;
            let rotation = rotations::claim(txn, &rotation).await?;
            let entry = rotation_maps::require_entry(txn, rotation.id, map.id).await?;

            let next = RotationPointer::new()
                .set_next(txn, rotation.id, entry.id, PointerChangeReason::Override)
                .await?;
            Ok(next)
        })
    })
    .await
}

/// Advance the rotation to its following map, as the match scheduler does
/// once a game has started on the current one.
pub async fn advance_rotation(
    state: &AppState,
    rotation_name: &str,
) -> Result<Option<RotationMapEntry>, AppError> {
    let rotation_name = rotation_name.to_string();

    with_txn_retry(state, "advance_rotation", |txn| {
        let rotation_name = rotation_name.clone();
        Box::pin(async move {
            let rotation = rotations::require_by_name(txn, &rotation_name).await?;
            let rotation = rotations::claim(txn, &rotation).await?;

            let next = RotationPointer::new()
                .promote_next(txn, rotation.id, PointerChangeReason::Promoted)
                .await?;
            Ok(next)
        })
    })
    .await
}

/// The rotation's upcoming map, or `None` for an empty rotation.
pub async fn get_next_map(
    state: &AppState,
    rotation_id: i64,
) -> Result<Option<RotationMapEntry>, AppError> {
    let rotation = rotations::require_by_id(state.db(), rotation_id).await?;
    let next = RotationPointer::new()
        .next_map(state.db(), rotation.id)
        .await?;
    Ok(next)
}
