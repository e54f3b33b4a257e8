//! Catalog administration operations.

use crate::db::txn::{with_txn, with_txn_retry};
use crate::error::AppError;
use crate::repos::history::HistoryEntry;
use crate::repos::maps::Map;
use crate::repos::queues::Queue;
use crate::repos::rotation_maps::RotationMapEntry;
use crate::repos::rotations::Rotation;
use crate::services::CatalogService;
use crate::state::app_state::AppState;

pub async fn create_map(
    state: &AppState,
    full_name: &str,
    short_name: &str,
) -> Result<Map, AppError> {
    let full_name = full_name.to_string();
    let short_name = short_name.to_string();

    with_txn(state, |txn| {
        Box::pin(async move {
            let map = CatalogService::new()
                .create_map(txn, &full_name, &short_name)
                .await?;
            Ok(map)
        })
    })
    .await
}

/// Fails with `MAP_IN_USE` while any rotation still holds the map.
pub async fn remove_map(state: &AppState, short_name: &str) -> Result<Map, AppError> {
    let short_name = short_name.to_string();

    with_txn(state, |txn| {
        Box::pin(async move {
            let map = CatalogService::new().remove_map(txn, &short_name).await?;
            Ok(map)
        })
    })
    .await
}

pub async fn list_maps(state: &AppState) -> Result<Vec<Map>, AppError> {
    Ok(CatalogService::new().list_maps(state.db()).await?)
}

pub async fn create_rotation(
    state: &AppState,
    name: &str,
    is_random: bool,
) -> Result<Rotation, AppError> {
    let name = name.to_string();

    with_txn(state, |txn| {
        Box::pin(async move {
            let rotation = CatalogService::new()
                .create_rotation(txn, &name, is_random)
                .await?;
            Ok(rotation)
        })
    })
    .await
}

/// Remove a rotation; returns the names of queues left without one.
pub async fn remove_rotation(state: &AppState, name: &str) -> Result<Vec<String>, AppError> {
    let name = name.to_string();

    with_txn_retry(state, "remove_rotation", |txn| {
        let name = name.clone();
        Box::pin(async move {
            let affected = CatalogService::new().remove_rotation(txn, &name).await?;
            Ok(affected)
        })
    })
    .await
}

pub async fn rename_rotation(
    state: &AppState,
    name: &str,
    new_name: &str,
) -> Result<Rotation, AppError> {
    let name = name.to_string();
    let new_name = new_name.to_string();

    with_txn_retry(state, "rename_rotation", |txn| {
        let name = name.clone();
        let new_name = new_name.clone();
        Box::pin(async move {
            let rotation = CatalogService::new()
                .rename_rotation(txn, &name, &new_name)
                .await?;
            Ok(rotation)
        })
    })
    .await
}

pub async fn set_rotation_random(
    state: &AppState,
    name: &str,
    is_random: bool,
) -> Result<Rotation, AppError> {
    let name = name.to_string();

    with_txn_retry(state, "set_rotation_random", |txn| {
        let name = name.clone();
        Box::pin(async move {
            let rotation = CatalogService::new()
                .set_rotation_random(txn, &name, is_random)
                .await?;
            Ok(rotation)
        })
    })
    .await
}

/// Members of a rotation in ordinal order.
pub async fn list_rotation_maps(
    state: &AppState,
    name: &str,
) -> Result<Vec<RotationMapEntry>, AppError> {
    Ok(CatalogService::new()
        .list_rotation_maps(state.db(), name)
        .await?)
}

/// Pointer changes for a rotation, newest first.
pub async fn rotation_history(
    state: &AppState,
    name: &str,
    limit: u64,
) -> Result<Vec<HistoryEntry>, AppError> {
    Ok(CatalogService::new()
        .rotation_history(state.db(), name, limit)
        .await?)
}

pub async fn create_queue(state: &AppState, name: &str, size: i32) -> Result<Queue, AppError> {
    let name = name.to_string();

    with_txn(state, |txn| {
        Box::pin(async move {
            let queue = CatalogService::new().create_queue(txn, &name, size).await?;
            Ok(queue)
        })
    })
    .await
}

pub async fn set_queue_rotation(
    state: &AppState,
    queue_name: &str,
    rotation_name: Option<&str>,
) -> Result<Queue, AppError> {
    let queue_name = queue_name.to_string();
    let rotation_name = rotation_name.map(str::to_string);

    with_txn(state, |txn| {
        Box::pin(async move {
            let queue = CatalogService::new()
                .set_queue_rotation(txn, &queue_name, rotation_name.as_deref())
                .await?;
            Ok(queue)
        })
    })
    .await
}

pub async fn set_queue_vote_threshold(
    state: &AppState,
    queue_name: &str,
    threshold: i32,
) -> Result<Queue, AppError> {
    let queue_name = queue_name.to_string();

    with_txn(state, |txn| {
        Box::pin(async move {
            let queue = CatalogService::new()
                .set_queue_vote_threshold(txn, &queue_name, threshold)
                .await?;
            Ok(queue)
        })
    })
    .await
}

/// Queues sharing a rotation. Any pointer change is visible to all of them.
pub async fn queues_for_rotation(
    state: &AppState,
    rotation_name: &str,
) -> Result<Vec<Queue>, AppError> {
    Ok(CatalogService::new()
        .queues_for_rotation(state.db(), rotation_name)
        .await?)
}
