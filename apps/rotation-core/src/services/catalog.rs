//! Catalog administration: maps, rotations and queues.

use sea_orm::ConnectionTrait;
use tracing::info;

use crate::domain::tally::default_queue_threshold;
use crate::errors::domain::{ConflictKind, DomainError};
use crate::repos::history::{self, HistoryEntry};
use crate::repos::maps::{self, Map};
use crate::repos::queues::{self, Queue};
use crate::repos::rotation_maps::{self, RotationMapEntry};
use crate::repos::rotations::{self, Rotation};

/// Catalog domain service.
#[derive(Debug, Default, Clone, Copy)]
pub struct CatalogService;

impl CatalogService {
    pub fn new() -> Self {
        Self
    }

    pub async fn create_map<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        full_name: &str,
        short_name: &str,
    ) -> Result<Map, DomainError> {
        let map = maps::create_map(conn, full_name, short_name).await?;
        info!(map_id = map.id, short_name = %map.short_name, "Map created");
        Ok(map)
    }

    /// Delete a map that no rotation uses.
    pub async fn remove_map<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        short_name: &str,
    ) -> Result<Map, DomainError> {
        let map = maps::require_by_short_name(conn, short_name).await?;
        let memberships = maps::count_memberships(conn, map.id).await?;
        if memberships > 0 {
            return Err(DomainError::conflict(
                ConflictKind::MapInUse,
                format!(
                    "Map '{}' is still in {memberships} rotation(s); remove it from them first",
                    map.short_name
                ),
            ));
        }
        maps::delete_map(conn, map.id).await?;
        info!(map_id = map.id, short_name = %map.short_name, "Map removed");
        Ok(map)
    }

    pub async fn list_maps<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
    ) -> Result<Vec<Map>, DomainError> {
        maps::list_all(conn).await
    }

    pub async fn create_rotation<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        name: &str,
        is_random: bool,
    ) -> Result<Rotation, DomainError> {
        let rotation = rotations::create_rotation(conn, name, is_random).await?;
        info!(rotation_id = rotation.id, name = %rotation.name, "Rotation created");
        Ok(rotation)
    }

    /// Delete a rotation with its members and votes. Queues using it are
    /// left without a rotation; their names are returned.
    pub async fn remove_rotation<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        name: &str,
    ) -> Result<Vec<String>, DomainError> {
        let rotation = rotations::require_by_name(conn, name).await?;
        let rotation = rotations::claim(conn, &rotation).await?;
        let affected: Vec<String> = queues::find_by_rotation(conn, rotation.id)
            .await?
            .into_iter()
            .map(|q| q.name)
            .collect();

        rotations::delete_rotation(conn, rotation.id).await?;
        info!(rotation_id = rotation.id, name = %rotation.name, ?affected, "Rotation removed");
        Ok(affected)
    }

    pub async fn rename_rotation<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        name: &str,
        new_name: &str,
    ) -> Result<Rotation, DomainError> {
        let rotation = rotations::require_by_name(conn, name).await?;
        rotations::rename(conn, &rotation, new_name).await
    }

    pub async fn set_rotation_random<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        name: &str,
        is_random: bool,
    ) -> Result<Rotation, DomainError> {
        let rotation = rotations::require_by_name(conn, name).await?;
        rotations::set_random(conn, &rotation, is_random).await
    }

    pub async fn list_rotation_maps<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        name: &str,
    ) -> Result<Vec<RotationMapEntry>, DomainError> {
        let rotation = rotations::require_by_name(conn, name).await?;
        rotation_maps::list_for_rotation(conn, rotation.id).await
    }

    pub async fn rotation_history<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        name: &str,
        limit: u64,
    ) -> Result<Vec<HistoryEntry>, DomainError> {
        let rotation = rotations::require_by_name(conn, name).await?;
        history::list_recent(conn, rotation.id, limit).await
    }

    /// Create a queue whose threshold starts at two thirds of its size.
    pub async fn create_queue<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        name: &str,
        size: i32,
    ) -> Result<Queue, DomainError> {
        let queue = queues::create_queue(conn, name, size, default_queue_threshold(size)).await?;
        info!(queue_id = queue.id, name = %queue.name, size, threshold = ?queue.vote_threshold, "Queue created");
        Ok(queue)
    }

    /// Point a queue at a rotation, or detach it with `None`.
    pub async fn set_queue_rotation<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        queue_name: &str,
        rotation_name: Option<&str>,
    ) -> Result<Queue, DomainError> {
        let queue = queues::require_by_name(conn, queue_name).await?;
        let rotation_id = match rotation_name {
            Some(name) => Some(rotations::require_by_name(conn, name).await?.id),
            None => None,
        };
        queues::set_rotation(conn, queue.id, rotation_id).await?;
        queues::require_by_id(conn, queue.id).await
    }

    /// Takes effect on the next cast; votes already counted are not
    /// re-evaluated.
    pub async fn set_queue_vote_threshold<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        queue_name: &str,
        threshold: i32,
    ) -> Result<Queue, DomainError> {
        let queue = queues::require_by_name(conn, queue_name).await?;
        queues::set_vote_threshold(conn, queue.id, threshold).await?;
        queues::require_by_id(conn, queue.id).await
    }

    /// Queues that share the rotation and so see any change to it.
    pub async fn queues_for_rotation<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        rotation_name: &str,
    ) -> Result<Vec<Queue>, DomainError> {
        let rotation = rotations::require_by_name(conn, rotation_name).await?;
        queues::find_by_rotation(conn, rotation.id).await
    }
}
