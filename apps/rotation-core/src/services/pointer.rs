//! Rotation Pointer: which member of a rotation is the upcoming map.
//!
//! The partial unique index on `rotation_maps (rotation_id) WHERE is_next`
//! rejects a second flag, so every change clears the old holder before
//! marking the new one.

use sea_orm::ConnectionTrait;
use tracing::{debug, info};

use crate::domain::pointer::successor_ordinal;
use crate::entities::rotation_map_history::PointerChangeReason;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::repos::history;
use crate::repos::rotation_maps::{self, RotationMapEntry};
use crate::services::sequencer::verify_rotation;

#[derive(Debug, Default, Clone, Copy)]
pub struct RotationPointer;

impl RotationPointer {
    pub fn new() -> Self {
        Self
    }

    pub async fn next_map<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        rotation_id: i64,
    ) -> Result<Option<RotationMapEntry>, DomainError> {
        rotation_maps::find_next(conn, rotation_id).await
    }

    /// Advance the flag to the following ordinal, wrapping to 1.
    ///
    /// No-op on an empty rotation. Returns the new next map.
    pub async fn promote_next<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        rotation_id: i64,
        reason: PointerChangeReason,
    ) -> Result<Option<RotationMapEntry>, DomainError> {
        let entries = rotation_maps::list_for_rotation(conn, rotation_id).await?;
        let count = entries.len() as i32;

        let current = entries.iter().find(|e| e.is_next);
        let Some(successor) = successor_ordinal(current.map_or(0, |e| e.ordinal), count) else {
            debug!(rotation_id, "Promote on empty rotation is a no-op");
            return Ok(None);
        };

        let target = entries
            .iter()
            .find(|e| e.ordinal == successor)
            .cloned()
            .ok_or_else(|| {
                DomainError::invariant(format!(
                    "Rotation {rotation_id} has no map at ordinal {successor}"
                ))
            })?;

        self.flag(conn, rotation_id, current.map(|e| e.id), target, reason)
            .await
            .map(Some)
    }

    /// Flag a specific member as next, regardless of ordinal.
    pub async fn set_next<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        rotation_id: i64,
        rotation_map_id: i64,
        reason: PointerChangeReason,
    ) -> Result<RotationMapEntry, DomainError> {
        let target = rotation_maps::require_by_id(conn, rotation_map_id).await?;
        if target.rotation_id != rotation_id {
            return Err(DomainError::not_found(
                NotFoundKind::RotationMap,
                "Map is not part of this rotation",
            ));
        }
        let current = rotation_maps::find_next(conn, rotation_id).await?;

        self.flag(conn, rotation_id, current.map(|e| e.id), target, reason)
            .await
    }

    async fn flag<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        rotation_id: i64,
        current_id: Option<i64>,
        mut target: RotationMapEntry,
        reason: PointerChangeReason,
    ) -> Result<RotationMapEntry, DomainError> {
        if current_id != Some(target.id) {
            rotation_maps::clear_next(conn, rotation_id).await?;
            rotation_maps::mark_next(conn, target.id).await?;
        }
        history::record(conn, rotation_id, target.id, reason).await?;
        verify_rotation(conn, rotation_id).await?;

        info!(
            rotation_id,
            previous = ?current_id,
            next = target.id,
            map = %target.map_short_name,
            ?reason,
            "Rotation next map changed"
        );
        target.is_next = true;
        Ok(target)
    }
}
