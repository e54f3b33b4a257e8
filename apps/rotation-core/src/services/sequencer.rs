//! Ordinal Sequencer: dense `1..=k` ordering of the maps in a rotation.
//!
//! Callers must hold the rotation's claim (see `repos::rotations::claim`)
//! before calling any mutating method, so the count read at the start of an
//! operation is still true when its shift executes.

use sea_orm::ConnectionTrait;
use tracing::{debug, error};

use crate::domain::ordinals::{check_dense, plan_insert, plan_move, plan_remove, MovePlan};
use crate::domain::pointer::check_pointer;
use crate::entities::rotation_map_history::PointerChangeReason;
use crate::errors::domain::DomainError;
use crate::repos::rotation_maps::{self, RotationMapEntry};
use crate::repos::history;
use crate::services::pointer::RotationPointer;

#[derive(Debug, Default, Clone, Copy)]
pub struct OrdinalSequencer;

impl OrdinalSequencer {
    pub fn new() -> Self {
        Self
    }

    /// Insert a map at `requested` (clamped to `k + 1`).
    ///
    /// The first map of an empty rotation becomes its next map. A map that
    /// is already a member fails with `DuplicateMembership` from the unique
    /// index; the surrounding transaction discards the shift.
    pub async fn insert<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        rotation_id: i64,
        map_id: i64,
        requested: i32,
    ) -> Result<RotationMapEntry, DomainError> {
        let count = rotation_maps::count_for_rotation(conn, rotation_id).await?;
        let plan = plan_insert(count, requested)?;
        debug!(rotation_id, map_id, requested, ordinal = plan.ordinal, count, "Inserting map into rotation");

        if let Some(shift) = plan.shift {
            rotation_maps::apply_shift(conn, rotation_id, shift).await?;
        }

        let is_next = count == 0;
        let entry =
            rotation_maps::create_entry(conn, rotation_id, map_id, plan.ordinal, is_next).await?;
        if is_next {
            history::record(conn, rotation_id, entry.id, PointerChangeReason::Initial).await?;
        }

        verify_rotation(conn, rotation_id).await?;
        Ok(entry)
    }

    /// Remove a member and close the gap it leaves.
    ///
    /// If the member held the next-map flag, the flag is handed to its
    /// successor before the row is deleted. Returns the rotation's next map
    /// after the removal.
    pub async fn remove<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        entry: &RotationMapEntry,
    ) -> Result<Option<RotationMapEntry>, DomainError> {
        let rotation_id = entry.rotation_id;
        let count = rotation_maps::count_for_rotation(conn, rotation_id).await?;
        debug!(rotation_id, rotation_map_id = entry.id, ordinal = entry.ordinal, count, "Removing map from rotation");

        if entry.is_next && count > 1 {
            RotationPointer::new()
                .promote_next(conn, rotation_id, PointerChangeReason::Removal)
                .await?;
        }

        rotation_maps::delete_entry(conn, entry.id).await?;
        if let Some(shift) = plan_remove(count, entry.ordinal) {
            rotation_maps::apply_shift(conn, rotation_id, shift).await?;
        }

        verify_rotation(conn, rotation_id).await?;
        rotation_maps::find_next(conn, rotation_id).await
    }

    /// Move a member to `requested` (clamped to `k`). Rows strictly between
    /// the old and new position shift by one; the next-map flag stays with
    /// its row.
    pub async fn move_to<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        entry: &RotationMapEntry,
        requested: i32,
    ) -> Result<RotationMapEntry, DomainError> {
        let rotation_id = entry.rotation_id;
        let count = rotation_maps::count_for_rotation(conn, rotation_id).await?;

        match plan_move(count, entry.ordinal, requested)? {
            MovePlan::Unchanged { .. } => Ok(entry.clone()),
            MovePlan::Move { from, to, shift } => {
                debug!(rotation_id, rotation_map_id = entry.id, from, to, "Moving map within rotation");
                rotation_maps::park(conn, entry.id).await?;
                rotation_maps::apply_shift(conn, rotation_id, shift).await?;
                rotation_maps::set_ordinal(conn, entry.id, to).await?;

                verify_rotation(conn, rotation_id).await?;
                rotation_maps::require_by_id(conn, entry.id).await
            }
        }
    }
}

/// Re-read the rotation and check both ordering invariants.
///
/// A failure is a bug, not a user error: it is logged and returned so the
/// enclosing transaction rolls back.
pub async fn verify_rotation<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    rotation_id: i64,
) -> Result<Vec<RotationMapEntry>, DomainError> {
    let entries = rotation_maps::list_for_rotation(conn, rotation_id).await?;

    let ordinals: Vec<i32> = entries.iter().map(|e| e.ordinal).collect();
    let flagged = entries.iter().filter(|e| e.is_next).count();

    if let Err(err) = check_dense(&ordinals).and_then(|_| check_pointer(entries.len(), flagged)) {
        error!(rotation_id, ?ordinals, flagged, error = %err, "Rotation invariant violated");
        return Err(err);
    }
    Ok(entries)
}
