//! Rotation membership repository functions for domain layer.

use sea_orm::ConnectionTrait;
use serde::Serialize;

use crate::adapters::rotation_maps_sea as rotation_maps_adapter;
use crate::domain::ordinals::Shift;
use crate::entities::{maps, rotation_maps};
use crate::errors::domain::{DomainError, NotFoundKind};

/// A map's membership in a rotation, with the map's names attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RotationMapEntry {
    pub id: i64,
    pub rotation_id: i64,
    pub map_id: i64,
    pub ordinal: i32,
    pub is_next: bool,
    pub map_full_name: String,
    pub map_short_name: String,
}

impl RotationMapEntry {
    fn from_parts(
        row: rotation_maps::Model,
        map: Option<maps::Model>,
    ) -> Result<Self, DomainError> {
        let map = map.ok_or_else(|| {
            DomainError::invariant(format!(
                "Rotation map {} references missing map {}",
                row.id, row.map_id
            ))
        })?;
        Ok(Self {
            id: row.id,
            rotation_id: row.rotation_id,
            map_id: row.map_id,
            ordinal: row.ordinal,
            is_next: row.is_next,
            map_full_name: map.full_name,
            map_short_name: map.short_name,
        })
    }
}

/// Every entry of the rotation in ordinal order.
pub async fn list_for_rotation<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    rotation_id: i64,
) -> Result<Vec<RotationMapEntry>, DomainError> {
    let rows = rotation_maps_adapter::list_with_maps(conn, rotation_id).await?;
    rows.into_iter()
        .map(|(row, map)| RotationMapEntry::from_parts(row, map))
        .collect()
}

pub async fn find_entry<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    rotation_id: i64,
    map_id: i64,
) -> Result<Option<RotationMapEntry>, DomainError> {
    let Some(row) = rotation_maps_adapter::find_by_rotation_and_map(conn, rotation_id, map_id).await?
    else {
        return Ok(None);
    };
    require_by_id(conn, row.id).await.map(Some)
}

pub async fn require_entry<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    rotation_id: i64,
    map_id: i64,
) -> Result<RotationMapEntry, DomainError> {
    find_entry(conn, rotation_id, map_id).await?.ok_or_else(|| {
        DomainError::not_found(
            NotFoundKind::RotationMap,
            "Map is not part of this rotation",
        )
    })
}

pub async fn require_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    rotation_map_id: i64,
) -> Result<RotationMapEntry, DomainError> {
    let (row, map) = rotation_maps_adapter::find_by_id_with_map(conn, rotation_map_id)
        .await?
        .ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::RotationMap,
                format!("Rotation map {rotation_map_id} not found"),
            )
        })?;
    RotationMapEntry::from_parts(row, map)
}

/// The entry currently flagged as next, if any.
pub async fn find_next<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    rotation_id: i64,
) -> Result<Option<RotationMapEntry>, DomainError> {
    match rotation_maps_adapter::find_next_with_map(conn, rotation_id).await? {
        Some((row, map)) => RotationMapEntry::from_parts(row, map).map(Some),
        None => Ok(None),
    }
}

pub async fn count_for_rotation<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    rotation_id: i64,
) -> Result<i32, DomainError> {
    let count = rotation_maps_adapter::count_by_rotation(conn, rotation_id).await?;
    i32::try_from(count)
        .map_err(|_| DomainError::invariant(format!("Rotation {rotation_id} has {count} maps")))
}

pub async fn ids_for_rotation<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    rotation_id: i64,
) -> Result<Vec<i64>, DomainError> {
    Ok(rotation_maps_adapter::find_ids_by_rotation(conn, rotation_id).await?)
}

pub async fn ids_for_map<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    map_id: i64,
) -> Result<Vec<i64>, DomainError> {
    Ok(rotation_maps_adapter::find_ids_by_map(conn, map_id).await?)
}

pub async fn create_entry<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    rotation_id: i64,
    map_id: i64,
    ordinal: i32,
    is_next: bool,
) -> Result<RotationMapEntry, DomainError> {
    let dto = rotation_maps_adapter::RotationMapCreate {
        rotation_id,
        map_id,
        ordinal,
        is_next,
    };
    let row = rotation_maps_adapter::create_rotation_map(conn, dto).await?;
    require_by_id(conn, row.id).await
}

pub async fn apply_shift<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    rotation_id: i64,
    shift: Shift,
) -> Result<u64, DomainError> {
    let dto = rotation_maps_adapter::OrdinalShift {
        rotation_id,
        from: shift.from,
        to: shift.to,
        delta: shift.delta,
    };
    Ok(rotation_maps_adapter::shift_ordinals(conn, dto).await?)
}

/// Move a row out of the `1..=k` range while its siblings shift.
pub async fn park<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    rotation_map_id: i64,
) -> Result<(), DomainError> {
    rotation_maps_adapter::set_ordinal(conn, rotation_map_id, rotation_maps_adapter::PARKED_ORDINAL)
        .await?;
    Ok(())
}

pub async fn set_ordinal<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    rotation_map_id: i64,
    ordinal: i32,
) -> Result<(), DomainError> {
    rotation_maps_adapter::set_ordinal(conn, rotation_map_id, ordinal).await?;
    Ok(())
}

pub async fn clear_next<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    rotation_id: i64,
) -> Result<u64, DomainError> {
    Ok(rotation_maps_adapter::clear_next(conn, rotation_id).await?)
}

pub async fn mark_next<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    rotation_map_id: i64,
) -> Result<(), DomainError> {
    let updated = rotation_maps_adapter::mark_next(conn, rotation_map_id).await?;
    if updated == 0 {
        return Err(DomainError::not_found(
            NotFoundKind::RotationMap,
            format!("Rotation map {rotation_map_id} not found"),
        ));
    }
    Ok(())
}

pub async fn delete_entry<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    rotation_map_id: i64,
) -> Result<(), DomainError> {
    rotation_maps_adapter::delete_rotation_map(conn, rotation_map_id).await?;
    Ok(())
}
