//! Rotation pointer history for domain layer.

use std::collections::HashMap;

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;

use crate::adapters::{history_sea, maps_sea};
use crate::entities::rotation_map_history::PointerChangeReason;
use crate::errors::domain::DomainError;

/// One pointer change, newest first when listed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub rotation_id: i64,
    pub rotation_map_id: i64,
    pub map_short_name: String,
    pub map_full_name: String,
    pub reason: PointerChangeReason,
    #[serde(with = "time::serde::rfc3339")]
    pub selected_at: OffsetDateTime,
}

pub async fn record<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    rotation_id: i64,
    rotation_map_id: i64,
    reason: PointerChangeReason,
) -> Result<(), DomainError> {
    history_sea::record(conn, rotation_id, rotation_map_id, reason).await?;
    Ok(())
}

pub async fn list_recent<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    rotation_id: i64,
    limit: u64,
) -> Result<Vec<HistoryEntry>, DomainError> {
    let rows = history_sea::list_recent(conn, rotation_id, limit).await?;

    let map_ids: Vec<i64> = rows
        .iter()
        .filter_map(|(_, rm)| rm.as_ref().map(|rm| rm.map_id))
        .collect();
    let maps: HashMap<i64, (String, String)> = maps_sea::find_by_ids(conn, map_ids)
        .await?
        .into_iter()
        .map(|m| (m.id, (m.short_name, m.full_name)))
        .collect();

    Ok(rows
        .into_iter()
        .map(|(entry, rotation_map)| {
            let (short, full) = rotation_map
                .and_then(|rm| maps.get(&rm.map_id).cloned())
                .unwrap_or_default();
            HistoryEntry {
                rotation_id: entry.rotation_id,
                rotation_map_id: entry.rotation_map_id,
                map_short_name: short,
                map_full_name: full,
                reason: entry.reason,
                selected_at: entry.selected_at,
            }
        })
        .collect())
}
