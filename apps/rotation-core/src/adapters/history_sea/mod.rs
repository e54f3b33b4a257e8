//! SeaORM adapter for rotation pointer history.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use crate::entities::rotation_map_history::{self, PointerChangeReason};
use crate::entities::rotation_maps;

pub async fn record<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    rotation_id: i64,
    rotation_map_id: i64,
    reason: PointerChangeReason,
) -> Result<rotation_map_history::Model, sea_orm::DbErr> {
    let entry = rotation_map_history::ActiveModel {
        id: NotSet,
        rotation_id: Set(rotation_id),
        rotation_map_id: Set(rotation_map_id),
        reason: Set(reason),
        selected_at: Set(time::OffsetDateTime::now_utc()),
    };

    entry.insert(conn).await
}

/// Newest entries first, joined with the membership row they selected.
pub async fn list_recent<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    rotation_id: i64,
    limit: u64,
) -> Result<Vec<(rotation_map_history::Model, Option<rotation_maps::Model>)>, sea_orm::DbErr> {
    rotation_map_history::Entity::find()
        .filter(rotation_map_history::Column::RotationId.eq(rotation_id))
        .order_by_desc(rotation_map_history::Column::SelectedAt)
        .order_by_desc(rotation_map_history::Column::Id)
        .limit(limit)
        .find_also_related(rotation_maps::Entity)
        .all(conn)
        .await
}
