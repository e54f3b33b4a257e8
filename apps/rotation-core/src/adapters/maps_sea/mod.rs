//! SeaORM adapter for the map catalog - generic over ConnectionTrait.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::entities::{maps, rotation_maps};

pub mod dto;

pub use dto::MapCreate;

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

/// Look up a map by short name. Short names are stored upper-cased, so the
/// caller's casing does not matter.
pub async fn find_by_short_name<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    short_name: &str,
) -> Result<Option<maps::Model>, sea_orm::DbErr> {
    maps::Entity::find()
        .filter(maps::Column::ShortName.eq(short_name.to_uppercase()))
        .one(conn)
        .await
}

pub async fn find_by_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    map_ids: Vec<i64>,
) -> Result<Vec<maps::Model>, sea_orm::DbErr> {
    if map_ids.is_empty() {
        return Ok(Vec::new());
    }
    maps::Entity::find()
        .filter(maps::Column::Id.is_in(map_ids))
        .all(conn)
        .await
}

pub async fn list_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<maps::Model>, sea_orm::DbErr> {
    maps::Entity::find()
        .order_by_asc(maps::Column::ShortName)
        .all(conn)
        .await
}

pub async fn create_map<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: MapCreate,
) -> Result<maps::Model, sea_orm::DbErr> {
    let map_active = maps::ActiveModel {
        id: NotSet,
        full_name: Set(dto.full_name),
        short_name: Set(dto.short_name.to_uppercase()),
        created_at: Set(time::OffsetDateTime::now_utc()),
    };

    map_active.insert(conn).await
}

/// Number of rotations the map currently belongs to.
pub async fn count_memberships<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    map_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    rotation_maps::Entity::find()
        .filter(rotation_maps::Column::MapId.eq(map_id))
        .count(conn)
        .await
}

pub async fn delete_map<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    map_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let result = maps::Entity::delete_many()
        .filter(maps::Column::Id.eq(map_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}
