//! SeaORM adapter for rotations - generic over ConnectionTrait.
//!
//! Every write that must serialize against other writers of the same rotation
//! goes through [`claim_rotation`] (or one of its column-updating wrappers),
//! which bumps `lock_version` only if nobody else has since the row was read.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::rotations;

pub mod dto;

pub use dto::{RotationCreate, RotationRename, RotationSetRandom};

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

/// Case-insensitive lookup key for rotation names.
pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Apply an optimistic update with lock version check, then refetch.
///
/// Zero affected rows means either the rotation is gone (`RecordNotFound`)
/// or another transaction claimed it first (`OPTIMISTIC_LOCK` payload).
async fn optimistic_update_then_fetch<C, F>(
    conn: &C,
    id: i64,
    current_lock_version: i32,
    configure_update: F,
) -> Result<rotations::Model, sea_orm::DbErr>
where
    C: ConnectionTrait + Send + Sync,
    F: FnOnce(sea_orm::UpdateMany<rotations::Entity>) -> sea_orm::UpdateMany<rotations::Entity>,
{
    let now = time::OffsetDateTime::now_utc();

    let result = configure_update(rotations::Entity::update_many())
        .col_expr(rotations::Column::UpdatedAt, Expr::val(now).into())
        .col_expr(
            rotations::Column::LockVersion,
            Expr::col(rotations::Column::LockVersion).add(1),
        )
        .filter(rotations::Column::Id.eq(id))
        .filter(rotations::Column::LockVersion.eq(current_lock_version))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        let rotation = rotations::Entity::find_by_id(id).one(conn).await?;
        if let Some(rotation) = rotation {
            let payload = format!(
                "OPTIMISTIC_LOCK:{{\"rotation_id\":{},\"expected\":{},\"actual\":{}}}",
                id, current_lock_version, rotation.lock_version
            );
            return Err(sea_orm::DbErr::Custom(payload));
        } else {
            return Err(sea_orm::DbErr::RecordNotFound(
                "Rotation not found".to_string(),
            ));
        }
    }

    require_rotation(conn, id).await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    rotation_id: i64,
) -> Result<Option<rotations::Model>, sea_orm::DbErr> {
    rotations::Entity::find_by_id(rotation_id).one(conn).await
}

pub async fn require_rotation<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    rotation_id: i64,
) -> Result<rotations::Model, sea_orm::DbErr> {
    find_by_id(conn, rotation_id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("Rotation not found".to_string()))
}

pub async fn find_by_name<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
) -> Result<Option<rotations::Model>, sea_orm::DbErr> {
    rotations::Entity::find()
        .filter(rotations::Column::NameKey.eq(name_key(name)))
        .one(conn)
        .await
}

pub async fn list_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<rotations::Model>, sea_orm::DbErr> {
    rotations::Entity::find()
        .order_by_asc(rotations::Column::NameKey)
        .all(conn)
        .await
}

pub async fn create_rotation<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: RotationCreate,
) -> Result<rotations::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let name = dto.name.trim().to_string();
    let rotation_active = rotations::ActiveModel {
        id: NotSet,
        name_key: Set(name_key(&name)),
        name: Set(name),
        is_random: Set(dto.is_random),
        lock_version: Set(0),
        created_at: Set(now),
        updated_at: Set(now),
    };

    rotation_active.insert(conn).await
}

/// Claim the rotation for the current transaction without changing any
/// other column.
pub async fn claim_rotation<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    rotation_id: i64,
    current_lock_version: i32,
) -> Result<rotations::Model, sea_orm::DbErr> {
    optimistic_update_then_fetch(conn, rotation_id, current_lock_version, |update| update).await
}

pub async fn rename_rotation<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: RotationRename,
) -> Result<rotations::Model, sea_orm::DbErr> {
    let name = dto.name.trim().to_string();
    let key = name_key(&name);
    optimistic_update_then_fetch(conn, dto.id, dto.current_lock_version, |update| {
        update
            .col_expr(rotations::Column::Name, Expr::val(name).into())
            .col_expr(rotations::Column::NameKey, Expr::val(key).into())
    })
    .await
}

pub async fn set_random<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: RotationSetRandom,
) -> Result<rotations::Model, sea_orm::DbErr> {
    optimistic_update_then_fetch(conn, dto.id, dto.current_lock_version, |update| {
        update.col_expr(rotations::Column::IsRandom, Expr::val(dto.is_random).into())
    })
    .await
}

pub async fn delete_rotation<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    rotation_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let result = rotations::Entity::delete_many()
        .filter(rotations::Column::Id.eq(rotation_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}
