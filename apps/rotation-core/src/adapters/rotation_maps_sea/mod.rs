//! SeaORM adapter for rotation membership rows.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::entities::{maps, rotation_maps};

pub mod dto;

pub use dto::{OrdinalShift, RotationMapCreate};

/// Ordinal a row is parked at while its siblings shift around it.
pub const PARKED_ORDINAL: i32 = 0;

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

/// All rows of a rotation in ordinal order, joined with their map.
pub async fn list_with_maps<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    rotation_id: i64,
) -> Result<Vec<(rotation_maps::Model, Option<maps::Model>)>, sea_orm::DbErr> {
    rotation_maps::Entity::find()
        .filter(rotation_maps::Column::RotationId.eq(rotation_id))
        .order_by_asc(rotation_maps::Column::Ordinal)
        .find_also_related(maps::Entity)
        .all(conn)
        .await
}

pub async fn find_by_id_with_map<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    rotation_map_id: i64,
) -> Result<Option<(rotation_maps::Model, Option<maps::Model>)>, sea_orm::DbErr> {
    rotation_maps::Entity::find_by_id(rotation_map_id)
        .find_also_related(maps::Entity)
        .one(conn)
        .await
}

pub async fn find_by_rotation_and_map<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    rotation_id: i64,
    map_id: i64,
) -> Result<Option<rotation_maps::Model>, sea_orm::DbErr> {
    rotation_maps::Entity::find()
        .filter(rotation_maps::Column::RotationId.eq(rotation_id))
        .filter(rotation_maps::Column::MapId.eq(map_id))
        .one(conn)
        .await
}

/// The row flagged `is_next`, joined with its map.
pub async fn find_next_with_map<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    rotation_id: i64,
) -> Result<Option<(rotation_maps::Model, Option<maps::Model>)>, sea_orm::DbErr> {
    rotation_maps::Entity::find()
        .filter(rotation_maps::Column::RotationId.eq(rotation_id))
        .filter(rotation_maps::Column::IsNext.eq(true))
        .find_also_related(maps::Entity)
        .one(conn)
        .await
}

pub async fn count_by_rotation<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    rotation_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    rotation_maps::Entity::find()
        .filter(rotation_maps::Column::RotationId.eq(rotation_id))
        .count(conn)
        .await
}

/// Ids of every membership row of a map, across all rotations.
pub async fn find_ids_by_map<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    map_id: i64,
) -> Result<Vec<i64>, sea_orm::DbErr> {
    rotation_maps::Entity::find()
        .select_only()
        .column(rotation_maps::Column::Id)
        .filter(rotation_maps::Column::MapId.eq(map_id))
        .into_tuple::<i64>()
        .all(conn)
        .await
}

pub async fn find_ids_by_rotation<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    rotation_id: i64,
) -> Result<Vec<i64>, sea_orm::DbErr> {
    rotation_maps::Entity::find()
        .select_only()
        .column(rotation_maps::Column::Id)
        .filter(rotation_maps::Column::RotationId.eq(rotation_id))
        .into_tuple::<i64>()
        .all(conn)
        .await
}

pub async fn create_rotation_map<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: RotationMapCreate,
) -> Result<rotation_maps::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let row = rotation_maps::ActiveModel {
        id: NotSet,
        rotation_id: Set(dto.rotation_id),
        map_id: Set(dto.map_id),
        ordinal: Set(dto.ordinal),
        is_next: Set(dto.is_next),
        created_at: Set(now),
        updated_at: Set(now),
    };

    row.insert(conn).await
}

/// Move every row with ordinal in `[from, to]` by `delta`.
///
/// Runs as two statements: the range is first negated with the delta already
/// applied, then flipped back positive. No intermediate state ever holds two
/// rows at the same ordinal, so the `(rotation_id, ordinal)` unique index is
/// satisfied statement by statement on backends that check it per row.
pub async fn shift_ordinals<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    shift: OrdinalShift,
) -> Result<u64, sea_orm::DbErr> {
    if shift.from > shift.to || shift.delta == 0 {
        return Ok(0);
    }
    let now = time::OffsetDateTime::now_utc();

    let negated = rotation_maps::Entity::update_many()
        .col_expr(
            rotation_maps::Column::Ordinal,
            Expr::val(-shift.delta).sub(Expr::col(rotation_maps::Column::Ordinal)),
        )
        .col_expr(rotation_maps::Column::UpdatedAt, Expr::val(now).into())
        .filter(rotation_maps::Column::RotationId.eq(shift.rotation_id))
        .filter(rotation_maps::Column::Ordinal.between(shift.from, shift.to))
        .exec(conn)
        .await?;

    rotation_maps::Entity::update_many()
        .col_expr(
            rotation_maps::Column::Ordinal,
            Expr::val(0).sub(Expr::col(rotation_maps::Column::Ordinal)),
        )
        .filter(rotation_maps::Column::RotationId.eq(shift.rotation_id))
        .filter(rotation_maps::Column::Ordinal.lt(0))
        .exec(conn)
        .await?;

    Ok(negated.rows_affected)
}

pub async fn set_ordinal<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    rotation_map_id: i64,
    ordinal: i32,
) -> Result<(), sea_orm::DbErr> {
    rotation_maps::Entity::update_many()
        .col_expr(rotation_maps::Column::Ordinal, Expr::val(ordinal).into())
        .col_expr(
            rotation_maps::Column::UpdatedAt,
            Expr::val(time::OffsetDateTime::now_utc()).into(),
        )
        .filter(rotation_maps::Column::Id.eq(rotation_map_id))
        .exec(conn)
        .await?;
    Ok(())
}

/// Clear the `is_next` flag on every row of the rotation.
pub async fn clear_next<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    rotation_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let result = rotation_maps::Entity::update_many()
        .col_expr(rotation_maps::Column::IsNext, Expr::val(false).into())
        .col_expr(
            rotation_maps::Column::UpdatedAt,
            Expr::val(time::OffsetDateTime::now_utc()).into(),
        )
        .filter(rotation_maps::Column::RotationId.eq(rotation_id))
        .filter(rotation_maps::Column::IsNext.eq(true))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

/// Flag a single row as next. Callers clear the previous holder first.
pub async fn mark_next<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    rotation_map_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let result = rotation_maps::Entity::update_many()
        .col_expr(rotation_maps::Column::IsNext, Expr::val(true).into())
        .col_expr(
            rotation_maps::Column::UpdatedAt,
            Expr::val(time::OffsetDateTime::now_utc()).into(),
        )
        .filter(rotation_maps::Column::Id.eq(rotation_map_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

pub async fn delete_rotation_map<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    rotation_map_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let result = rotation_maps::Entity::delete_many()
        .filter(rotation_maps::Column::Id.eq(rotation_map_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}
