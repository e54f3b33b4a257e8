//! SeaORM adapter for queues.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::adapters::rotations_sea::name_key;
use crate::entities::queues;

pub mod dto;

pub use dto::QueueCreate;

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    queue_id: i64,
) -> Result<Option<queues::Model>, sea_orm::DbErr> {
    queues::Entity::find_by_id(queue_id).one(conn).await
}

pub async fn find_by_name<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
) -> Result<Option<queues::Model>, sea_orm::DbErr> {
    queues::Entity::find()
        .filter(queues::Column::NameKey.eq(name_key(name)))
        .one(conn)
        .await
}

/// Queues drawing their maps from the given rotation.
pub async fn find_by_rotation<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    rotation_id: i64,
) -> Result<Vec<queues::Model>, sea_orm::DbErr> {
    queues::Entity::find()
        .filter(queues::Column::RotationId.eq(rotation_id))
        .order_by_asc(queues::Column::NameKey)
        .all(conn)
        .await
}

pub async fn create_queue<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: QueueCreate,
) -> Result<queues::Model, sea_orm::DbErr> {
    let name = dto.name.trim().to_string();
    let queue_active = queues::ActiveModel {
        id: NotSet,
        name_key: Set(name_key(&name)),
        name: Set(name),
        size: Set(dto.size),
        rotation_id: Set(dto.rotation_id),
        vote_threshold: Set(dto.vote_threshold),
        created_at: Set(time::OffsetDateTime::now_utc()),
    };

    queue_active.insert(conn).await
}

pub async fn set_rotation<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    queue_id: i64,
    rotation_id: Option<i64>,
) -> Result<u64, sea_orm::DbErr> {
    let result = queues::Entity::update_many()
        .col_expr(queues::Column::RotationId, Expr::val(rotation_id).into())
        .filter(queues::Column::Id.eq(queue_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

pub async fn set_vote_threshold<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    queue_id: i64,
    vote_threshold: Option<i32>,
) -> Result<u64, sea_orm::DbErr> {
    let result = queues::Entity::update_many()
        .col_expr(queues::Column::VoteThreshold, Expr::val(vote_threshold).into())
        .filter(queues::Column::Id.eq(queue_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}
