//! SeaORM adapter for vote-passed waitlist markers.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};
use time::OffsetDateTime;

use crate::entities::vote_passed_waitlists;

pub mod dto;

pub use dto::WaitlistCreate;

pub async fn create_marker<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: WaitlistCreate,
) -> Result<vote_passed_waitlists::Model, sea_orm::DbErr> {
    let marker = vote_passed_waitlists::ActiveModel {
        id: NotSet,
        channel_id: Set(dto.channel_id),
        guild_id: Set(dto.guild_id),
        rotation_id: Set(dto.rotation_id),
        end_waitlist_at: Set(dto.end_waitlist_at),
        created_at: Set(OffsetDateTime::now_utc()),
    };

    marker.insert(conn).await
}

/// Markers whose delay has elapsed, oldest deadline first.
pub async fn find_due<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    now: OffsetDateTime,
) -> Result<Vec<vote_passed_waitlists::Model>, sea_orm::DbErr> {
    vote_passed_waitlists::Entity::find()
        .filter(vote_passed_waitlists::Column::EndWaitlistAt.lte(now))
        .order_by_asc(vote_passed_waitlists::Column::EndWaitlistAt)
        .order_by_asc(vote_passed_waitlists::Column::Id)
        .all(conn)
        .await
}

pub async fn find_by_rotation<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    rotation_id: i64,
) -> Result<Vec<vote_passed_waitlists::Model>, sea_orm::DbErr> {
    vote_passed_waitlists::Entity::find()
        .filter(vote_passed_waitlists::Column::RotationId.eq(rotation_id))
        .order_by_asc(vote_passed_waitlists::Column::Id)
        .all(conn)
        .await
}

pub async fn delete_marker<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    marker_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let result = vote_passed_waitlists::Entity::delete_many()
        .filter(vote_passed_waitlists::Column::Id.eq(marker_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}
