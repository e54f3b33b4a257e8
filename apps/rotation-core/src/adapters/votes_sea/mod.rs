//! SeaORM adapter for map-change and skip votes.
//!
//! Duplicate votes are rejected by the unique indexes on
//! `(player_id, rotation_map_id)`, `(player_id, rotation_id)` and
//! `(player_id, in_progress_game_id)`; nothing here pre-checks.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QuerySelect, Set,
};

use crate::entities::{map_votes, skip_map_votes};

pub mod dto;

pub use dto::{MapVoteCreate, SkipTarget, SkipVoteCreate};

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

pub async fn insert_map_vote<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: MapVoteCreate,
) -> Result<map_votes::Model, sea_orm::DbErr> {
    let vote = map_votes::ActiveModel {
        id: NotSet,
        channel_id: Set(dto.channel_id),
        player_id: Set(dto.player_id),
        rotation_map_id: Set(dto.rotation_map_id),
        created_at: Set(time::OffsetDateTime::now_utc()),
    };

    vote.insert(conn).await
}

pub async fn insert_skip_vote<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: SkipVoteCreate,
) -> Result<skip_map_votes::Model, sea_orm::DbErr> {
    let (rotation_id, game_id) = match dto.target {
        SkipTarget::Rotation(id) => (Some(id), None),
        SkipTarget::Game(id) => (None, Some(id)),
    };
    let vote = skip_map_votes::ActiveModel {
        id: NotSet,
        channel_id: Set(dto.channel_id),
        player_id: Set(dto.player_id),
        rotation_id: Set(rotation_id),
        in_progress_game_id: Set(game_id),
        created_at: Set(time::OffsetDateTime::now_utc()),
    };

    vote.insert(conn).await
}

pub async fn count_map_votes<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    rotation_map_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    map_votes::Entity::find()
        .filter(map_votes::Column::RotationMapId.eq(rotation_map_id))
        .count(conn)
        .await
}

pub async fn count_skip_votes<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    target: SkipTarget,
) -> Result<u64, sea_orm::DbErr> {
    let query = match target {
        SkipTarget::Rotation(id) => {
            skip_map_votes::Entity::find().filter(skip_map_votes::Column::RotationId.eq(id))
        }
        SkipTarget::Game(id) => skip_map_votes::Entity::find()
            .filter(skip_map_votes::Column::InProgressGameId.eq(id)),
    };
    query.count(conn).await
}

/// Map-vote counts per membership row, for rows that have any votes.
pub async fn tally_map_votes<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    rotation_map_ids: Vec<i64>,
) -> Result<Vec<(i64, i64)>, sea_orm::DbErr> {
    if rotation_map_ids.is_empty() {
        return Ok(Vec::new());
    }
    map_votes::Entity::find()
        .select_only()
        .column(map_votes::Column::RotationMapId)
        .column_as(Expr::col(map_votes::Column::Id).count(), "votes")
        .filter(map_votes::Column::RotationMapId.is_in(rotation_map_ids))
        .group_by(map_votes::Column::RotationMapId)
        .into_tuple::<(i64, i64)>()
        .all(conn)
        .await
}

pub async fn delete_map_votes_for_rows<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    rotation_map_ids: Vec<i64>,
) -> Result<u64, sea_orm::DbErr> {
    if rotation_map_ids.is_empty() {
        return Ok(0);
    }
    let result = map_votes::Entity::delete_many()
        .filter(map_votes::Column::RotationMapId.is_in(rotation_map_ids))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

pub async fn delete_skip_votes<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    target: SkipTarget,
) -> Result<u64, sea_orm::DbErr> {
    let query = match target {
        SkipTarget::Rotation(id) => skip_map_votes::Entity::delete_many()
            .filter(skip_map_votes::Column::RotationId.eq(id)),
        SkipTarget::Game(id) => skip_map_votes::Entity::delete_many()
            .filter(skip_map_votes::Column::InProgressGameId.eq(id)),
    };
    let result = query.exec(conn).await?;
    Ok(result.rows_affected)
}

/// Delete a player's map votes, optionally only those on the given rows.
pub async fn delete_player_map_votes<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
    rotation_map_ids: Option<Vec<i64>>,
) -> Result<u64, sea_orm::DbErr> {
    let mut query =
        map_votes::Entity::delete_many().filter(map_votes::Column::PlayerId.eq(player_id));
    if let Some(ids) = rotation_map_ids {
        if ids.is_empty() {
            return Ok(0);
        }
        query = query.filter(map_votes::Column::RotationMapId.is_in(ids));
    }
    let result = query.exec(conn).await?;
    Ok(result.rows_affected)
}

pub async fn delete_player_skip_votes<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let result = skip_map_votes::Entity::delete_many()
        .filter(skip_map_votes::Column::PlayerId.eq(player_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}
