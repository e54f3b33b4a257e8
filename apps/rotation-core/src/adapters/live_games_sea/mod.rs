//! SeaORM adapter for in-progress games.
//!
//! Games and their rosters are written by the match lifecycle owner; this
//! crate only reads membership and rewrites the map of a skipped game.

use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect};

use crate::entities::{in_progress_game_players, in_progress_games};

/// Games the player is rostered in, newest first.
pub async fn find_games_for_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
    limit: u64,
) -> Result<Vec<in_progress_games::Model>, sea_orm::DbErr> {
    in_progress_games::Entity::find()
        .inner_join(in_progress_game_players::Entity)
        .filter(in_progress_game_players::Column::PlayerId.eq(player_id))
        .order_by_desc(in_progress_games::Column::CreatedAt)
        .order_by_desc(in_progress_games::Column::Id)
        .limit(limit)
        .all(conn)
        .await
}

pub async fn update_map<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    map_full_name: &str,
    map_short_name: &str,
) -> Result<u64, sea_orm::DbErr> {
    let result = in_progress_games::Entity::update_many()
        .col_expr(
            in_progress_games::Column::MapFullName,
            Expr::val(map_full_name).into(),
        )
        .col_expr(
            in_progress_games::Column::MapShortName,
            Expr::val(map_short_name).into(),
        )
        .col_expr(
            in_progress_games::Column::UpdatedAt,
            Expr::val(time::OffsetDateTime::now_utc()).into(),
        )
        .filter(in_progress_games::Column::Id.eq(game_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}
