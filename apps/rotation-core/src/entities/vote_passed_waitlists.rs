use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vote_passed_waitlists")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "channel_id")]
    pub channel_id: i64,
    #[sea_orm(column_name = "guild_id")]
    pub guild_id: i64,
    #[sea_orm(column_name = "rotation_id")]
    pub rotation_id: Option<i64>,
    #[sea_orm(column_name = "end_waitlist_at")]
    pub end_waitlist_at: OffsetDateTime,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
