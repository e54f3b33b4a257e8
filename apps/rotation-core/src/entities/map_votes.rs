use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "map_votes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "channel_id")]
    pub channel_id: i64,
    #[sea_orm(column_name = "player_id")]
    pub player_id: i64,
    #[sea_orm(column_name = "rotation_map_id")]
    pub rotation_map_id: i64,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::rotation_maps::Entity",
        from = "Column::RotationMapId",
        to = "super::rotation_maps::Column::Id"
    )]
    RotationMap,
}

impl Related<super::rotation_maps::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RotationMap.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
