use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rotation_maps")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "rotation_id")]
    pub rotation_id: i64,
    #[sea_orm(column_name = "map_id")]
    pub map_id: i64,
    /// 1-based, dense within a rotation
    #[sea_orm(column_name = "ordinal")]
    pub ordinal: i32,
    #[sea_orm(column_name = "is_next")]
    pub is_next: bool,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::rotations::Entity",
        from = "Column::RotationId",
        to = "super::rotations::Column::Id"
    )]
    Rotation,
    #[sea_orm(
        belongs_to = "super::maps::Entity",
        from = "Column::MapId",
        to = "super::maps::Column::Id"
    )]
    Map,
    #[sea_orm(has_many = "super::map_votes::Entity")]
    MapVotes,
}

impl Related<super::rotations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Rotation.def()
    }
}

impl Related<super::maps::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Map.def()
    }
}

impl Related<super::map_votes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MapVotes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
