use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "queues")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "name")]
    pub name: String,
    #[sea_orm(column_name = "name_key")]
    pub name_key: String,
    #[sea_orm(column_name = "size")]
    pub size: i32,
    #[sea_orm(column_name = "rotation_id")]
    pub rotation_id: Option<i64>,
    #[sea_orm(column_name = "vote_threshold")]
    pub vote_threshold: Option<i32>,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::rotations::Entity",
        from = "Column::RotationId",
        to = "super::rotations::Column::Id"
    )]
    Rotation,
}

impl Related<super::rotations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Rotation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
