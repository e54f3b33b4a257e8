use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "maps")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "full_name")]
    pub full_name: String,
    /// Always stored upper-cased
    #[sea_orm(column_name = "short_name")]
    pub short_name: String,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::rotation_maps::Entity")]
    RotationMaps,
}

impl Related<super::rotation_maps::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RotationMaps.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
