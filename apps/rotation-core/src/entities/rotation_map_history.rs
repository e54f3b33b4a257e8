use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Why the rotation pointer moved
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum PointerChangeReason {
    /// First map added to an empty rotation
    #[sea_orm(string_value = "INITIAL")]
    Initial,
    /// Advanced to the following ordinal
    #[sea_orm(string_value = "PROMOTED")]
    Promoted,
    /// Admin picked the map directly
    #[sea_orm(string_value = "OVERRIDE")]
    Override,
    /// A map-change vote passed
    #[sea_orm(string_value = "MAP_VOTE")]
    MapVote,
    /// A skip vote passed
    #[sea_orm(string_value = "SKIP_VOTE")]
    SkipVote,
    /// The flagged map was removed from the rotation
    #[sea_orm(string_value = "REMOVAL")]
    Removal,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rotation_map_history")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "rotation_id")]
    pub rotation_id: i64,
    #[sea_orm(column_name = "rotation_map_id")]
    pub rotation_map_id: i64,
    #[sea_orm(column_name = "reason")]
    pub reason: PointerChangeReason,
    #[sea_orm(column_name = "selected_at")]
    pub selected_at: OffsetDateTime,
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
