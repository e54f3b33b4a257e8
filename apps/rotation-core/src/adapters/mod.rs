//! SeaORM adapters. Every function is generic over `ConnectionTrait` and
//! returns `sea_orm::DbErr`.

pub mod history_sea;
pub mod live_games_sea;
pub mod maps_sea;
pub mod queues_sea;
pub mod rotation_maps_sea;
pub mod rotations_sea;
pub mod votes_sea;
pub mod waitlists_sea;
