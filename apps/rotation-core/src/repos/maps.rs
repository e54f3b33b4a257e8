//! Map catalog repository functions for domain layer.

use sea_orm::ConnectionTrait;
use serde::Serialize;

use crate::adapters::maps_sea as maps_adapter;
use crate::entities::maps;
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind, ValidationKind};
use crate::infra::db_errors::{is_foreign_key_violation, map_db_err};

/// Map domain model
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Map {
    pub id: i64,
    pub full_name: String,
    pub short_name: String,
}

impl From<maps::Model> for Map {
    fn from(model: maps::Model) -> Self {
        Self {
            id: model.id,
            full_name: model.full_name,
            short_name: model.short_name,
        }
    }
}

pub async fn find_by_short_name<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    short_name: &str,
) -> Result<Option<Map>, DomainError> {
    let map = maps_adapter::find_by_short_name(conn, short_name.trim()).await?;
    Ok(map.map(Map::from))
}

pub async fn require_by_short_name<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    short_name: &str,
) -> Result<Map, DomainError> {
    find_by_short_name(conn, short_name).await?.ok_or_else(|| {
        DomainError::not_found(
            NotFoundKind::Map,
            format!("No map with short name '{}'", short_name.trim()),
        )
    })
}

pub async fn list_all<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<Vec<Map>, DomainError> {
    let maps = maps_adapter::list_all(conn).await?;
    Ok(maps.into_iter().map(Map::from).collect())
}

pub async fn create_map<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    full_name: &str,
    short_name: &str,
) -> Result<Map, DomainError> {
    let full_name = full_name.trim();
    let short_name = short_name.trim();
    if full_name.is_empty() || short_name.is_empty() {
        return Err(DomainError::validation(
            ValidationKind::InvalidName,
            "Map full and short names must not be empty",
        ));
    }
    let map = maps_adapter::create_map(conn, maps_adapter::MapCreate::new(full_name, short_name))
        .await?;
    Ok(Map::from(map))
}

pub async fn count_memberships<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    map_id: i64,
) -> Result<u64, DomainError> {
    Ok(maps_adapter::count_memberships(conn, map_id).await?)
}

pub async fn delete_map<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    map_id: i64,
) -> Result<(), DomainError> {
    // the only foreign key pointing at maps is the RESTRICT from rotation_maps
    maps_adapter::delete_map(conn, map_id)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e.to_string()) {
                DomainError::conflict(
                    ConflictKind::MapInUse,
                    "Map is still part of a rotation; remove it from the rotation first",
                )
            } else {
                map_db_err(e)
            }
        })?;
    Ok(())
}
