//! Rotation repository functions for domain layer.

use sea_orm::ConnectionTrait;
use serde::Serialize;

use crate::adapters::rotations_sea as rotations_adapter;
use crate::entities::rotations;
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};

/// Rotation domain model
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rotation {
    pub id: i64,
    pub name: String,
    pub is_random: bool,
    /// Claim counter; bumped by every serialized write to the rotation
    pub lock_version: i32,
}

impl From<rotations::Model> for Rotation {
    fn from(model: rotations::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            is_random: model.is_random,
            lock_version: model.lock_version,
        }
    }
}

fn rotation_not_found(name: &str) -> DomainError {
    DomainError::not_found(
        NotFoundKind::Rotation,
        format!("No rotation named '{}'", name.trim()),
    )
}

/// A claim that finds no row means the rotation was deleted underneath us.
fn claim_err(rotation_id: i64) -> impl FnOnce(sea_orm::DbErr) -> DomainError {
    move |err| match DomainError::from(err) {
        DomainError::NotFound(..) => DomainError::not_found(
            NotFoundKind::Rotation,
            format!("Rotation {rotation_id} not found"),
        ),
        other => other,
    }
}

fn validate_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::validation(
            ValidationKind::InvalidName,
            "Rotation name must not be empty",
        ));
    }
    Ok(())
}

pub async fn find_by_name<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
) -> Result<Option<Rotation>, DomainError> {
    let rotation = rotations_adapter::find_by_name(conn, name).await?;
    Ok(rotation.map(Rotation::from))
}

pub async fn require_by_name<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
) -> Result<Rotation, DomainError> {
    find_by_name(conn, name)
        .await?
        .ok_or_else(|| rotation_not_found(name))
}

pub async fn require_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    rotation_id: i64,
) -> Result<Rotation, DomainError> {
    rotations_adapter::find_by_id(conn, rotation_id)
        .await?
        .map(Rotation::from)
        .ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::Rotation,
                format!("Rotation {rotation_id} not found"),
            )
        })
}

pub async fn list_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Rotation>, DomainError> {
    let rotations = rotations_adapter::list_all(conn).await?;
    Ok(rotations.into_iter().map(Rotation::from).collect())
}

pub async fn create_rotation<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
    is_random: bool,
) -> Result<Rotation, DomainError> {
    validate_name(name)?;
    let dto = rotations_adapter::RotationCreate::new(name).with_random(is_random);
    let rotation = rotations_adapter::create_rotation(conn, dto).await?;
    Ok(Rotation::from(rotation))
}

/// Claim the rotation for this transaction.
///
/// Fails with an optimistic-lock conflict if another transaction claimed it
/// since `rotation` was read.
pub async fn claim<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    rotation: &Rotation,
) -> Result<Rotation, DomainError> {
    let claimed =
        rotations_adapter::claim_rotation(conn, rotation.id, rotation.lock_version)
            .await
            .map_err(claim_err(rotation.id))?;
    Ok(Rotation::from(claimed))
}

pub async fn rename<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    rotation: &Rotation,
    new_name: &str,
) -> Result<Rotation, DomainError> {
    validate_name(new_name)?;
    let dto = rotations_adapter::RotationRename {
        id: rotation.id,
        current_lock_version: rotation.lock_version,
        name: new_name.to_string(),
    };
    let renamed = rotations_adapter::rename_rotation(conn, dto)
        .await
        .map_err(claim_err(rotation.id))?;
    Ok(Rotation::from(renamed))
}

pub async fn set_random<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    rotation: &Rotation,
    is_random: bool,
) -> Result<Rotation, DomainError> {
    let dto = rotations_adapter::RotationSetRandom {
        id: rotation.id,
        current_lock_version: rotation.lock_version,
        is_random,
    };
    let updated = rotations_adapter::set_random(conn, dto)
        .await
        .map_err(claim_err(rotation.id))?;
    Ok(Rotation::from(updated))
}

pub async fn delete_rotation<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    rotation_id: i64,
) -> Result<(), DomainError> {
    rotations_adapter::delete_rotation(conn, rotation_id).await?;
    Ok(())
}
