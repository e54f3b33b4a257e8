//! SeaORM -> DomainError translation helpers.
//!
//! Adapters return `sea_orm::DbErr`; repos and services convert it into
//! `crate::errors::domain::DomainError` here, and the command surface then
//! maps `DomainError` to `AppError` via `From`.

use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// Extract the column list from SQLite "UNIQUE constraint failed: t.a, t.b" messages.
fn extract_sqlite_columns(error_msg: &str) -> Option<&str> {
    let marker = "UNIQUE constraint failed: ";
    let start = error_msg.find(marker)? + marker.len();
    let rest = &error_msg[start..];
    let end = rest.find(['\n', '"', ')']).unwrap_or(rest.len());
    Some(rest[..end].trim())
}

/// Map SQLite column lists to domain-specific conflict errors.
fn map_sqlite_columns_to_conflict(columns: &str) -> Option<(ConflictKind, &'static str)> {
    match columns {
        "map_votes.player_id, map_votes.rotation_map_id" => {
            Some((ConflictKind::AlreadyVoted, "You have already voted for this map"))
        }
        "skip_map_votes.player_id, skip_map_votes.rotation_id"
        | "skip_map_votes.player_id, skip_map_votes.in_progress_game_id" => {
            Some((ConflictKind::AlreadyVoted, "You have already voted to skip"))
        }
        "rotation_maps.rotation_id, rotation_maps.map_id" => Some((
            ConflictKind::DuplicateMembership,
            "Map is already in this rotation",
        )),
        "maps.full_name" | "maps.short_name" => {
            Some((ConflictKind::DuplicateName, "A map with that name already exists"))
        }
        "rotations.name_key" => Some((
            ConflictKind::DuplicateName,
            "A rotation with that name already exists",
        )),
        "queues.name_key" => Some((
            ConflictKind::DuplicateName,
            "A queue with that name already exists",
        )),
        _ => None,
    }
}

/// Map PostgreSQL constraint names to domain-specific conflict errors.
fn map_postgres_constraint_to_conflict(error_msg: &str) -> Option<(ConflictKind, &'static str)> {
    if error_msg.contains("ux_map_votes_player_rotation_map") {
        return Some((ConflictKind::AlreadyVoted, "You have already voted for this map"));
    }
    if error_msg.contains("ux_skip_map_votes_player_rotation")
        || error_msg.contains("ux_skip_map_votes_player_game")
    {
        return Some((ConflictKind::AlreadyVoted, "You have already voted to skip"));
    }
    if error_msg.contains("ux_rotation_maps_rotation_map") {
        return Some((
            ConflictKind::DuplicateMembership,
            "Map is already in this rotation",
        ));
    }
    if error_msg.contains("ux_maps_full_name") || error_msg.contains("ux_maps_short_name") {
        return Some((ConflictKind::DuplicateName, "A map with that name already exists"));
    }
    if error_msg.contains("ux_rotations_name_key") {
        return Some((
            ConflictKind::DuplicateName,
            "A rotation with that name already exists",
        ));
    }
    if error_msg.contains("ux_queues_name_key") {
        return Some((
            ConflictKind::DuplicateName,
            "A queue with that name already exists",
        ));
    }
    None
}

/// Constraints that guard rotation invariants. Tripping one means the
/// sequencer or pointer logic let an inconsistent state through.
fn is_invariant_constraint(error_msg: &str) -> bool {
    error_msg.contains("ux_rotation_maps_rotation_ordinal")
        || error_msg.contains("ux_rotation_maps_single_next")
        || error_msg.contains("rotation_maps.rotation_id, rotation_maps.ordinal")
        || error_msg.contains("UNIQUE constraint failed: rotation_maps.rotation_id\n")
        || error_msg.ends_with("UNIQUE constraint failed: rotation_maps.rotation_id")
}

fn is_transient(error_msg: &str) -> bool {
    mentions_sqlstate(error_msg, "40001")
        || mentions_sqlstate(error_msg, "40P01")
        || error_msg.contains("could not serialize access")
        || error_msg.contains("deadlock detected")
        || error_msg.contains("database is locked")
        || error_msg.contains("database table is locked")
}

/// Postgres names the violated constraint; SQLite only reports code 787.
pub fn is_foreign_key_violation(error_msg: &str) -> bool {
    mentions_sqlstate(error_msg, "23503")
        || error_msg.contains("violates foreign key constraint")
        || error_msg.contains("FOREIGN KEY constraint failed")
}

/// Translate a `DbErr` into a `DomainError` with sanitized detail.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();

    match &e {
        sea_orm::DbErr::RecordNotFound(detail) => {
            return DomainError::not_found(NotFoundKind::Other("Record".into()), detail.clone());
        }
        sea_orm::DbErr::Custom(msg) if msg.starts_with("OPTIMISTIC_LOCK:") => {
            if let Some(json_str) = msg.strip_prefix("OPTIMISTIC_LOCK:") {
                #[derive(serde::Deserialize)]
                struct LockInfo {
                    rotation_id: i64,
                    expected: i32,
                    actual: i32,
                }

                if let Ok(info) = serde_json::from_str::<LockInfo>(json_str) {
                    warn!(
                        rotation_id = info.rotation_id,
                        expected = info.expected,
                        actual = info.actual,
                        "Optimistic lock conflict detected"
                    );
                    return DomainError::conflict(
                        ConflictKind::OptimisticLock,
                        format!(
                            "Rotation {} was modified concurrently (expected version {}, actual version {})",
                            info.rotation_id, info.expected, info.actual
                        ),
                    );
                }
            }

            warn!("Optimistic lock conflict detected (version info unavailable)");
            return DomainError::conflict(
                ConflictKind::OptimisticLock,
                "Rotation was modified by another transaction; please retry",
            );
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(raw_error = %error_msg, "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        _ => {}
    }

    if is_transient(&error_msg) {
        warn!(raw_error = %error_msg, "Transient database conflict");
        return DomainError::conflict(
            ConflictKind::SerializationFailure,
            "Concurrent update conflict; please retry",
        );
    }

    if mentions_sqlstate(&error_msg, "23505")
        || error_msg.contains("duplicate key value violates unique constraint")
        || error_msg.contains("UNIQUE constraint failed")
    {
        if is_invariant_constraint(&error_msg) {
            error!(raw_error = %error_msg, "Rotation ordering constraint tripped");
            return DomainError::invariant("Rotation ordinals or next-map flag would be inconsistent");
        }

        if let Some(columns) = extract_sqlite_columns(&error_msg) {
            if let Some((kind, detail)) = map_sqlite_columns_to_conflict(columns) {
                return DomainError::conflict(kind, detail);
            }
        }

        if let Some((kind, detail)) = map_postgres_constraint_to_conflict(&error_msg) {
            return DomainError::conflict(kind, detail);
        }

        warn!(raw_error = %error_msg, "Unique constraint violation");
        return DomainError::conflict(
            ConflictKind::Other("Unique".into()),
            "Unique constraint violation",
        );
    }

    if is_foreign_key_violation(&error_msg) {
        if error_msg.contains("fk_rotation_maps_map_id") {
            return DomainError::conflict(
                ConflictKind::MapInUse,
                "Map is still part of a rotation; remove it from the rotation first",
            );
        }
        warn!(raw_error = %error_msg, "Foreign key constraint violation");
        return DomainError::validation_other("Foreign key constraint violation");
    }

    if mentions_sqlstate(&error_msg, "23514") || error_msg.contains("CHECK constraint failed") {
        warn!(raw_error = %error_msg, "Check constraint violation");
        return DomainError::validation_other("Check constraint violation");
    }

    if error_msg.contains("timeout") || error_msg.contains("pool") {
        warn!(raw_error = %error_msg, "Database timeout or pool issue");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    error!(raw_error = %error_msg, "Unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}
