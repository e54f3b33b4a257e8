use std::fmt::Display;

use thiserror::Error;
use tracing::{debug, error};

use crate::errors::domain::{
    ConflictKind, DomainError, InfraErrorKind, NotFoundKind, ValidationKind,
};
use crate::errors::ErrorCode;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {detail}")]
    Validation { code: ErrorCode, detail: String },
    #[error("Not found: {detail}")]
    NotFound { code: ErrorCode, detail: String },
    #[error("Conflict: {detail}")]
    Conflict { code: ErrorCode, detail: String },
    #[error("Database error: {detail}")]
    Db { code: ErrorCode, detail: String },
    #[error("Database unavailable")]
    DbUnavailable,
    #[error("Internal error: {detail}")]
    Internal { code: ErrorCode, detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { code, .. }
            | AppError::NotFound { code, .. }
            | AppError::Conflict { code, .. }
            | AppError::Db { code, .. }
            | AppError::Internal { code, .. } => *code,
            AppError::DbUnavailable => ErrorCode::DbUnavailable,
            AppError::Config { .. } => ErrorCode::ConfigError,
        }
    }

    pub fn detail(&self) -> String {
        match self {
            AppError::Validation { detail, .. }
            | AppError::NotFound { detail, .. }
            | AppError::Conflict { detail, .. }
            | AppError::Db { detail, .. }
            | AppError::Internal { detail, .. }
            | AppError::Config { detail } => detail.clone(),
            AppError::DbUnavailable => "Database unavailable".to_string(),
        }
    }

    /// Conflicts a fresh transaction attempt may clear.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AppError::Conflict {
                code: ErrorCode::OptimisticLock | ErrorCode::SerializationFailure,
                ..
            }
        )
    }

    pub fn invalid(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Validation {
            code,
            detail: detail.into(),
        }
    }

    pub fn not_found(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::NotFound {
            code,
            detail: detail.into(),
        }
    }

    pub fn conflict(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Conflict {
            code,
            detail: detail.into(),
        }
    }

    pub fn db(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Db {
            code,
            detail: detail.into(),
        }
    }

    pub fn internal(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Internal {
            code,
            detail: detail.into(),
        }
    }

    /// Configuration failure with the underlying cause folded into the detail.
    pub fn config(context: impl Into<String>, source: impl Display) -> Self {
        Self::Config {
            detail: format!("{}: {source}", context.into()),
        }
    }

    pub fn config_msg(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation(kind, detail) => {
                let code = match kind {
                    ValidationKind::InvalidOrdinal => ErrorCode::InvalidOrdinal,
                    ValidationKind::InvalidThreshold => ErrorCode::InvalidThreshold,
                    ValidationKind::InvalidName => ErrorCode::InvalidName,
                    _ => ErrorCode::ValidationError,
                };
                AppError::invalid(code, detail)
            }
            DomainError::NotFound(kind, detail) => {
                let code = match kind {
                    NotFoundKind::Map => ErrorCode::MapNotFound,
                    NotFoundKind::Rotation => ErrorCode::RotationNotFound,
                    NotFoundKind::RotationMap => ErrorCode::RotationMapNotFound,
                    NotFoundKind::Queue => ErrorCode::QueueNotFound,
                    NotFoundKind::Game => ErrorCode::GameNotFound,
                    _ => ErrorCode::NotFound,
                };
                AppError::not_found(code, detail)
            }
            DomainError::Conflict(kind, detail) => {
                let code = match kind {
                    ConflictKind::AlreadyVoted => {
                        // soft rejection, never an error-level event
                        debug!(detail = %detail, "Duplicate vote rejected");
                        ErrorCode::AlreadyVoted
                    }
                    ConflictKind::DuplicateMembership => ErrorCode::DuplicateMembership,
                    ConflictKind::DuplicateName => ErrorCode::DuplicateName,
                    ConflictKind::MapInUse => ErrorCode::MapInUse,
                    ConflictKind::GameFinished => ErrorCode::GameFinished,
                    ConflictKind::OptimisticLock => ErrorCode::OptimisticLock,
                    ConflictKind::SerializationFailure => ErrorCode::SerializationFailure,
                    _ => ErrorCode::Conflict,
                };
                AppError::conflict(code, detail)
            }
            DomainError::Infra(kind, detail) => match kind {
                InfraErrorKind::DbUnavailable => AppError::DbUnavailable,
                InfraErrorKind::Timeout => AppError::db(ErrorCode::DbTimeout, detail),
                InfraErrorKind::InvariantViolation => {
                    error!(detail = %detail, "Rotation invariant violated; operation aborted");
                    AppError::internal(ErrorCode::InvariantViolation, detail)
                }
                _ => AppError::db(ErrorCode::DbError, detail),
            },
        }
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(e: sea_orm::DbErr) -> Self {
        AppError::from(crate::infra::db_errors::map_db_err(e))
    }
}
