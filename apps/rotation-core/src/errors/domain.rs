//! Domain-level error type used across services, repos and adapters.
//!
//! This error type is DB-agnostic. The command surface returns
//! `Result<T, crate::error::AppError>` and converts from `DomainError`
//! using the provided `From<DomainError> for AppError` implementation.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Validation kinds for rejected input
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    /// Ordinal below 1 (values above the rotation size are clamped instead)
    InvalidOrdinal,
    /// Vote threshold below 1
    InvalidThreshold,
    /// Empty or otherwise unusable name
    InvalidName,
    Other(String),
}

/// Infra error kinds to distinguish operational failures
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    Timeout,
    DbUnavailable,
    /// Persisted state broke a rotation invariant; the operation is aborted
    InvariantViolation,
    Other(String),
}

/// Domain-level not found entities
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Map,
    Rotation,
    RotationMap,
    Queue,
    Game,
    Other(String),
}

/// Domain-level conflict kinds
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    /// Voter already holds a vote for this target
    AlreadyVoted,
    /// Map is already a member of the rotation
    DuplicateMembership,
    /// Map, rotation or queue name already taken
    DuplicateName,
    /// Map still belongs to at least one rotation
    MapInUse,
    /// Voter's game has already finished
    GameFinished,
    /// Rotation was claimed by a concurrent transaction
    OptimisticLock,
    /// Backend reported a serialization failure, deadlock or busy database
    SerializationFailure,
    Other(String),
}

impl ConflictKind {
    /// Conflicts that are resolved by rerunning the whole transaction.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ConflictKind::OptimisticLock | ConflictKind::SerializationFailure
        )
    }
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input validation or business rule violation
    Validation(ValidationKind, String),
    /// Semantic conflict
    Conflict(ConflictKind, String),
    /// Missing resource in domain terms
    NotFound(NotFoundKind, String),
    /// Infrastructure/operational failures
    Infra(InfraErrorKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation error {kind:?}: {d}"),
            DomainError::Conflict(kind, d) => write!(f, "conflict {kind:?}: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
            DomainError::Infra(kind, d) => write!(f, "infra {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn validation_other(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        Self::Validation(ValidationKind::Other(detail.clone()), detail)
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }
    pub fn invariant(detail: impl Into<String>) -> Self {
        Self::Infra(InfraErrorKind::InvariantViolation, detail.into())
    }

    pub fn is_transient(&self) -> bool {
        matches!(self, DomainError::Conflict(kind, _) if kind.is_transient())
    }
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        crate::infra::db_errors::map_db_err(e)
    }
}
