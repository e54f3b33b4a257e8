//! Error codes surfaced to the command dispatcher.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and are what the dispatcher
//! keys its user-facing messages on.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation
    /// Ordinal below 1
    InvalidOrdinal,
    /// Vote threshold below 1
    InvalidThreshold,
    /// Blank or unusable name
    InvalidName,
    /// General validation error
    ValidationError,

    // Not found
    MapNotFound,
    RotationNotFound,
    /// Map exists but is not part of the rotation
    RotationMapNotFound,
    QueueNotFound,
    /// Voter is not in a game, or the game vanished
    GameNotFound,
    /// General not found error
    NotFound,

    // Conflicts
    /// Voter already voted for this target
    AlreadyVoted,
    /// Map already in the rotation
    DuplicateMembership,
    /// Name already taken
    DuplicateName,
    /// Map still belongs to a rotation
    MapInUse,
    /// Voter's game has finished
    GameFinished,
    /// Rotation modified concurrently
    OptimisticLock,
    /// Serialization failure, deadlock or busy database
    SerializationFailure,
    /// Transaction kept conflicting and the retry budget ran out
    RetriesExhausted,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // System
    DbError,
    DbUnavailable,
    DbTimeout,
    /// Rotation ordinals or next-map flag found inconsistent
    InvariantViolation,
    Internal,
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidOrdinal => "INVALID_ORDINAL",
            Self::InvalidThreshold => "INVALID_THRESHOLD",
            Self::InvalidName => "INVALID_NAME",
            Self::ValidationError => "VALIDATION_ERROR",

            Self::MapNotFound => "MAP_NOT_FOUND",
            Self::RotationNotFound => "ROTATION_NOT_FOUND",
            Self::RotationMapNotFound => "ROTATION_MAP_NOT_FOUND",
            Self::QueueNotFound => "QUEUE_NOT_FOUND",
            Self::GameNotFound => "GAME_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::AlreadyVoted => "ALREADY_VOTED",
            Self::DuplicateMembership => "DUPLICATE_MEMBERSHIP",
            Self::DuplicateName => "DUPLICATE_NAME",
            Self::MapInUse => "MAP_IN_USE",
            Self::GameFinished => "GAME_FINISHED",
            Self::OptimisticLock => "OPTIMISTIC_LOCK",
            Self::SerializationFailure => "SERIALIZATION_FAILURE",
            Self::RetriesExhausted => "RETRIES_EXHAUSTED",
            Self::Conflict => "CONFLICT",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::InvariantViolation => "INVARIANT_VIOLATION",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
