//! Next-map pointer arithmetic.

use crate::errors::domain::DomainError;

/// Ordinal that follows `current`, wrapping from the last row back to 1.
///
/// Returns `None` for an empty rotation.
pub fn successor_ordinal(current: i32, count: i32) -> Option<i32> {
    if count <= 0 {
        return None;
    }
    if current >= count || current < 1 {
        Some(1)
    } else {
        Some(current + 1)
    }
}

/// A non-empty rotation has exactly one flagged row; an empty one has none.
pub fn check_pointer(row_count: usize, flagged: usize) -> Result<(), DomainError> {
    let expected = usize::from(row_count > 0);
    if flagged != expected {
        return Err(DomainError::invariant(format!(
            "Rotation with {row_count} maps has {flagged} next-map flags (expected {expected})"
        )));
    }
    Ok(())
}
