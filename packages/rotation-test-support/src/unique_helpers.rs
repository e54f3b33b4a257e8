//! Unique names so tests sharing a database never collide.

use ulid::Ulid;

/// `{prefix}-{ulid}`
///
/// ```
/// use rotation_test_support::unique_helpers::unique_str;
///
/// let a = unique_str("rotation");
/// assert_ne!(a, unique_str("rotation"));
/// assert!(a.starts_with("rotation-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// Short map code from a ulid tail, upper-cased the way map codes are stored.
pub fn unique_map_code(prefix: &str) -> String {
    let id = Ulid::new().to_string();
    format!("{}{}", prefix, &id[id.len() - 6..]).to_uppercase()
}

/// Positive id for external entities (players, channels) that have no
/// table of their own.
pub fn unique_id() -> i64 {
    ((Ulid::new().random() as u64) >> 12) as i64
}
