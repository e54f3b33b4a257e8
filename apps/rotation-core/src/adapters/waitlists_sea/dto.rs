//! DTOs for waitlists_sea adapter.

use time::OffsetDateTime;

/// DTO for recording a passed vote's delayed follow-up.
#[derive(Debug, Clone)]
pub struct WaitlistCreate {
    pub channel_id: i64,
    pub guild_id: i64,
    pub rotation_id: Option<i64>,
    pub end_waitlist_at: OffsetDateTime,
}
