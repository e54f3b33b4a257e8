use sea_orm::ConnectionTrait;
use time::OffsetDateTime;
use tracing::debug;

use crate::errors::domain::DomainError;
use crate::repos::waitlists::{self, WaitlistMarker};

/// Hands due waitlist markers to the external scheduler.
#[derive(Debug, Default, Clone, Copy)]
pub struct WaitlistService;

impl WaitlistService {
    pub fn new() -> Self {
        Self
    }

    /// Consume every marker whose deadline is at or before `now`.
    pub async fn take_due<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        now: OffsetDateTime,
    ) -> Result<Vec<WaitlistMarker>, DomainError> {
        let taken = waitlists::take_due(conn, now).await?;
        if !taken.is_empty() {
            debug!(count = taken.len(), "Waitlist markers consumed");
        }
        Ok(taken)
    }

    pub async fn pending_for_rotation<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        rotation_id: i64,
    ) -> Result<Vec<WaitlistMarker>, DomainError> {
        waitlists::find_by_rotation(conn, rotation_id).await
    }
}
