//! Waitlist marker repository functions for domain layer.

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;

use crate::adapters::waitlists_sea as waitlists_adapter;
use crate::entities::vote_passed_waitlists;
use crate::errors::domain::DomainError;

/// A pending follow-up for a passed vote
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WaitlistMarker {
    pub id: i64,
    pub channel_id: i64,
    pub guild_id: i64,
    pub rotation_id: Option<i64>,
    #[serde(with = "time::serde::rfc3339")]
    pub end_waitlist_at: OffsetDateTime,
}

impl From<vote_passed_waitlists::Model> for WaitlistMarker {
    fn from(model: vote_passed_waitlists::Model) -> Self {
        Self {
            id: model.id,
            channel_id: model.channel_id,
            guild_id: model.guild_id,
            rotation_id: model.rotation_id,
            end_waitlist_at: model.end_waitlist_at,
        }
    }
}

pub async fn create_marker<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    channel_id: i64,
    guild_id: i64,
    rotation_id: Option<i64>,
    end_waitlist_at: OffsetDateTime,
) -> Result<WaitlistMarker, DomainError> {
    let dto = waitlists_adapter::WaitlistCreate {
        channel_id,
        guild_id,
        rotation_id,
        end_waitlist_at,
    };
    let marker = waitlists_adapter::create_marker(conn, dto).await?;
    Ok(WaitlistMarker::from(marker))
}

/// Delete and return every marker due at `now`.
///
/// A marker is returned only if this call's delete removed it, so two
/// pollers racing over the same rows never both fire it.
pub async fn take_due<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    now: OffsetDateTime,
) -> Result<Vec<WaitlistMarker>, DomainError> {
    let due = waitlists_adapter::find_due(conn, now).await?;
    let mut taken = Vec::with_capacity(due.len());
    for marker in due {
        if waitlists_adapter::delete_marker(conn, marker.id).await? == 1 {
            taken.push(WaitlistMarker::from(marker));
        }
    }
    Ok(taken)
}

pub async fn find_by_rotation<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    rotation_id: i64,
) -> Result<Vec<WaitlistMarker>, DomainError> {
    let markers = waitlists_adapter::find_by_rotation(conn, rotation_id).await?;
    Ok(markers.into_iter().map(WaitlistMarker::from).collect())
}
