use time::OffsetDateTime;

use crate::db::txn::with_txn_retry;
use crate::error::AppError;
use crate::repos::waitlists::WaitlistMarker;
use crate::services::WaitlistService;
use crate::state::app_state::AppState;

/// Consume the waitlist markers due at `now`. Each marker is returned by
/// exactly one call.
pub async fn take_due_waitlist_markers(
    state: &AppState,
    now: OffsetDateTime,
) -> Result<Vec<WaitlistMarker>, AppError> {
    with_txn_retry(state, "take_due_waitlist_markers", |txn| {
        Box::pin(async move {
            let taken = WaitlistService::new().take_due(txn, now).await?;
            Ok(taken)
        })
    })
    .await
}

/// Markers for a rotation that have not been consumed yet.
pub async fn pending_waitlist_markers(
    state: &AppState,
    rotation_id: i64,
) -> Result<Vec<WaitlistMarker>, AppError> {
    Ok(WaitlistService::new()
        .pending_for_rotation(state.db(), rotation_id)
        .await?)
}
