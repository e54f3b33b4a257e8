use std::time::Duration;

use futures::future::BoxFuture;
use rand::Rng;
use sea_orm::{DatabaseTransaction, TransactionTrait};
use tracing::{debug, warn};

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::state::app_state::AppState;

/// Execute a function within a database transaction.
///
/// Begins a transaction, runs the closure, commits on Ok and rolls back on Err.
pub async fn with_txn<R, F>(state: &AppState, f: F) -> Result<R, AppError>
where
    F: for<'a> FnOnce(&'a DatabaseTransaction) -> BoxFuture<'a, Result<R, AppError>>,
{
    let txn = state.db.begin().await?;
    let out = f(&txn).await;

    match out {
        Ok(val) => {
            txn.commit().await?;
            Ok(val)
        }
        Err(err) => {
            // Best-effort rollback; preserve original error
            let _ = txn.rollback().await;
            Err(err)
        }
    }
}

/// Like [`with_txn`], but reruns the whole transaction when it loses a
/// rotation claim or the backend reports a serialization conflict.
///
/// The closure runs once per attempt, so it must rebuild any owned input it
/// moves into its future. At most `state.votes.max_txn_attempts` attempts run
/// before the conflict is surfaced as `RETRIES_EXHAUSTED`.
pub async fn with_txn_retry<R, F>(state: &AppState, op: &'static str, f: F) -> Result<R, AppError>
where
    F: for<'a> Fn(&'a DatabaseTransaction) -> BoxFuture<'a, Result<R, AppError>>,
{
    let max_attempts = state.votes.max_txn_attempts.max(1);
    let mut attempt: u32 = 1;

    loop {
        match with_txn(state, |txn| f(txn)).await {
            Ok(val) => {
                if attempt > 1 {
                    debug!(op, attempts = attempt, "txn_retry=success");
                }
                return Ok(val);
            }
            Err(err) if err.is_retryable() && attempt < max_attempts => {
                let delay_ms = backoff_ms(attempt);
                warn!(
                    op,
                    attempt,
                    max_attempts,
                    delay_ms,
                    code = %err.code(),
                    "txn_retry=conflict"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                attempt += 1;
            }
            Err(err) if err.is_retryable() => {
                warn!(op, attempts = attempt, code = %err.code(), "txn_retry=exhausted");
                return Err(AppError::conflict(
                    ErrorCode::RetriesExhausted,
                    format!("{op} kept conflicting with concurrent updates; please try again"),
                ));
            }
            Err(err) => return Err(err),
        }
    }
}

/// Exponential backoff capped at 80ms, plus a little jitter so racing
/// callers do not wake in lockstep.
fn backoff_ms(attempt: u32) -> u64 {
    let base_delay_ms = (5u64 << attempt.saturating_sub(1).min(4)).min(80);
    let jitter_ms = rand::rng().random_range(0..5u64);
    base_delay_ms + jitter_ms
}
