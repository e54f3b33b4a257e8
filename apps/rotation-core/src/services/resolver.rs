//! Vote Resolver.
//!
//! There is no stored vote state. After every successful cast the scope is
//! re-tallied; once the tally reaches the threshold the pass is applied in
//! the same transaction and the scope's votes are purged, so the next cast
//! starts a fresh cycle from zero.

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;
use tracing::info;

use crate::config::votes::VoteSettings;
use crate::domain::tally::{effective_threshold, evaluate, VotePhase};
use crate::domain::votes::{VoteKind, Voter};
use crate::entities::rotation_map_history::PointerChangeReason;
use crate::errors::domain::DomainError;
use crate::repos::queues::{self, Queue};
use crate::repos::rotation_maps::{self, RotationMapEntry};
use crate::repos::votes::{self, SkipTarget};
use crate::repos::waitlists::{self, WaitlistMarker};
use crate::repos::live_games;
use crate::services::pointer::RotationPointer;

/// Result of a cast: the scope's tally and, when it crossed, what changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoteOutcome {
    pub kind: VoteKind,
    pub tally: u64,
    pub threshold: u32,
    pub resolution: Option<VotePassed>,
}

impl VoteOutcome {
    pub fn threshold_reached(&self) -> bool {
        self.resolution.is_some()
    }
}

/// The map a skipped game was switched to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameMapChange {
    pub game_id: i64,
    pub map_full_name: String,
    pub map_short_name: String,
}

/// Everything a passed vote changed, for the dispatcher to report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VotePassed {
    pub rotation_id: i64,
    pub previous_next: Option<RotationMapEntry>,
    pub next: Option<RotationMapEntry>,
    pub game_map_change: Option<GameMapChange>,
    pub waitlist: Option<WaitlistMarker>,
    /// Queues sharing the rotation; all of them see the new next map.
    pub affected_queues: Vec<String>,
    pub votes_cleared: u64,
}

#[derive(Debug, Clone, Copy)]
pub struct VoteResolver {
    settings: VoteSettings,
}

impl VoteResolver {
    pub fn new(settings: VoteSettings) -> Self {
        Self { settings }
    }

    /// Map-change threshold: the lowest threshold among queues drawing from the rotation.
    pub async fn map_vote_threshold<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        rotation_id: i64,
    ) -> Result<u32, DomainError> {
        let queues = queues::find_by_rotation(conn, rotation_id).await?;
        Ok(effective_threshold(
            queues.iter().map(|q| q.vote_threshold),
            self.settings.default_vote_threshold,
        ))
    }

    /// Skip threshold: the queue's own value, else the configured default.
    pub fn skip_threshold(&self, queue: &Queue) -> u32 {
        effective_threshold([queue.vote_threshold], self.settings.default_vote_threshold)
    }

    /// Evaluate a map-change vote on `target`; on a pass, flag it as next,
    /// purge every vote scoped to the rotation and leave a waitlist marker.
    pub async fn resolve_map_vote<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        voter: &Voter,
        target: &RotationMapEntry,
        tally: u64,
        threshold: u32,
    ) -> Result<VoteOutcome, DomainError> {
        let mut outcome = VoteOutcome {
            kind: VoteKind::MapChange,
            tally,
            threshold,
            resolution: None,
        };
        if let VotePhase::Accumulating { .. } = evaluate(tally, threshold) {
            return Ok(outcome);
        }

        let rotation_id = target.rotation_id;
        let pointer = RotationPointer::new();
        let previous_next = pointer.next_map(conn, rotation_id).await?;
        let next = pointer
            .set_next(conn, rotation_id, target.id, PointerChangeReason::MapVote)
            .await?;

        let row_ids = rotation_maps::ids_for_rotation(conn, rotation_id).await?;
        let votes_cleared = votes::delete_map_votes_for_rows(conn, row_ids).await?
            + votes::delete_skip_votes(conn, SkipTarget::Rotation(rotation_id)).await?;

        let waitlist = Some(self.leave_marker(conn, voter, rotation_id).await?);
        let affected_queues = queue_names(conn, rotation_id).await?;

        info!(
            rotation_id,
            voter_id = voter.player_id,
            tally,
            threshold,
            map = %next.map_short_name,
            votes_cleared,
            "Map vote passed"
        );

        outcome.resolution = Some(VotePassed {
            rotation_id,
            previous_next,
            next: Some(next),
            game_map_change: None,
            waitlist,
            affected_queues,
            votes_cleared,
        });
        Ok(outcome)
    }

    /// Evaluate a queue-scoped skip; on a pass, advance the rotation and
    /// leave a waitlist marker.
    pub async fn resolve_queue_skip<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        voter: &Voter,
        rotation_id: i64,
        tally: u64,
        threshold: u32,
    ) -> Result<VoteOutcome, DomainError> {
        let mut outcome = VoteOutcome {
            kind: VoteKind::Skip,
            tally,
            threshold,
            resolution: None,
        };
        if !evaluate(tally, threshold).crossed() {
            return Ok(outcome);
        }

        let pointer = RotationPointer::new();
        let previous_next = pointer.next_map(conn, rotation_id).await?;
        let next = pointer
            .promote_next(conn, rotation_id, PointerChangeReason::SkipVote)
            .await?;
        let votes_cleared = votes::delete_skip_votes(conn, SkipTarget::Rotation(rotation_id)).await?;

        let waitlist = Some(self.leave_marker(conn, voter, rotation_id).await?);
        let affected_queues = queue_names(conn, rotation_id).await?;

        info!(rotation_id, voter_id = voter.player_id, tally, threshold, votes_cleared, "Queue skip vote passed");

        outcome.resolution = Some(VotePassed {
            rotation_id,
            previous_next,
            next,
            game_map_change: None,
            waitlist,
            affected_queues,
            votes_cleared,
        });
        Ok(outcome)
    }

    /// Evaluate a skip of the voter's live game; on a pass, the game takes
    /// the rotation's next map and the rotation advances past it.
    pub async fn resolve_game_skip<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        voter: &Voter,
        rotation_id: i64,
        game_id: i64,
        tally: u64,
        threshold: u32,
    ) -> Result<VoteOutcome, DomainError> {
        let mut outcome = VoteOutcome {
            kind: VoteKind::Skip,
            tally,
            threshold,
            resolution: None,
        };
        if !evaluate(tally, threshold).crossed() {
            return Ok(outcome);
        }

        let pointer = RotationPointer::new();
        let previous_next = pointer.next_map(conn, rotation_id).await?;

        let game_map_change = match &previous_next {
            Some(entry) => {
                live_games::update_map(conn, game_id, &entry.map_full_name, &entry.map_short_name)
                    .await?;
                Some(GameMapChange {
                    game_id,
                    map_full_name: entry.map_full_name.clone(),
                    map_short_name: entry.map_short_name.clone(),
                })
            }
            None => None,
        };

        let next = pointer
            .promote_next(conn, rotation_id, PointerChangeReason::SkipVote)
            .await?;
        let votes_cleared = votes::delete_skip_votes(conn, SkipTarget::Game(game_id)).await?;
        let affected_queues = queue_names(conn, rotation_id).await?;

        info!(rotation_id, game_id, voter_id = voter.player_id, tally, threshold, votes_cleared, "Game skip vote passed");

        outcome.resolution = Some(VotePassed {
            rotation_id,
            previous_next,
            next,
            game_map_change,
            waitlist: None,
            affected_queues,
            votes_cleared,
        });
        Ok(outcome)
    }

    async fn leave_marker<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        voter: &Voter,
        rotation_id: i64,
    ) -> Result<WaitlistMarker, DomainError> {
        let end_waitlist_at = OffsetDateTime::now_utc() + self.settings.re_add_delay;
        waitlists::create_marker(
            conn,
            voter.channel_id,
            voter.guild_id,
            Some(rotation_id),
            end_waitlist_at,
        )
        .await
    }
}

async fn queue_names<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    rotation_id: i64,
) -> Result<Vec<String>, DomainError> {
    let queues = queues::find_by_rotation(conn, rotation_id).await?;
    Ok(queues.into_iter().map(|q| q.name).collect())
}
