//! Vote Ledger: one vote per voter per target.
//!
//! Uniqueness is left to the database indexes. A duplicate insert surfaces
//! as `ConflictKind::AlreadyVoted` and the caller's transaction rolls back,
//! so a rejected vote never leaves a partial write behind.

use sea_orm::ConnectionTrait;
use serde::Serialize;
use tracing::debug;

use crate::domain::votes::{RetractScope, Voter};
use crate::errors::domain::{ConflictKind, DomainError};
use crate::repos::votes::{self, SkipTarget};
use crate::repos::{maps, rotation_maps};

/// How many rows a retraction removed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RetractedVotes {
    pub map_votes: u64,
    pub skip_votes: u64,
}

impl RetractedVotes {
    pub fn total(&self) -> u64 {
        self.map_votes + self.skip_votes
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct VoteLedger;

impl VoteLedger {
    pub fn new() -> Self {
        Self
    }

    /// Record a map-change vote and return the target's new tally.
    pub async fn cast_map_vote<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        voter: &Voter,
        rotation_map_id: i64,
    ) -> Result<u64, DomainError> {
        votes::insert_map_vote(conn, voter, rotation_map_id)
            .await
            .inspect_err(|err| log_duplicate(voter, err))?;
        self.tally_map(conn, rotation_map_id).await
    }

    /// Record a skip vote and return the scope's new tally.
    pub async fn cast_skip_vote<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        voter: &Voter,
        target: SkipTarget,
    ) -> Result<u64, DomainError> {
        votes::insert_skip_vote(conn, voter, target)
            .await
            .inspect_err(|err| log_duplicate(voter, err))?;
        self.tally_skip(conn, target).await
    }

    pub async fn tally_map<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        rotation_map_id: i64,
    ) -> Result<u64, DomainError> {
        votes::count_map_votes(conn, rotation_map_id).await
    }

    pub async fn tally_skip<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        target: SkipTarget,
    ) -> Result<u64, DomainError> {
        votes::count_skip_votes(conn, target).await
    }

    /// Withdraw the voter's votes in `scope`. Removing nothing is not an
    /// error, including for an unknown map.
    pub async fn retract<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        player_id: i64,
        scope: &RetractScope,
    ) -> Result<RetractedVotes, DomainError> {
        let retracted = match scope {
            RetractScope::All => RetractedVotes {
                map_votes: votes::delete_player_map_votes(conn, player_id, None).await?,
                skip_votes: votes::delete_player_skip_votes(conn, player_id).await?,
            },
            RetractScope::Map { map_short_name } => {
                match maps::find_by_short_name(conn, map_short_name).await? {
                    Some(map) => {
                        let ids = rotation_maps::ids_for_map(conn, map.id).await?;
                        RetractedVotes {
                            map_votes: votes::delete_player_map_votes(conn, player_id, Some(ids))
                                .await?,
                            skip_votes: 0,
                        }
                    }
                    None => RetractedVotes::default(),
                }
            }
            RetractScope::Skips => RetractedVotes {
                map_votes: 0,
                skip_votes: votes::delete_player_skip_votes(conn, player_id).await?,
            },
        };

        debug!(
            player_id,
            ?scope,
            map_votes = retracted.map_votes,
            skip_votes = retracted.skip_votes,
            "Votes retracted"
        );
        Ok(retracted)
    }
}

fn log_duplicate(voter: &Voter, err: &DomainError) {
    if matches!(err, DomainError::Conflict(ConflictKind::AlreadyVoted, _)) {
        debug!(voter_id = voter.player_id, "Duplicate vote rejected");
    }
}
