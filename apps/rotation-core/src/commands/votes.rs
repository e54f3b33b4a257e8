//! Vote casting, retraction and status.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::db::txn::with_txn_retry;
use crate::domain::votes::{RetractScope, SkipScope, Voter, VoterGame};
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use crate::repos::rotation_maps::{self, RotationMapEntry};
use crate::repos::votes::{self, SkipTarget};
use crate::repos::{live_games, maps, queues, rotations};
use crate::services::{RetractedVotes, VoteLedger, VoteOutcome, VoteResolver};
use crate::state::app_state::AppState;

/// Cast a map-change vote for `map_short_name` in a rotation.
pub async fn cast_map_vote(
    state: &AppState,
    voter: Voter,
    rotation_name: &str,
    map_short_name: &str,
) -> Result<VoteOutcome, AppError> {
    let rotation_name = rotation_name.to_string();
    let map_short_name = map_short_name.to_string();
    let resolver = VoteResolver::new(state.votes);

    with_txn_retry(state, "cast_map_vote", |txn| {
        let rotation_name = rotation_name.clone();
        let map_short_name = map_short_name.clone();
        Box::pin(async move {
            let rotation = rotations::require_by_name(txn, &rotation_name).await?;
            let map = maps::require_by_short_name(txn, &map_short_name).await?;
            let target = rotation_maps::require_entry(txn, rotation.id, map.id).await?;
            let rotation = rotations::claim(txn, &rotation).await?;

            let tally = VoteLedger::new().cast_map_vote(txn, &voter, target.id).await?;
            let threshold = resolver.map_vote_threshold(txn, rotation.id).await?;
            debug!(rotation_id = rotation.id, voter_id = voter.player_id, tally, threshold, "Map vote cast");

            let outcome = resolver
                .resolve_map_vote(txn, &voter, &target, tally, threshold)
                .await?;
            Ok(outcome)
        })
    })
    .await
}

/// Cast a skip vote against a queue's rotation or the voter's live game.
pub async fn cast_skip_vote(
    state: &AppState,
    voter: Voter,
    scope: SkipScope,
) -> Result<VoteOutcome, AppError> {
    let resolver = VoteResolver::new(state.votes);

    with_txn_retry(state, "cast_skip_vote", |txn| {
        let scope = scope.clone();
        Box::pin(async move {
            let ledger = VoteLedger::new();

            let outcome = match scope {
                SkipScope::Queue { queue_name } => {
                    let queue = queues::require_by_name(txn, &queue_name).await?;
                    let rotation = rotations::require_by_id(txn, queue.require_rotation_id()?).await?;
                    let rotation = rotations::claim(txn, &rotation).await?;

                    let tally = ledger
                        .cast_skip_vote(txn, &voter, SkipTarget::Rotation(rotation.id))
                        .await?;
                    let threshold = resolver.skip_threshold(&queue);
                    debug!(rotation_id = rotation.id, voter_id = voter.player_id, tally, threshold, "Queue skip vote cast");

                    resolver
                        .resolve_queue_skip(txn, &voter, rotation.id, tally, threshold)
                        .await?
                }
                SkipScope::CurrentGame => {
                    let game = live_games::find_voter_game(txn, voter.player_id).await?;
                    let (game_id, queue_id) = match game {
                        Some(VoterGame::InProgress {
                            game_id, queue_id, ..
                        }) => (game_id, queue_id),
                        Some(VoterGame::Finished { game_id }) => {
                            return Err(DomainError::conflict(
                                ConflictKind::GameFinished,
                                format!("Game {game_id} has already finished"),
                            )
                            .into());
                        }
                        None => {
                            return Err(DomainError::not_found(
                                NotFoundKind::Game,
                                "You are not in a game",
                            )
                            .into());
                        }
                    };

                    let queue = queues::require_by_id(txn, queue_id).await?;
                    let rotation = rotations::require_by_id(txn, queue.require_rotation_id()?).await?;
                    let rotation = rotations::claim(txn, &rotation).await?;

                    let tally = ledger
                        .cast_skip_vote(txn, &voter, SkipTarget::Game(game_id))
                        .await?;
                    let threshold = resolver.skip_threshold(&queue);
                    debug!(rotation_id = rotation.id, game_id, voter_id = voter.player_id, tally, threshold, "Game skip vote cast");

                    resolver
                        .resolve_game_skip(txn, &voter, rotation.id, game_id, tally, threshold)
                        .await?
                }
            };
            Ok(outcome)
        })
    })
    .await
}

/// Withdraw the voter's votes. Idempotent.
pub async fn retract_votes(
    state: &AppState,
    player_id: i64,
    scope: RetractScope,
) -> Result<RetractedVotes, AppError> {
    with_txn_retry(state, "retract_votes", |txn| {
        let scope = scope.clone();
        Box::pin(async move {
            let retracted = VoteLedger::new().retract(txn, player_id, &scope).await?;
            Ok(retracted)
        })
    })
    .await
}

/// Votes a single rotation map has collected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapTally {
    pub entry: RotationMapEntry,
    pub votes: u64,
}

/// Current tallies for a rotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoteStatus {
    pub rotation_id: i64,
    pub map_vote_threshold: u32,
    /// One row per member, in ordinal order
    pub maps: Vec<MapTally>,
    pub skip_votes: u64,
}

pub async fn vote_status(state: &AppState, rotation_name: &str) -> Result<VoteStatus, AppError> {
    let conn = state.db();
    let resolver = VoteResolver::new(state.votes);

    let rotation = rotations::require_by_name(conn, rotation_name).await?;
    let entries = rotation_maps::list_for_rotation(conn, rotation.id).await?;
    let tallies: HashMap<i64, u64> =
        votes::map_vote_tallies(conn, entries.iter().map(|e| e.id).collect()).await?;

    let maps = entries
        .into_iter()
        .map(|entry| MapTally {
            votes: tallies.get(&entry.id).copied().unwrap_or(0),
            entry,
        })
        .collect();

    Ok(VoteStatus {
        rotation_id: rotation.id,
        map_vote_threshold: resolver.map_vote_threshold(conn, rotation.id).await?,
        maps,
        skip_votes: votes::count_skip_votes(conn, SkipTarget::Rotation(rotation.id)).await?,
    })
}
