//! Vote repository functions for domain layer.

use std::collections::HashMap;

use sea_orm::ConnectionTrait;

use crate::adapters::votes_sea as votes_adapter;
use crate::domain::votes::Voter;
use crate::errors::domain::DomainError;

pub use crate::adapters::votes_sea::SkipTarget;

pub async fn insert_map_vote<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    voter: &Voter,
    rotation_map_id: i64,
) -> Result<(), DomainError> {
    let dto = votes_adapter::MapVoteCreate {
        channel_id: voter.channel_id,
        player_id: voter.player_id,
        rotation_map_id,
    };
    votes_adapter::insert_map_vote(conn, dto).await?;
    Ok(())
}

pub async fn insert_skip_vote<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    voter: &Voter,
    target: SkipTarget,
) -> Result<(), DomainError> {
    let dto = votes_adapter::SkipVoteCreate {
        channel_id: voter.channel_id,
        player_id: voter.player_id,
        target,
    };
    votes_adapter::insert_skip_vote(conn, dto).await?;
    Ok(())
}

pub async fn count_map_votes<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    rotation_map_id: i64,
) -> Result<u64, DomainError> {
    Ok(votes_adapter::count_map_votes(conn, rotation_map_id).await?)
}

pub async fn count_skip_votes<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    target: SkipTarget,
) -> Result<u64, DomainError> {
    Ok(votes_adapter::count_skip_votes(conn, target).await?)
}

/// Map-vote counts keyed by rotation map id; rows without votes are absent.
pub async fn map_vote_tallies<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    rotation_map_ids: Vec<i64>,
) -> Result<HashMap<i64, u64>, DomainError> {
    let rows = votes_adapter::tally_map_votes(conn, rotation_map_ids).await?;
    Ok(rows
        .into_iter()
        .map(|(id, votes)| (id, votes.max(0) as u64))
        .collect())
}

pub async fn delete_map_votes_for_rows<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    rotation_map_ids: Vec<i64>,
) -> Result<u64, DomainError> {
    Ok(votes_adapter::delete_map_votes_for_rows(conn, rotation_map_ids).await?)
}

pub async fn delete_skip_votes<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    target: SkipTarget,
) -> Result<u64, DomainError> {
    Ok(votes_adapter::delete_skip_votes(conn, target).await?)
}

pub async fn delete_player_map_votes<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
    rotation_map_ids: Option<Vec<i64>>,
) -> Result<u64, DomainError> {
    Ok(votes_adapter::delete_player_map_votes(conn, player_id, rotation_map_ids).await?)
}

pub async fn delete_player_skip_votes<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<u64, DomainError> {
    Ok(votes_adapter::delete_player_skip_votes(conn, player_id).await?)
}
