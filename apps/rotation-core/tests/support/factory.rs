use rotation_core::commands;
use rotation_core::entities::{in_progress_game_players, in_progress_games};
use rotation_core::repos::maps::Map;
use rotation_core::repos::queues::Queue;
use rotation_core::repos::rotations::Rotation;
use rotation_core::{AppError, AppState, RotationMapEntry, Voter};
use rotation_test_support::unique_helpers::{unique_id, unique_map_code, unique_str};
use sea_orm::{ActiveModelTrait, NotSet, Set};
use time::OffsetDateTime;

/// A rotation seeded with maps in ordinal order.
pub struct RotationFixture {
    pub rotation: Rotation,
    pub maps: Vec<Map>,
}

impl RotationFixture {
    pub fn name(&self) -> &str {
        &self.rotation.name
    }

    /// Short name of the `n`th seeded map (0-based).
    pub fn map(&self, n: usize) -> &str {
        &self.maps[n].short_name
    }
}

pub async fn seed_map(state: &AppState) -> Result<Map, AppError> {
    let code = unique_map_code("M");
    commands::create_map(state, &format!("Map {code}"), &code).await
}

/// Create a rotation and append `count` fresh maps to it.
pub async fn seed_rotation(state: &AppState, count: usize) -> Result<RotationFixture, AppError> {
    let rotation = commands::create_rotation(state, &unique_str("rotation"), false).await?;

    let mut maps = Vec::with_capacity(count);
    for i in 0..count {
        let map = seed_map(state).await?;
        commands::add_map_to_rotation(state, &rotation.name, &map.short_name, i as i32 + 1)
            .await?;
        maps.push(map);
    }
    Ok(RotationFixture { rotation, maps })
}

/// Create a queue drawing from `rotation_name`, optionally overriding its
/// vote threshold.
pub async fn seed_queue(
    state: &AppState,
    rotation_name: &str,
    size: i32,
    threshold: Option<i32>,
) -> Result<Queue, AppError> {
    let queue = commands::create_queue(state, &unique_str("queue"), size).await?;
    let queue = commands::set_queue_rotation(state, &queue.name, Some(rotation_name)).await?;
    match threshold {
        Some(threshold) => commands::set_queue_vote_threshold(state, &queue.name, threshold).await,
        None => Ok(queue),
    }
}

/// Insert a game on `queue_id` with `players` seated in it.
pub async fn seed_game(
    state: &AppState,
    queue_id: i64,
    map: &Map,
    players: &[i64],
    finished: bool,
) -> Result<i64, AppError> {
    let now = OffsetDateTime::now_utc();
    let game = in_progress_games::ActiveModel {
        id: NotSet,
        queue_id: Set(queue_id),
        map_full_name: Set(map.full_name.clone()),
        map_short_name: Set(map.short_name.clone()),
        finished_at: Set(finished.then_some(now)),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(state.db())
    .await
    .map_err(|e| AppError::config("failed to seed game", e))?;

    for &player_id in players {
        in_progress_game_players::ActiveModel {
            id: NotSet,
            game_id: Set(game.id),
            player_id: Set(player_id),
            created_at: Set(now),
        }
        .insert(state.db())
        .await
        .map_err(|e| AppError::config("failed to seed game player", e))?;
    }
    Ok(game.id)
}

/// A voter with fresh player, channel and guild ids.
pub fn voter() -> Voter {
    Voter::new(unique_id(), unique_id(), unique_id())
}

pub fn voters(n: usize) -> Vec<Voter> {
    (0..n).map(|_| voter()).collect()
}

/// Short names in ordinal order.
pub fn short_names(entries: &[RotationMapEntry]) -> Vec<String> {
    entries.iter().map(|e| e.map_short_name.clone()).collect()
}

/// Short name of the flagged entry, if any.
pub fn flagged(entries: &[RotationMapEntry]) -> Option<String> {
    entries
        .iter()
        .find(|e| e.is_next)
        .map(|e| e.map_short_name.clone())
}
