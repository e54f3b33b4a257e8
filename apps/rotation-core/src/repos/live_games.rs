//! Read access to the voter's game, plus the one write the resolver makes.

use sea_orm::ConnectionTrait;

use crate::adapters::live_games_sea as games_adapter;
use crate::domain::votes::VoterGame;
use crate::errors::domain::DomainError;

// A player is rarely rostered in more than a couple of recent games.
const RECENT_GAMES: u64 = 8;

/// Resolve the player's current game.
///
/// An unfinished game wins over any finished one; otherwise the most recent
/// finished game is reported so callers can tell "too late" from "never".
pub async fn find_voter_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<Option<VoterGame>, DomainError> {
    let games = games_adapter::find_games_for_player(conn, player_id, RECENT_GAMES).await?;

    if let Some(game) = games.iter().find(|g| g.finished_at.is_none()) {
        return Ok(Some(VoterGame::InProgress {
            game_id: game.id,
            queue_id: game.queue_id,
            map_short_name: game.map_short_name.clone(),
        }));
    }

    Ok(games
        .first()
        .map(|game| VoterGame::Finished { game_id: game.id }))
}

pub async fn update_map<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    map_full_name: &str,
    map_short_name: &str,
) -> Result<(), DomainError> {
    games_adapter::update_map(conn, game_id, map_full_name, map_short_name).await?;
    Ok(())
}
