//! Vote scopes and voter context.

use serde::{Deserialize, Serialize};

/// Who is voting, and where the vote was cast from.
///
/// `player_id` is the identity uniqueness is enforced on; the channel and
/// guild are carried onto vote rows and waitlist markers for follow-ups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voter {
    pub player_id: i64,
    pub channel_id: i64,
    pub guild_id: i64,
}

impl Voter {
    pub fn new(player_id: i64, channel_id: i64, guild_id: i64) -> Self {
        Self {
            player_id,
            channel_id,
            guild_id,
        }
    }
}

/// The two vote kinds the resolver knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoteKind {
    MapChange,
    Skip,
}

/// What a skip vote is scoped to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipScope {
    /// Skip the next map of the rotation behind this queue.
    Queue { queue_name: String },
    /// Skip the map of the game the voter is currently rostered in.
    CurrentGame,
}

/// The voter's game, resolved once per cast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoterGame {
    InProgress {
        game_id: i64,
        queue_id: i64,
        map_short_name: String,
    },
    Finished {
        game_id: i64,
    },
}

/// Which of a voter's votes to withdraw.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RetractScope {
    #[default]
    All,
    /// Map votes for this map, in every rotation.
    Map { map_short_name: String },
    /// Every skip vote, rotation- or game-scoped.
    Skips,
}
