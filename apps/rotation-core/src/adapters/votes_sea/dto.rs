//! DTOs for votes_sea adapter.

/// DTO for casting a map-change vote.
#[derive(Debug, Clone)]
pub struct MapVoteCreate {
    pub channel_id: i64,
    pub player_id: i64,
    pub rotation_map_id: i64,
}

/// Scope a skip vote is recorded against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipTarget {
    Rotation(i64),
    Game(i64),
}

/// DTO for casting a skip vote.
#[derive(Debug, Clone)]
pub struct SkipVoteCreate {
    pub channel_id: i64,
    pub player_id: i64,
    pub target: SkipTarget,
}
