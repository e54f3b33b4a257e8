pub mod in_progress_game_players;
pub mod in_progress_games;
pub mod map_votes;
pub mod maps;
pub mod queues;
pub mod rotation_map_history;
pub mod rotation_maps;
pub mod rotations;
pub mod skip_map_votes;
pub mod vote_passed_waitlists;

pub use map_votes::Entity as MapVotes;
pub use maps::Entity as Maps;
pub use maps::Model as Map;
pub use queues::Entity as Queues;
pub use queues::Model as Queue;
pub use rotation_maps::Entity as RotationMaps;
pub use rotation_maps::Model as RotationMap;
pub use rotations::Entity as Rotations;
pub use rotations::Model as Rotation;
pub use skip_map_votes::Entity as SkipMapVotes;
