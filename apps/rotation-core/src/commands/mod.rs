//! Dispatcher-facing operations.
//!
//! Each operation runs in its own transaction. Mutating operations claim
//! the rotation they touch and are retried as a whole when a concurrent
//! writer wins the claim or the backend reports a serialization conflict.

pub mod catalog;
pub mod rotations;
pub mod votes;
pub mod waitlist;

pub use catalog::{
    create_map, create_queue, create_rotation, list_maps, list_rotation_maps,
    queues_for_rotation, remove_map, remove_rotation, rename_rotation, rotation_history,
    set_queue_rotation, set_queue_vote_threshold, set_rotation_random,
};
pub use rotations::{
    add_map_to_rotation, advance_rotation, get_next_map, remove_map_from_rotation,
    set_map_ordinal, set_next_map,
};
pub use votes::{
    cast_map_vote, cast_skip_vote, retract_votes, vote_status, MapTally, VoteStatus,
};
pub use waitlist::{pending_waitlist_markers, take_due_waitlist_markers};
