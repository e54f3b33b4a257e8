//! Repository functions for domain layer.
//!
//! Thin wrappers over the `*_sea` adapters that hand out domain structs and
//! convert `DbErr` into `DomainError`.

pub mod history;
pub mod live_games;
pub mod maps;
pub mod queues;
pub mod rotation_maps;
pub mod rotations;
pub mod votes;
pub mod waitlists;
