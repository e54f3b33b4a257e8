#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

//! Map rotation pools and quorum voting over a relational store.
//!
//! Operations live in [`commands`]; each takes an [`AppState`] built by
//! [`infra::state::StateBuilder`].

pub mod adapters;
pub mod commands;
pub mod config;
pub mod db;
pub mod domain;
pub mod entities;
pub mod error;
pub mod errors;
pub mod infra;
pub mod repos;
pub mod services;
pub mod state;
pub mod telemetry;


// Re-exports for public API
pub use config::db::{DbConfig, DbKind};
pub use config::votes::VoteSettings;
pub use domain::votes::{RetractScope, SkipScope, Voter};
pub use error::AppError;
pub use errors::ErrorCode;
pub use infra::db::{bootstrap_db, connect_db, run_migration};
pub use infra::state::{build_state, StateBuilder};
pub use repos::rotation_maps::RotationMapEntry;
pub use services::{RetractedVotes, VoteOutcome, VotePassed};
pub use state::app_state::AppState;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
