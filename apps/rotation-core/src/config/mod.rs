//! Environment-driven configuration.

pub mod db;
pub mod votes;

pub use db::{DbConfig, DbKind};
pub use votes::VoteSettings;
