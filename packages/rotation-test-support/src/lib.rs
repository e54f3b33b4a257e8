//! Shared helpers for rotation-core integration tests.

pub mod logging;
pub mod unique_helpers;
