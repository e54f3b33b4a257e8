//! Shared proptest configuration for unit-level property tests.

use proptest::prelude::ProptestConfig;

/// Case count from `PROPTEST_CASES` (default 64), no regression files.
pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(64)
        .max(1);

    ProptestConfig {
        failure_persistence: None,
        cases,
        ..ProptestConfig::default()
    }
}
