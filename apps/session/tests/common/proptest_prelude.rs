// Shared proptest configuration for the integration tests.
//
// PROPTEST_CASES sets the number of cases (default 8); PROPTEST_MAX_SHRINK_MS
// caps shrinking time. Regression files are not written.

fn env_u32(name: &str) -> Option<u32> {
    std::env::var(name).ok().and_then(|s| s.parse().ok())
}

pub fn proptest_prelude_config() -> proptest::prelude::ProptestConfig {
    let base = proptest::prelude::ProptestConfig::default();
    proptest::prelude::ProptestConfig {
        failure_persistence: None,
        cases: env_u32("PROPTEST_CASES").unwrap_or(8).max(1),
        max_shrink_time: env_u32("PROPTEST_MAX_SHRINK_MS").unwrap_or(base.max_shrink_time),
        ..base
    }
}
