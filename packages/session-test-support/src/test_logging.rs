//! Tracing setup for the session integration tests.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Quiet by default; `TEST_LOG=mahjong_session=debug` shows every intent.
const DEFAULT_DIRECTIVE: &str = "warn";

fn filter_from_env(default: &str) -> EnvFilter {
    ["TEST_LOG", "RUST_LOG"]
        .iter()
        .find_map(|var| std::env::var(var).ok())
        .map(EnvFilter::new)
        .unwrap_or_else(|| EnvFilter::new(default))
}

/// Install a test-writer subscriber once per test binary.
pub fn init() {
    init_with(DEFAULT_DIRECTIVE);
}

/// Like [`init`] with a different fallback directive. Only the first call in a
/// binary has any effect.
pub fn init_with(default: &str) {
    INITIALIZED.get_or_init(|| {
        fmt()
            .with_env_filter(filter_from_env(default))
            .with_test_writer()
            .without_time()
            .with_target(true)
            .try_init()
            .ok();
    });
}
