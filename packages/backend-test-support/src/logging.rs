//! Unified test logging initialization
//!
//! Shared by the `hearts` unit tests (via `ctor` in `lib.rs`) and the
//! integration test binaries (via `tests/common/mod.rs`).

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Initialize structured logging for tests.
///
/// Idempotent and race-safe. The filter is taken from `TEST_LOG`, then
/// `RUST_LOG`, and falls back to `"warn"` so game and lobby chatter stays
/// quiet unless asked for.
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .with_target(false)
            .try_init()
            .ok();
    });
}
