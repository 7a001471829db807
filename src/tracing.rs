//! Tracing initialization.

use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Install the global subscriber. Later calls are no-ops.
///
/// The default level is INFO, or DEBUG when `verbose` is set or a test runner
/// is detected; `RUST_LOG` overrides it. Output goes to stderr so stdout only
/// carries query results.
pub fn init(verbose: bool) {
    INIT.call_once(|| {
        let is_test =
            std::env::var("NEXTEST").is_ok() || std::env::var("CARGO_TARGET_TMPDIR").is_ok();
        let level = if is_test || verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        };
        let filter = EnvFilter::builder()
            .with_default_directive(level.into())
            .from_env_lossy();

        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_target(true)
            .compact();

        let installed = if is_test {
            builder.with_test_writer().try_init()
        } else {
            builder.with_writer(std::io::stderr).try_init()
        };
        if let Err(e) = installed {
            eprintln!("Failed to initialize tracing: {}", e);
        }
    });
}
