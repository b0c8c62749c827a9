use tracing_subscriber::{EnvFilter, fmt};

/// Installs the global subscriber for the CLI.
///
/// The level comes from `RUST_LOG` and defaults to `info`. Output goes to
/// stderr so reports printed on stdout stay clean.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .init();
}

/// Debug-level subscriber for tests; safe to call more than once.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
