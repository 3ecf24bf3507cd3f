use tracing_subscriber::EnvFilter;

/// Install the fmt subscriber for binaries and tests.
///
/// Filter defaults to `paceline=info`; override with `RUST_LOG`. Safe to
/// call more than once; later installs are ignored.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("paceline=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
