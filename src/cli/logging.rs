//! Diagnostic logging to stderr

use tracing_subscriber::EnvFilter;

/// Initializes the tracing subscriber
///
/// `RUST_LOG` selects the filter; without it only warnings are shown.
/// `--verbose` adds debug output on top of either.
pub fn init_logging(verbose: bool) {
    let mut filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    if verbose {
        filter = filter.add_directive(tracing::Level::DEBUG.into());
    }

    // A subscriber may already be installed when embedded; keep that one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
