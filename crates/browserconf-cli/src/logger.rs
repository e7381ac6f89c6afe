//! Logging setup for the browserconf CLI.
//!
//! Logs go to stderr so the resolved configuration on stdout can be piped
//! straight into other tools.
//!
//! The level is chosen in this order:
//! 1. `--verbose`: debug for browserconf crates
//! 2. `--quiet`: errors only
//! 3. `RUST_LOG`
//! 4. info for browserconf crates

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str = "browserconf=debug,browserconf_cli=debug";
const QUIET_FILTER: &str = "browserconf=error,browserconf_cli=error";
const DEFAULT_FILTER: &str = "browserconf=info,browserconf_cli=info";

/// Pick the filter directive for the given flags
pub fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Install the global subscriber. Call once, before any logging.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    // A second call (e.g. from tests) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(filter_for(verbose, quiet))
        .with(fmt_layer)
        .try_init();
}
