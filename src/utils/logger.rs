//! Logging set-up
//!
//! Events from this crate go to stderr so that `send` can write the raw
//! gateway response to stdout untouched.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Level for this crate's events: debug when verbose, info otherwise.
pub fn crate_level(verbose: bool) -> Level {
    if verbose {
        Level::DEBUG
    } else {
        Level::INFO
    }
}

fn filter_directive(level: Level) -> String {
    format!("pxpay_gateway={level}")
}

/// `RUST_LOG` wins when set; otherwise only this crate logs, at `level`.
fn build_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_directive(level)))
}

/// Install the global subscriber
pub fn init_logger(verbose: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(crate_level(verbose)))
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
