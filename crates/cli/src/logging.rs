//! Tracing setup for the CLI.
//!
//! Events go to stderr so that report output on stdout stays parseable.

use std::sync::Once;

use tracing::debug;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

/// Default filter directive: `debug` when verbose, `warn` otherwise.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "warn"
    }
}

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `verbose`. Subsequent calls are ignored.
pub fn init_tracing(verbose: bool) {
    INIT.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

        let fmt_layer = fmt::layer().with_writer(std::io::stderr).with_target(true);

        tracing_subscriber::registry().with(env_filter).with(fmt_layer).init();

        debug!("memalias tracing initialized");
    });
}
