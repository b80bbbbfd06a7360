// src/logging.rs

use tracing_subscriber::{fmt, EnvFilter};

/// Filter used when `RUST_LOG` is not set.
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "debug,oceantemp=debug"
    } else {
        "info,oceantemp=info"
    }
}

/// Install the global subscriber. Logs go to stderr so stdout only carries the table.
pub fn init(verbose: bool) {
    let env = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));
    let _ = fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
