//! Diagnostic logging setup.
//!
//! Logs go to stderr so they never interleave with console output on stdout.
//! The filter comes from `TCONSOLE_LOG` (e.g. `debug`, `tconsole_core=trace`)
//! and defaults to `warn`.

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "TCONSOLE_LOG";
const DEFAULT_LEVEL: &str = "warn";

pub fn init() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));

    // A second init (e.g. in tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(true)
        .try_init();
}
