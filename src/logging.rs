//! Log subscriber setup. Logs go to stderr so stdout stays free for the
//! console summaries.

use tracing::debug;

/// Default filter directive for the CLI flags. `--debug` wins over `-v`.
pub fn log_level(verbose: bool, debug: bool) -> &'static str {
    if debug {
        "debug"
    } else if verbose {
        "info"
    } else {
        "warn"
    }
}

/// Install the global subscriber. `RUST_LOG` overrides the flags.
pub fn init_logging(verbose: bool, debug: bool) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let level = log_level(verbose, debug);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    debug!("Logging initialized at level: {}", level);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level() {
        assert_eq!(log_level(false, false), "warn");
        assert_eq!(log_level(true, false), "info");
        assert_eq!(log_level(false, true), "debug");
        assert_eq!(log_level(true, true), "debug");
    }
}
