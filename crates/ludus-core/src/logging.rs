//! Logging setup
//!
//! All output goes to stderr so `--json` output on stdout stays parseable.
//! `RUST_LOG` replaces the default filter when set.

use tracing_subscriber::EnvFilter;

const VERBOSE_FILTER: &str = "debug,hyper_util=info,rustls=info";
const QUIET_FILTER: &str = "info";

/// Default filter directive for the given verbosity
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose { VERBOSE_FILTER } else { QUIET_FILTER }
}

/// Install the global subscriber
///
/// Verbose mode adds timestamps and targets; otherwise lines carry only
/// the level and message. Returns `false` if a subscriber was already set.
pub fn init_logging(verbose: bool) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if verbose {
        builder.with_target(true).try_init().is_ok()
    } else {
        builder
            .with_target(false)
            .without_time()
            .try_init()
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        assert_eq!(default_filter(false), "info");
        assert!(default_filter(true).starts_with("debug"));
    }

    #[test]
    fn test_second_init_is_rejected() {
        init_logging(false);
        assert!(!init_logging(true));
    }
}
