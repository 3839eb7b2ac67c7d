//! Tracing subscriber setup for the binary.
//!
//! Logs go to stderr so stdout stays clean for `--json` output. `RUST_LOG`
//! wins over the built-in default when set.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "quote_engine=debug"
    } else {
        "quote_engine=info"
    }
}

/// Install the global subscriber. A second call is a no-op.
pub fn init(verbose: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_raises_the_crate_level() {
        assert_eq!(default_directive(false), "quote_engine=info");
        assert_eq!(default_directive(true), "quote_engine=debug");
    }

    #[test]
    fn init_twice_does_not_panic() {
        init(false);
        init(true);
    }
}
