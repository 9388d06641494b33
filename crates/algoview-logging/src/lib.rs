//! Tracing setup shared by Algoview binaries.
//!
//! Libraries only emit events through `tracing`; a binary calls [`init`]
//! once at startup. The filter is read from `RUST_LOG` and falls back to
//! [`DEFAULT_FILTER`]. Output goes to stderr so stdout stays free for
//! program output.

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "algoview=info";

/// Install the global subscriber with [`DEFAULT_FILTER`].
///
/// Does nothing if a subscriber is already installed.
pub fn init() {
    if let Err(e) = try_init_with_filter(DEFAULT_FILTER) {
        tracing::debug!("Subscriber already installed: {}", e);
    }
}

/// Install the global subscriber with a custom fallback filter.
pub fn init_with_filter(default: &str) {
    if let Err(e) = try_init_with_filter(default) {
        tracing::debug!("Subscriber already installed: {}", e);
    }
}

/// Install the global subscriber, failing if one is already set.
pub fn try_init_with_filter(default: &str) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(env_filter(default))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
}

/// Filter from `RUST_LOG`, or `default` when that is unset or invalid.
pub fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_install_fails_quietly() {
        init();
        assert!(try_init_with_filter(DEFAULT_FILTER).is_err());
        init_with_filter("algoview=debug");
    }
}
