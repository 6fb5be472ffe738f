//! Tracing setup for the `sully` binary.
//!
//! Diagnostics go to stderr so they never mix with command output or the
//! output of the tools sully launches. `SULLY_LOG` takes an `EnvFilter`
//! directive (e.g. `SULLY_LOG=sully=trace`); without it the level is `warn`,
//! or `debug` with `--verbose`.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "SULLY_LOG";

/// Level used when `SULLY_LOG` is unset.
pub fn default_level(verbose: bool) -> Level {
    if verbose { Level::DEBUG } else { Level::WARN }
}

/// Install the global subscriber. Only the first call takes effect.
pub fn init_tracing(verbose: bool) {
    let level = default_level(verbose);
    let env_filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .try_init()
        .ok();
}
