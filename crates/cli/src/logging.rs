//! Tracing subscriber setup.

use boardroom_config::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// `RUST_LOG` wins over the configured level; `--verbose` forces `debug`.
/// Logs go to stderr so stdout carries only the conversation.
pub fn init(verbose: bool, config: &LoggingConfig) {
    let level = if verbose { "debug" } else { config.level.as_str() };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    // Ignore a second init (tests, embedding)
    let _ = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}
