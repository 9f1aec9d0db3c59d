use crate::types::LogLevel;
use is_terminal::IsTerminal;
use tracing_subscriber::EnvFilter;

/// Install the stderr subscriber
///
/// `RUST_LOG` wins over `--log-level` when set. Calling twice is a no-op.
pub fn init(level: LogLevel) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}
