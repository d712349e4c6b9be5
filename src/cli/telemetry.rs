use anyhow::{Result, anyhow};
use tracing::Level;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Map the `-v` count to a log level; `None` keeps only warnings and errors
#[must_use]
pub const fn level_from_count(count: u8) -> Option<Level> {
    match count {
        0 => None,
        1 => Some(Level::INFO),
        2 => Some(Level::DEBUG),
        _ => Some(Level::TRACE),
    }
}

fn default_directive(verbosity: Option<Level>) -> String {
    let level = verbosity.unwrap_or(Level::WARN);
    let crate_name = env!("CARGO_PKG_NAME");
    // sqlx statement logging stays quiet unless trace is asked for
    if level == Level::TRACE {
        format!("{crate_name}={level},sqlx={level}")
    } else {
        format!("{crate_name}={level},sqlx=warn")
    }
}

/// Install the global subscriber, writing to stderr
///
/// `RUST_LOG` takes precedence over the verbosity flag.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
pub fn init(verbosity: Option<Level>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize telemetry: {e}"))
}
