//! Tracing subscriber setup for applications embedding the library

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::{NwisError, Result};

const LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Install a compact stderr subscriber at `level` for this crate.
///
/// `RUST_LOG` takes precedence when set. If a global subscriber is already
/// installed the call leaves it in place and returns `Ok`.
pub fn init_logging(level: &str) -> Result<()> {
    let level = level.trim().to_ascii_lowercase();
    if !LEVELS.contains(&level.as_str()) {
        return Err(NwisError::configuration(format!(
            "unknown log level '{}', expected one of {}",
            level,
            LEVELS.join(", ")
        )));
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("nwis_rdb={}", level)));

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init();

    if installed.is_err() {
        tracing::debug!("Global subscriber already set, keeping it");
    }
    Ok(())
}
