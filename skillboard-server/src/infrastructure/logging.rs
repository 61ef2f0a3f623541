use anyhow::{Result, anyhow};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt};

/// `RUST_LOG` wins over the configured level; an unparsable level falls back to `info`.
pub fn init_logging(default_level: &str) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().ok();
    let from_rust_log = env_filter.is_some();
    let filter = env_filter
        .or_else(|| EnvFilter::try_new(default_level).ok())
        .unwrap_or_else(|| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .compact()
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))?;

    debug!(from_rust_log, default_level, "logging initialised");
    Ok(())
}
