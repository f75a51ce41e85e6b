use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt};

const FALLBACK_LEVEL: &str = "info";

/// `RUST_LOG` важнее `LOG_LEVEL`; нераспознанный уровень заменяется на `info`.
pub(crate) fn init_logging(default_level: &str) -> Result<()> {
    fmt()
        .with_env_filter(env_filter(default_level))
        .with_target(true)
        .compact()
        .try_init()
        .map_err(|err| anyhow!("failed to init logging: {err}"))
}

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new(FALLBACK_LEVEL))
}
