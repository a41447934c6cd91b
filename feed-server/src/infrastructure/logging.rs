use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt};

/// Пул соединений reqwest/hyper очень разговорчив на уровне debug.
const QUIET_DEPENDENCIES: &[&str] = &["hyper_util=warn", "reqwest=info"];

pub fn init_logging(default_level: &str) -> Result<()> {
    let filter = build_filter(default_level);

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .compact()
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))?;

    Ok(())
}

fn build_filter(default_level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    let directives = std::iter::once(default_level)
        .chain(QUIET_DEPENDENCIES.iter().copied())
        .collect::<Vec<_>>()
        .join(",");

    EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new("info"))
}
