use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::info;

mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;
mod server;

use data::repositories::remote::feed_repository::HttpFeedRepository;
use infrastructure::logging::init_logging;
use infrastructure::settings::Settings;
use presentation::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env()?;

    init_logging(&settings.log_level)?;

    let repo = HttpFeedRepository::new(
        &settings.upstream_api_url,
        Duration::from_secs(settings.upstream_timeout_secs),
    )?;
    info!(upstream = %settings.upstream_api_url, "feed upstream configured");

    let state = AppState::new(Arc::new(repo), &settings);
    server::run_http(&settings, state).await
}
