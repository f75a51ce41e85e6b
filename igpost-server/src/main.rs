use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;
mod server;

use application::post_service::PostService;
use data::repositories::json_log::JsonLogStore;
use infrastructure::logging::init_logging;
use infrastructure::settings::Settings;
use presentation::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env()?;

    init_logging(&settings.log_level)?;

    let store = Arc::new(
        JsonLogStore::open(&settings.store_path)
            .await
            .context("failed to open post log")?,
    );
    let post_service = Arc::new(PostService::new(Arc::clone(&store)));
    let state = AppState::new(post_service);

    let served = server::run_http(&settings, state).await;

    store.close().await?;
    info!("shutdown complete");
    served
}
