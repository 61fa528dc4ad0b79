mod app;
mod client;
mod config;
mod dashboard;
mod error;
mod store;
#[cfg(test)]
mod testing;
mod ui;

use std::{fs::OpenOptions, sync::Arc, sync::Mutex, time::Duration};

use crate::{
    client::{DataProvider, FixtureProvider, HttpProvider},
    config::AppConfig,
    error::{AppError, Result},
};

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load()?;
    init_tracing(&config)?;

    let provider: Arc<dyn DataProvider> = match &config.fixture {
        Some(path) => Arc::new(
            FixtureProvider::load(path)?
                .with_page_size(config.page_size)
                .with_latency(Duration::from_millis(config.latency_ms)),
        ),
        None => Arc::new(HttpProvider::new(&config.base_url)?),
    };
    tracing::info!("starting dashboard against {}", config.source_label());

    let dashboard = dashboard::Dashboard::new(provider);
    let mut app = app::App::new(dashboard, config.source_label());
    app.run().await?;
    Ok(())
}

/// Logs go to a file; the terminal belongs to the UI.
fn init_tracing(config: &AppConfig) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "dashboard_tui={level},api_types={level}",
            level = config.log_level
        ))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|err| AppError::Logging(err.to_string()))
}
