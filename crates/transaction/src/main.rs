use anyhow::{Context, Result};
use dotenv::dotenv;
use shared::{config::Config, utils::Logger};
use tracing::info;
use transaction::{handler::AppRouter, state::AppState};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let config = Config::init().context("Failed to load configuration")?;

    let _logger = Logger::new("transaction", config.is_dev);

    let port = config.port;

    let state = AppState::new(&config)
        .await
        .context("Failed to create AppState")?;

    info!("🚀 Server started successfully");

    AppRouter::serve(port, state)
        .await
        .context("Failed to start server")?;

    info!("Shutting down servers...");

    Ok(())
}
