use anyhow::Result;
use dotenvy::dotenv;
use log::{error, info};

use iconmaker::config::Config;
use iconmaker::http_server::start_http_server;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("🚀 Starting IconMaker HTTP Server...");
    info!("🔑 Replicate API token loaded: {}", config.masked_token());
    info!("🎨 Image model: {}", config.replicate_model);

    if let Err(e) = start_http_server(config).await {
        error!("❌ HTTP server failed: {}", e);
        return Err(e);
    }

    Ok(())
}
