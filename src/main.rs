use anyhow::Result;
use tracing::info;

use blog_api::infrastructure::logging::init_logging;
use blog_api::infrastructure::settings::Settings;
use blog_api::server;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env()?;

    init_logging(&settings.log_level)?;

    let handle = server::start(&settings).await?;

    tokio::signal::ctrl_c().await?;
    info!("shutdown signal received");
    handle.stop().await?;

    Ok(())
}
