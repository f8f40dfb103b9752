mod server;

use anyhow::Result;
use tracing::info;

use tunein_core::{
    bootstrap::{init_services, load_config},
    logging,
};

use server::TuneInServer;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Load and validate configuration
    let config = load_config()?;

    // 2. Initialize logging
    logging::init_logging(&config.logging)?;
    info!("TuneIn server starting...");
    info!("HTTP address: {}", config.http_address());

    // 3. Initialize services
    let services = init_services(&config).await?;

    // 4. Serve until shutdown
    TuneInServer::new(config, services).start().await
}
