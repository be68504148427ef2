//! Climate Query Service - Main Entry Point

use api::{init_logging, run_server, ServerConfig};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::load()?;
    init_logging(config.level()?, config.json_logs);

    info!("=== Climate Query Service v{} ===", env!("CARGO_PKG_VERSION"));
    info!("Dataset: {}", config.database_url);

    run_server(config).await
}
