use anyhow::Result;
use rmcp::{ServiceExt, transport::stdio};
use tracing_subscriber::EnvFilter;

use tripkit::config::AppConfig;
use tripkit::server::TripServer;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // stdout carries the MCP protocol; all diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::from_env();
    tracing::info!("starting tripkit MCP server on stdio");

    let service = TripServer::new(&config).serve(stdio()).await?;
    service.waiting().await?;
    Ok(())
}
