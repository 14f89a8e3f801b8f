//! attio-apollo-sync - main entry point
//!
//! Runs the Attio -> Apollo sync bridge as an MCP server over stdio.

use anyhow::Result;
use attio_apollo_sync::client::{
    AsyncApolloClient, AsyncApolloClientImpl, AsyncAttioClient, AsyncAttioClientImpl,
};
use attio_apollo_sync::repositories::{
    ApolloRepository, AttioRepository, SourceRepository, TargetRepository,
};
use attio_apollo_sync::services::{SyncService, SyncServiceImpl};
use attio_apollo_sync::{ApolloClient, AttioClient, Config, Metrics, SyncMcpServer};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // .env may set LOG_LEVEL, so load it before the subscriber
    dotenvy::dotenv().ok();
    let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // stdout carries MCP traffic
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match Config::from_env() {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    info!(
        "Starting attio-apollo-sync (Attio: {}, Apollo: {})",
        config.attio_api_url, config.apollo_api_url
    );

    let metrics = Metrics::new();
    let attio = Arc::new(AsyncAttioClientImpl::new(AttioClient::new(&config, metrics.clone())))
        as Arc<dyn AsyncAttioClient>;
    let apollo = Arc::new(AsyncApolloClientImpl::new(ApolloClient::new(
        &config,
        metrics.clone(),
    ))) as Arc<dyn AsyncApolloClient>;

    let source = Arc::new(AttioRepository::new(attio, config.search_page_size))
        as Arc<dyn SourceRepository>;
    let target = Arc::new(ApolloRepository::new(apollo, config.search_page_size))
        as Arc<dyn TargetRepository>;

    let sync_service = Arc::new(SyncServiceImpl::from_config(
        source,
        target,
        &config,
        metrics.clone(),
    )) as Arc<dyn SyncService>;
    let server = SyncMcpServer::new(sync_service);

    info!("Starting MCP server with stdio transport");
    attio_apollo_sync::server::run_server(server).await?;

    let summary = metrics.summary();
    info!(
        "Shutdown: {} requests ({} errors, avg {:.1} ms), {} created, {} updated, {} stage pass-throughs",
        summary.http_requests_total,
        summary.http_errors_total,
        summary.http_duration_avg_ms,
        summary.records_created_total,
        summary.records_updated_total,
        summary.stage_passthroughs_total
    );
    Ok(())
}
