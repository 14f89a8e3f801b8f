//! MCP server for the Attio -> Apollo bridge.
//!
//! Exposes the sync actions as MCP tools over stdio.

pub mod handlers;

pub use handlers::{PullDealStageParams, RecordParams, SyncMcpServer};

use anyhow::Result;
use rmcp::transport::io::stdio;
use rmcp::ServiceExt;

/// Run the server on stdin/stdout until the client disconnects.
pub async fn run_server(server: SyncMcpServer) -> Result<()> {
    let service = server.serve(stdio()).await?;
    service.waiting().await?;
    Ok(())
}
