//! MCP tool handlers for the sync bridge.
//!
//! Each tool is one user action. This is the boundary where sync errors are
//! caught and shown to the user as message text.

use crate::services::{EventService, EventServiceImpl, RecordUpdatedEvent, SyncService};
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;

/// The MCP server exposing the Attio -> Apollo actions.
#[derive(Clone)]
pub struct SyncMcpServer {
    sync_service: Arc<dyn SyncService>,
    event_service: Arc<dyn EventService>,
    tool_router: ToolRouter<Self>,
}

#[tool_handler]
impl ServerHandler for SyncMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities {
                tools: Some(Default::default()),
                ..Default::default()
            },
            server_info: Implementation {
                name: "attio-apollo-sync".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some("Syncs Attio people, companies and deals to Apollo contacts, accounts and opportunities, and pulls Apollo opportunity stages back into Attio.".into()),
        }
    }
}

/// Arguments naming one Attio record.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct RecordParams {
    /// Attio object slug: people, companies or deals
    pub object: String,
    /// Attio record id
    pub record_id: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct PullDealStageParams {
    /// Apollo opportunity id
    pub opportunity_id: String,
    /// Attio deal record id; looked up by stored Apollo id when omitted
    #[serde(default)]
    pub record_id: Option<String>,
}

fn error_result(message: impl std::fmt::Display) -> CallToolResult {
    CallToolResult::error(vec![Content::text(message.to_string())])
}

#[tool_router]
impl SyncMcpServer {
    pub fn new(sync_service: Arc<dyn SyncService>) -> Self {
        let event_service =
            Arc::new(EventServiceImpl::new(sync_service.clone())) as Arc<dyn EventService>;
        Self {
            sync_service,
            event_service,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "Push an Attio record (person, company or deal) to Apollo, creating or updating the matching contact, account or opportunity"
    )]
    pub async fn push_to_apollo(
        &self,
        params: Parameters<RecordParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        tracing::info!("MCP Handler: push_to_apollo {} {}", params.object, params.record_id);

        match self.sync_service.push(&params.object, &params.record_id).await {
            Ok(outcome) => Ok(CallToolResult::success(vec![Content::text(
                outcome.status_message(),
            )])),
            Err(e) => {
                tracing::error!("push_to_apollo failed: {:?}", e);
                Ok(error_result(e))
            }
        }
    }

    #[tool(description = "Get the Apollo web URL for an Attio record that has been synced")]
    pub async fn view_in_apollo(
        &self,
        params: Parameters<RecordParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        match self.sync_service.find(&params.object, &params.record_id).await {
            Ok(Some(link)) => Ok(CallToolResult::success(vec![Content::text(format!(
                "View in Apollo: {}",
                link.url
            ))])),
            Ok(None) => Ok(CallToolResult::success(vec![Content::text(
                "Not yet synced to Apollo",
            )])),
            Err(e) => {
                tracing::error!("view_in_apollo failed: {:?}", e);
                Ok(error_result(e))
            }
        }
    }

    #[tool(
        description = "Notify the bridge that an Attio record was updated. Syncs it to Apollo in the background of the update and never fails"
    )]
    pub async fn record_updated(
        &self,
        params: Parameters<RecordUpdatedEvent>,
    ) -> Result<CallToolResult, McpError> {
        let event = params.0;
        let message = match self.event_service.handle_record_updated(&event).await {
            Some(outcome) => outcome.status_message(),
            None => format!("No sync performed for {} {}", event.object, event.record_id),
        };
        Ok(CallToolResult::success(vec![Content::text(message)]))
    }

    #[tool(description = "Copy an Apollo opportunity's stage onto the linked Attio deal")]
    pub async fn pull_deal_stage(
        &self,
        params: Parameters<PullDealStageParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        match self
            .sync_service
            .pull_deal_stage(&params.opportunity_id, params.record_id.as_deref())
            .await
        {
            Ok(outcome) => Ok(CallToolResult::success(vec![Content::text(
                outcome.status_message(),
            )])),
            Err(e) => {
                tracing::error!("pull_deal_stage failed: {:?}", e);
                Ok(error_result(e))
            }
        }
    }
}
