//! Subscriber listing as a delimited table.

use rmcp::{
    handler::server::tool::cached_schema_for_type,
    model::{CallToolResult, JsonObject, Tool},
};
use serde_json::Value;
use tracing::info;

use super::common::{SUBSCRIBER_COLUMNS, SUBSCRIBERS_KEY, subscribers_request};
use crate::domains::tools::{
    NoParams, ToolError, ToolHandler,
    shaping::{records, text_result},
    table::Table,
    upstream::UpstreamClient,
};

/// List Subscribers Table tool implementation.
#[derive(Debug, Clone)]
pub struct ListSubscribersTableTool {
    client: UpstreamClient,
}

impl ListSubscribersTableTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "listSubscribersTable";

    pub const TITLE: &'static str = "List subscribers as a table";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Lists all subscribers as comma-separated text with the header id,name,email,plan,status,devices. The devices cell holds the subscriber's devices as inline JSON.";

    pub fn new(client: UpstreamClient) -> Self {
        Self { client }
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<NoParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: Some(Self::TITLE.into()),
        }
    }

    pub fn shape(body: &Value) -> Result<String, ToolError> {
        let subscribers = records(Self::NAME, body, SUBSCRIBERS_KEY)?;
        Ok(Table::from_records(SUBSCRIBER_COLUMNS, subscribers).render())
    }
}

#[async_trait::async_trait]
impl ToolHandler for ListSubscribersTableTool {
    fn definition(&self) -> Tool {
        Self::to_tool()
    }

    async fn call(&self, _arguments: JsonObject) -> Result<CallToolResult, ToolError> {
        info!("Listing subscribers");
        let body = self
            .client
            .get_json(Self::NAME, subscribers_request())
            .await?;
        Self::shape(&body).map(text_result)
    }
}
