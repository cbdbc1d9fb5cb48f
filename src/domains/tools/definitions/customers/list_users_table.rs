//! List every user of the customer directory as a delimited table.

use rmcp::{
    handler::server::tool::cached_schema_for_type,
    model::{CallToolResult, JsonObject, Tool},
};
use serde_json::Value;
use tracing::info;

use super::USERS_KEY;
use crate::domains::tools::{
    NoParams, ToolError, ToolHandler,
    shaping::{records, text_result},
    table::{Column, Table},
    upstream::{UpstreamClient, UpstreamRequest},
};

/// Output columns, in order, and the directory fields they come from.
pub const USER_COLUMNS: &[Column] = &[
    Column::new("id", "id"),
    Column::new("first_name", "firstName"),
    Column::new("last_name", "lastName"),
    Column::new("email", "email"),
    Column::new("phone", "phone"),
    Column::new("company", "company.name"),
];

/// List Users Table tool implementation.
#[derive(Debug, Clone)]
pub struct ListUsersTableTool {
    client: UpstreamClient,
}

impl ListUsersTableTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "listUsersTable";

    pub const TITLE: &'static str = "List users as a table";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Lists the users of the customer directory as comma-separated text with the header id,first_name,last_name,email,phone,company.";

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
        let users = records(Self::NAME, body, USERS_KEY)?;
        Ok(Table::from_records(USER_COLUMNS, users).render())
    }
}

#[async_trait::async_trait]
impl ToolHandler for ListUsersTableTool {
    fn definition(&self) -> Tool {
        Self::to_tool()
    }

    async fn call(&self, _arguments: JsonObject) -> Result<CallToolResult, ToolError> {
        info!("Listing users as table");
        let body = self
            .client
            .get_json(Self::NAME, UpstreamRequest::get(["users"]))
            .await?;
        Self::shape(&body).map(text_result)
    }
}
