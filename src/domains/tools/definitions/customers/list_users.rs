//! List every user of the customer directory as JSON.

use rmcp::{
    handler::server::tool::cached_schema_for_type,
    model::{CallToolResult, JsonObject, Tool},
};
use serde_json::Value;
use tracing::info;

use super::USERS_KEY;
use crate::domains::tools::{
    NoParams, ToolError, ToolHandler,
    shaping::{pretty_json, records, text_result},
    upstream::{UpstreamClient, UpstreamRequest},
};

/// List Users tool implementation.
#[derive(Debug, Clone)]
pub struct ListUsersTool {
    client: UpstreamClient,
}

impl ListUsersTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "listUsers";

    pub const TITLE: &'static str = "List users";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Lists the users of the customer directory as a JSON array.";

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
        pretty_json(Self::NAME, users)
    }
}

#[async_trait::async_trait]
impl ToolHandler for ListUsersTool {
    fn definition(&self) -> Tool {
        Self::to_tool()
    }

    async fn call(&self, _arguments: JsonObject) -> Result<CallToolResult, ToolError> {
        info!("Listing users");
        let body = self
            .client
            .get_json(Self::NAME, UpstreamRequest::get(["users"]))
            .await?;
        Self::shape(&body).map(text_result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_shape_empty_list() {
        assert_eq!(ListUsersTool::shape(&json!({ "users": [] })).unwrap(), "[]");
    }

    #[test]
    fn test_shape_missing_users_is_empty() {
        assert_eq!(ListUsersTool::shape(&json!({ "limit": 30 })).unwrap(), "[]");
    }

    #[test]
    fn test_shape_keeps_records() {
        let body = json!({ "users": [{ "id": 1 }, { "id": 2, "email": null }], "total": 2 });
        let parsed: Value = serde_json::from_str(&ListUsersTool::shape(&body).unwrap()).unwrap();
        assert_eq!(parsed, json!([{ "id": 1 }, { "id": 2, "email": null }]));
    }

    #[test]
    fn test_shape_rejects_non_array_users() {
        assert!(matches!(
            ListUsersTool::shape(&json!({ "users": "everyone" })),
            Err(ToolError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn test_shape_rejects_bare_array_body() {
        assert!(matches!(
            ListUsersTool::shape(&json!([{ "id": 1 }])),
            Err(ToolError::MalformedResponse { .. })
        ));
    }
}
