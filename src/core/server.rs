//! MCP Server implementation and lifecycle management.
//!
//! The server owns the tool [`Dispatcher`] and exposes it two ways:
//! - through an rmcp `ToolRouter` (STDIO/TCP), built from the registry in
//!   `domains/tools/router.rs`
//! - through [`McpServer::call_tool`] for the plain HTTP transport
//!
//! Adding a tool only touches the tool registry, never this file.

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::tool::ToolRouter,
    model::{JsonObject, ServerCapabilities, ServerInfo},
    tool_handler,
};
use std::sync::Arc;

use super::config::Config;
use super::error::Result as CoreResult;
use crate::domains::tools::{Dispatcher, ToolError, ToolRegistry, build_tool_router};

const INSTRUCTIONS: &str = "Read-only tools over the customer directory and the subscriber service. \
Lookup tools return a JSON record or null; table tools return comma-separated text \
whose first line is the header.";

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Dispatcher shared by every transport.
    dispatcher: Dispatcher,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    ///
    /// Fails if the tool catalog cannot be built.
    pub fn new(config: Config) -> CoreResult<Self> {
        let config = Arc::new(config);
        let registry = ToolRegistry::with_default_tools(&config)?;
        let dispatcher = Dispatcher::new(Arc::new(registry));

        Ok(Self {
            tool_router: build_tool_router::<Self>(&dispatcher),
            dispatcher,
            config,
        })
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools (for HTTP transport).
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "title": t.title,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Call a tool by name (for HTTP transport).
    ///
    /// Upstream failures come back as `Ok` with `isError: true`. Unknown
    /// tools and invalid arguments come back as `invalid_params`, registry
    /// faults as `internal_error`, both with their structured data.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, McpError> {
        let arguments = match arguments {
            serde_json::Value::Object(map) => map,
            serde_json::Value::Null => JsonObject::new(),
            _ => {
                return Err(McpError::invalid_params(
                    "Tool arguments must be a JSON object",
                    None,
                ));
            }
        };

        let result = self
            .dispatcher
            .dispatch(name, arguments)
            .await
            .or_else(ToolError::into_response)?;

        serde_json::to_value(result).map_err(|e| McpError::internal_error(e.to_string(), None))
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_lists_all_tools() {
        let server = McpServer::new(Config::default()).unwrap();
        let tools = server.list_tools();
        assert_eq!(tools.len(), 7);
        assert!(
            tools
                .iter()
                .all(|t| t["inputSchema"]["type"] == "object")
        );
    }

    #[tokio::test]
    async fn test_call_tool_unknown() {
        let server = McpServer::new(Config::default()).unwrap();
        let err = server
            .call_tool("unknown", serde_json::json!({}))
            .await
            .unwrap_err();
        assert_eq!(err.code, rmcp::model::ErrorCode::INVALID_PARAMS);
        assert!(err.message.contains("Unknown tool"));
        assert_eq!(err.data.unwrap()["tool"], "unknown");
    }

    #[tokio::test]
    async fn test_call_tool_rejects_non_object_arguments() {
        let server = McpServer::new(Config::default()).unwrap();
        let err = server
            .call_tool("listUsers", serde_json::json!([1, 2]))
            .await
            .unwrap_err();
        assert!(err.message.contains("JSON object"));
    }

    #[tokio::test]
    async fn test_call_tool_validation_before_network() {
        let server = McpServer::new(Config::default()).unwrap();
        let err = server
            .call_tool("findCustomerByFirstName", serde_json::json!({ "firstName": "J" }))
            .await
            .unwrap_err();
        assert_eq!(err.data.unwrap()["parameter"], "firstName");
    }
}
