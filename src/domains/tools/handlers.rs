//! The contract every tool implements.
//!
//! A handler publishes its definition (name, title, description, input
//! schema) and turns already-validated arguments into a result. The
//! [`Dispatcher`](super::Dispatcher) runs validation before calling it.

use rmcp::model::{CallToolResult, JsonObject, Tool};
use schemars::JsonSchema;
use serde::{Deserialize, de::DeserializeOwned};

use super::error::ToolError;

/// Trait implemented by every registered tool.
#[async_trait::async_trait]
pub trait ToolHandler: Send + Sync {
    /// The tool's definition as advertised to clients.
    fn definition(&self) -> Tool;

    /// Execute the tool. Performs at most one upstream request.
    async fn call(&self, arguments: JsonObject) -> Result<CallToolResult, ToolError>;
}

/// Parameters of tools that take no input.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct NoParams {}

/// Deserialize validated arguments into a tool's params struct.
pub fn parse_params<P: DeserializeOwned>(arguments: JsonObject) -> Result<P, ToolError> {
    serde_json::from_value(serde_json::Value::Object(arguments))
        .map_err(|e| ToolError::validation("arguments", e.to_string()))
}
