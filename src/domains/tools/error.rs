//! Tool-specific error types.

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use serde_json::{Value, json};
use thiserror::Error;

/// Errors that can occur while registering or dispatching tools.
#[derive(Debug, Error)]
pub enum ToolError {
    /// An argument is missing, has the wrong JSON type or is out of bounds.
    #[error("Invalid parameter '{parameter}': {constraint}")]
    Validation {
        parameter: String,
        constraint: String,
    },

    /// The requested tool is not registered.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// A tool with the same name was registered twice.
    #[error("Duplicate tool: {0}")]
    DuplicateTool(String),

    /// The upstream answered with a non-success HTTP status.
    #[error("{tool}: upstream returned HTTP {status}")]
    Upstream { tool: String, status: u16 },

    /// The upstream body was not JSON or lacked the expected top-level shape.
    #[error("{tool}: malformed upstream response: {reason}")]
    MalformedResponse { tool: String, reason: String },

    /// The request never produced a response (connect failure, timeout).
    #[error("{tool}: upstream request failed: {message}")]
    Transport { tool: String, message: String },

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ToolError {
    /// Create a new validation error.
    pub fn validation(parameter: impl Into<String>, constraint: impl Into<String>) -> Self {
        Self::Validation {
            parameter: parameter.into(),
            constraint: constraint.into(),
        }
    }

    /// Create a new "unknown tool" error.
    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::UnknownTool(name.into())
    }

    /// Create a new "malformed response" error.
    pub fn malformed(tool: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            tool: tool.into(),
            reason: reason.into(),
        }
    }

    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Short machine-readable name of the error category.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation",
            Self::UnknownTool(_) => "unknown_tool",
            Self::DuplicateTool(_) => "duplicate_tool",
            Self::Upstream { .. } => "upstream",
            Self::MalformedResponse { .. } => "malformed_response",
            Self::Transport { .. } => "transport",
            Self::Internal(_) => "internal",
        }
    }

    /// Structured description of the failure, safe to show to clients.
    pub fn details(&self) -> Value {
        let mut details = json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        let fields = match self {
            Self::Validation {
                parameter,
                constraint,
            } => json!({ "parameter": parameter, "constraint": constraint }),
            Self::UnknownTool(name) | Self::DuplicateTool(name) => json!({ "tool": name }),
            Self::Upstream { tool, status } => json!({ "tool": tool, "status": status }),
            Self::MalformedResponse { tool, .. } | Self::Transport { tool, .. } => {
                json!({ "tool": tool })
            }
            Self::Internal(_) => json!({}),
        };
        if let (Some(target), Value::Object(extra)) = (details.as_object_mut(), fields) {
            target.extend(extra);
        }
        details
    }

    /// Convert a failed dispatch into what the MCP host expects.
    ///
    /// Caller mistakes (bad arguments, unknown tool) become protocol errors.
    /// Failures while talking to the upstream become a tool result flagged
    /// with `isError`, so the calling agent can read and react to them.
    pub fn into_response(self) -> Result<CallToolResult, McpError> {
        match self {
            Self::Validation { .. } | Self::UnknownTool(_) => Err(McpError::invalid_params(
                self.to_string(),
                Some(self.details()),
            )),
            Self::Upstream { .. } | Self::MalformedResponse { .. } | Self::Transport { .. } => {
                let mut result = CallToolResult::error(vec![Content::text(self.to_string())]);
                result.structured_content = Some(json!({ "error": self.details() }));
                Ok(result)
            }
            Self::DuplicateTool(_) | Self::Internal(_) => Err(McpError::internal_error(
                self.to_string(),
                Some(self.details()),
            )),
        }
    }
}
