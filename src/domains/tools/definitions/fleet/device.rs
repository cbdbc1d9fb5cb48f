//! Device record by id, from the admin surface.

use rmcp::{
    handler::server::tool::cached_schema_for_type,
    model::{CallToolResult, JsonObject, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::domains::tools::{
    ToolError, ToolHandler, parse_params,
    shaping::{first_or_self, pretty_json, text_result},
    upstream::{UpstreamClient, UpstreamRequest},
};

/// Parameters for the device lookup.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetDeviceParams {
    #[schemars(description = "Numeric device id")]
    #[schemars(range(min = 1))]
    pub id: i64,
}

/// Get Device tool implementation.
#[derive(Debug, Clone)]
pub struct GetDeviceTool {
    client: UpstreamClient,
}

impl GetDeviceTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "getDevice";

    pub const TITLE: &'static str = "Get device";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Fetches a single device record by its numeric id and returns it as JSON.";

    pub fn new(client: UpstreamClient) -> Self {
        Self { client }
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<GetDeviceParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: Some(Self::TITLE.into()),
        }
    }

    fn request(params: &GetDeviceParams) -> UpstreamRequest {
        UpstreamRequest::get(["admin".to_string(), "devices".to_string(), params.id.to_string()])
            .accept_json()
    }

    pub fn shape(body: &Value) -> Result<String, ToolError> {
        match body {
            Value::Null | Value::Object(_) | Value::Array(_) => {
                pretty_json(Self::NAME, &first_or_self(body))
            }
            other => Err(ToolError::malformed(
                Self::NAME,
                format!("expected a device object, got {other}"),
            )),
        }
    }
}

#[async_trait::async_trait]
impl ToolHandler for GetDeviceTool {
    fn definition(&self) -> Tool {
        Self::to_tool()
    }

    async fn call(&self, arguments: JsonObject) -> Result<CallToolResult, ToolError> {
        let params: GetDeviceParams = parse_params(arguments)?;
        info!("Fetching device {}", params.id);

        let body = self
            .client
            .get_json(Self::NAME, Self::request(&params))
            .await?;
        Self::shape(&body).map(text_result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_schema_is_integer_with_minimum() {
        let schema = GetDeviceTool::to_tool().input_schema;
        let property = &schema["properties"]["id"];
        assert_eq!(property["type"], "integer");
        assert_eq!(property["minimum"].as_f64(), Some(1.0));
    }

    #[test]
    fn test_shape_object() {
        let body = json!({ "id": 42, "serial": "SN-42", "firmware": { "version": "1.2.0" } });
        let parsed: Value = serde_json::from_str(&GetDeviceTool::shape(&body).unwrap()).unwrap();
        assert_eq!(parsed, body);
    }

    #[test]
    fn test_shape_null_body() {
        assert_eq!(GetDeviceTool::shape(&Value::Null).unwrap(), "null");
    }

    #[test]
    fn test_shape_rejects_scalar() {
        assert!(matches!(
            GetDeviceTool::shape(&json!("SN-42")),
            Err(ToolError::MalformedResponse { .. })
        ));
    }
}
