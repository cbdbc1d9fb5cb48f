//! Subscriber lookup by device serial number.
//!
//! The service has no server-side filter for this, so the full listing is
//! fetched and scanned for the first subscriber owning the device. The
//! result is a subscriber table with zero or one data row.

use rmcp::{
    handler::server::tool::cached_schema_for_type,
    model::{CallToolResult, JsonObject, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use super::common::{SUBSCRIBER_COLUMNS, SUBSCRIBERS_KEY, owns_device, subscribers_request};
use crate::domains::tools::{
    ToolError, ToolHandler, parse_params,
    shaping::{records, text_result},
    table::Table,
    upstream::UpstreamClient,
};

/// Parameters for the device serial lookup.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct FindSubscriberByDeviceSerialParams {
    #[schemars(description = "Device serial number, matched exactly")]
    #[schemars(length(min = 4, max = 64))]
    pub serial: String,
}

/// Find Subscriber By Device Serial tool implementation.
#[derive(Debug, Clone)]
pub struct FindSubscriberByDeviceSerialTool {
    client: UpstreamClient,
}

impl FindSubscriberByDeviceSerialTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "findSubscriberByDeviceSerial";

    pub const TITLE: &'static str = "Find subscriber by device serial";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Finds the subscriber owning the device with the given serial number. Returns comma-separated text with the header id,name,email,plan,status,devices and at most one data row; only the header when no subscriber owns the device.";

    pub fn new(client: UpstreamClient) -> Self {
        Self { client }
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<FindSubscriberByDeviceSerialParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: Some(Self::TITLE.into()),
        }
    }

    pub fn shape(body: &Value, serial: &str) -> Result<String, ToolError> {
        let subscribers = records(Self::NAME, body, SUBSCRIBERS_KEY)?;
        let mut table = Table::new(SUBSCRIBER_COLUMNS);

        match subscribers
            .iter()
            .find(|subscriber| owns_device(subscriber, serial))
        {
            Some(subscriber) => table.push_record(subscriber),
            None => debug!(
                "No subscriber among {} owns device {}",
                subscribers.len(),
                serial
            ),
        }

        Ok(table.render())
    }
}

#[async_trait::async_trait]
impl ToolHandler for FindSubscriberByDeviceSerialTool {
    fn definition(&self) -> Tool {
        Self::to_tool()
    }

    async fn call(&self, arguments: JsonObject) -> Result<CallToolResult, ToolError> {
        let params: FindSubscriberByDeviceSerialParams = parse_params(arguments)?;
        info!("Looking up owner of device {}", params.serial);

        let body = self
            .client
            .get_json(Self::NAME, subscribers_request())
            .await?;
        Self::shape(&body, &params.serial).map(text_result)
    }
}
