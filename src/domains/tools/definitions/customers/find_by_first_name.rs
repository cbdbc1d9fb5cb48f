//! Customer lookup by first name.
//!
//! Filters the directory on `firstName` and returns the first match, or
//! `null` when nobody matches.

use rmcp::{
    handler::server::tool::cached_schema_for_type,
    model::{CallToolResult, JsonObject, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use super::USERS_KEY;
use crate::domains::tools::{
    ToolError, ToolHandler, parse_params,
    shaping::{pretty_json, single_record, text_result},
    upstream::{UpstreamClient, UpstreamRequest},
};

/// Parameters for the first-name lookup.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FindCustomerByFirstNameParams {
    #[schemars(description = "Customer first name (2 to 100 characters)")]
    #[schemars(length(min = 2, max = 100))]
    pub first_name: String,
}

/// Find Customer By First Name tool implementation.
#[derive(Debug, Clone)]
pub struct FindCustomerByFirstNameTool {
    client: UpstreamClient,
}

impl FindCustomerByFirstNameTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "findCustomerByFirstName";

    pub const TITLE: &'static str = "Find customer by first name";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Looks up a single customer record by first name. Returns the record as JSON, or null when no customer matches.";

    pub fn new(client: UpstreamClient) -> Self {
        Self { client }
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<FindCustomerByFirstNameParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: Some(Self::TITLE.into()),
        }
    }

    fn request(params: &FindCustomerByFirstNameParams) -> UpstreamRequest {
        UpstreamRequest::get(["users", "filter"])
            .query("key", "firstName")
            .query("value", params.first_name.as_str())
    }

    /// Shape the filter response into the tool's text output.
    pub fn shape(body: &Value) -> Result<String, ToolError> {
        let customer = single_record(Self::NAME, body, USERS_KEY)?;
        pretty_json(Self::NAME, &customer)
    }
}

#[async_trait::async_trait]
impl ToolHandler for FindCustomerByFirstNameTool {
    fn definition(&self) -> Tool {
        Self::to_tool()
    }

    async fn call(&self, arguments: JsonObject) -> Result<CallToolResult, ToolError> {
        let params: FindCustomerByFirstNameParams = parse_params(arguments)?;
        info!("Looking up customer with first name: {}", params.first_name);

        let body = self
            .client
            .get_json(Self::NAME, Self::request(&params))
            .await?;
        Self::shape(&body).map(text_result)
    }
}
