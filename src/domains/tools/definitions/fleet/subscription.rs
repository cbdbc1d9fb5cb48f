//! Subscription lookup by subscriber email.

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
    shaping::{pretty_json, single_record, text_result},
    upstream::{UpstreamClient, UpstreamRequest},
};

const SUBSCRIPTIONS_KEY: &str = "subscriptions";

/// Parameters for the subscription lookup.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct FindSubscriptionByEmailParams {
    #[schemars(description = "Subscriber email address")]
    #[schemars(length(min = 3, max = 254))]
    pub email: String,
}

/// Find Subscription By Email tool implementation.
#[derive(Debug, Clone)]
pub struct FindSubscriptionByEmailTool {
    client: UpstreamClient,
}

impl FindSubscriptionByEmailTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "findSubscriptionByEmail";

    pub const TITLE: &'static str = "Find subscription by email";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Looks up the subscription of a subscriber by email address. Returns the subscription record as JSON, or null when there is none.";

    pub fn new(client: UpstreamClient) -> Self {
        Self { client }
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<FindSubscriptionByEmailParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: Some(Self::TITLE.into()),
        }
    }

    fn request(params: &FindSubscriptionByEmailParams) -> UpstreamRequest {
        UpstreamRequest::get(["api", "v2", "subscriptions"])
            .query("email", params.email.as_str())
            .accept_json()
    }

    pub fn shape(body: &Value) -> Result<String, ToolError> {
        let subscription = single_record(Self::NAME, body, SUBSCRIPTIONS_KEY)?;
        pretty_json(Self::NAME, &subscription)
    }
}

#[async_trait::async_trait]
impl ToolHandler for FindSubscriptionByEmailTool {
    fn definition(&self) -> Tool {
        Self::to_tool()
    }

    async fn call(&self, arguments: JsonObject) -> Result<CallToolResult, ToolError> {
        let params: FindSubscriptionByEmailParams = parse_params(arguments)?;
        info!("Looking up subscription for {}", params.email);

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
    use crate::core::config::ProviderConfig;
    use serde_json::json;

    #[test]
    fn test_request_url() {
        let client = UpstreamClient::with_header(
            reqwest::Client::new(),
            &ProviderConfig::new("https://fleet.example.com", "t"),
            "token",
        );
        let params = FindSubscriptionByEmailParams {
            email: "ana+home@example.com".to_string(),
        };
        let url = client
            .url(FindSubscriptionByEmailTool::NAME, &FindSubscriptionByEmailTool::request(&params))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://fleet.example.com/api/v2/subscriptions?email=ana%2Bhome%40example.com"
        );
    }

    #[test]
    fn test_shape_from_wrapped_list() {
        let body = json!({ "subscriptions": [{ "id": "sub_1", "plan": "family" }] });
        let parsed: Value =
            serde_json::from_str(&FindSubscriptionByEmailTool::shape(&body).unwrap()).unwrap();
        assert_eq!(parsed, json!({ "id": "sub_1", "plan": "family" }));
    }

    #[test]
    fn test_shape_from_bare_list() {
        let body = json!([{ "id": "sub_2" }, { "id": "sub_3" }]);
        let parsed: Value =
            serde_json::from_str(&FindSubscriptionByEmailTool::shape(&body).unwrap()).unwrap();
        assert_eq!(parsed["id"], "sub_2");
    }

    #[test]
    fn test_shape_absent_is_null() {
        for body in [json!({ "subscriptions": [] }), json!([]), json!({}), Value::Null] {
            assert_eq!(FindSubscriptionByEmailTool::shape(&body).unwrap(), "null");
        }
    }
}
