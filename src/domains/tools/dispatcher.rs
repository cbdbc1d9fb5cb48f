//! Dispatcher - the single entry point for tool invocations.
//!
//! Each call moves through lookup, validation and execution in order and
//! stops at the first failure. Calls share nothing but the read-only
//! registry, so any number may be in flight at once.

use std::sync::Arc;

use rmcp::model::{CallToolResult, JsonObject};
use tracing::{debug, info, instrument, warn};

use super::error::ToolError;
use super::registry::ToolRegistry;
use super::validation::validate_arguments;

/// Routes invocations to registered tools.
///
/// Cheap to clone; every clone shares the same registry.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<ToolRegistry>,
}

impl Dispatcher {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Run one tool invocation.
    ///
    /// Unknown tools and invalid arguments fail before any upstream request
    /// is made.
    #[instrument(skip(self, arguments), fields(tool = %name))]
    pub async fn dispatch(
        &self,
        name: &str,
        arguments: JsonObject,
    ) -> Result<CallToolResult, ToolError> {
        let tool = self.registry.get(name).inspect_err(|_| {
            warn!("Unknown tool requested: {}", name);
        })?;

        validate_arguments(&tool.definition().input_schema, &arguments).inspect_err(|e| {
            warn!("Rejected arguments: {}", e);
        })?;
        debug!("Arguments validated");

        match tool.handler().call(arguments).await {
            Ok(result) => {
                info!("Tool call completed");
                Ok(result)
            }
            Err(e) => {
                warn!(kind = e.kind(), "Tool call failed: {}", e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::handlers::{NoParams, ToolHandler};
    use crate::domains::tools::shaping::text_result;
    use rmcp::handler::server::tool::cached_schema_for_type;
    use rmcp::model::{RawContent, Tool};
    use schemars::JsonSchema;
    use serde::Deserialize;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Deserialize, JsonSchema)]
    struct EchoParams {
        #[schemars(length(min = 2, max = 5))]
        word: String,
    }

    struct EchoTool {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait::async_trait]
    impl ToolHandler for EchoTool {
        fn definition(&self) -> Tool {
            Tool {
                name: "echo".into(),
                description: Some("Echo a word".into()),
                input_schema: cached_schema_for_type::<EchoParams>(),
                annotations: None,
                output_schema: None,
                icons: None,
                meta: None,
                title: Some("Echo".into()),
            }
        }

        async fn call(&self, arguments: JsonObject) -> Result<CallToolResult, ToolError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let params: EchoParams = crate::domains::tools::handlers::parse_params(arguments)?;
            Ok(text_result(params.word))
        }
    }

    fn dispatcher() -> (Dispatcher, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut registry = ToolRegistry::new();
        registry
            .register(Arc::new(EchoTool {
                calls: calls.clone(),
            }))
            .unwrap();
        (Dispatcher::new(Arc::new(registry)), calls)
    }

    fn args(value: serde_json::Value) -> JsonObject {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_dispatch_success() {
        let (dispatcher, calls) = dispatcher();
        let result = dispatcher
            .dispatch("echo", args(json!({ "word": "hey" })))
            .await
            .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        if let RawContent::Text(text) = &result.content[0].raw {
            assert_eq!(text.text, "hey");
        } else {
            panic!("expected text content");
        }
    }

    #[tokio::test]
    async fn test_unknown_tool_never_calls_handler() {
        let (dispatcher, calls) = dispatcher();
        let err = dispatcher
            .dispatch("nope", args(json!({ "word": "hey" })))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::UnknownTool(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_invalid_arguments_never_call_handler() {
        let (dispatcher, calls) = dispatcher();
        for bad in [json!({}), json!({ "word": "x" }), json!({ "word": "toolong" })] {
            let err = dispatcher.dispatch("echo", args(bad)).await.unwrap_err();
            assert!(matches!(err, ToolError::Validation { ref parameter, .. } if parameter == "word"));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_no_params_tool_schema() {
        let schema = cached_schema_for_type::<NoParams>();
        assert!(validate_arguments(&schema, &JsonObject::new()).is_ok());
    }
}
