//! Tool Router - builds the rmcp ToolRouter from the registry.
//!
//! Every registered tool becomes one route whose handler forwards to the
//! shared [`Dispatcher`], so STDIO/TCP and HTTP calls take the same path.

use futures::FutureExt;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute, ToolRouter},
    model::Tool,
};

use super::dispatcher::Dispatcher;
use super::error::ToolError;

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(dispatcher: &Dispatcher) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    dispatcher
        .registry()
        .iter()
        .fold(ToolRouter::new(), |router, tool| {
            router.with_route(create_route(tool.definition().clone(), dispatcher.clone()))
        })
}

/// Create a ToolRoute that dispatches calls for one tool.
fn create_route<S>(definition: Tool, dispatcher: Dispatcher) -> ToolRoute<S>
where
    S: Send + Sync + 'static,
{
    let name = definition.name.to_string();
    ToolRoute::new_dyn(definition, move |ctx: ToolCallContext<'_, S>| {
        let dispatcher = dispatcher.clone();
        let name = name.clone();
        let arguments = ctx.arguments.clone().unwrap_or_default();
        async move {
            dispatcher
                .dispatch(&name, arguments)
                .await
                .or_else(ToolError::into_response)
        }
        .boxed()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Config;
    use crate::domains::tools::ToolRegistry;
    use std::sync::Arc;

    struct TestServer {}

    fn test_dispatcher() -> Dispatcher {
        let registry = ToolRegistry::with_default_tools(&Config::default()).unwrap();
        Dispatcher::new(Arc::new(registry))
    }

    #[test]
    fn test_build_router() {
        let router: ToolRouter<TestServer> = build_tool_router(&test_dispatcher());
        let tools = router.list_all();
        assert_eq!(tools.len(), 7);

        let names: Vec<_> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert!(names.contains(&"findCustomerByFirstName"));
        assert!(names.contains(&"listUsers"));
        assert!(names.contains(&"findSubscriberByDeviceSerial"));
        assert!(names.contains(&"getDevice"));
    }

    #[test]
    fn test_registry_matches_router() {
        let dispatcher = test_dispatcher();
        let registry_names = dispatcher.registry().tool_names();

        let router: ToolRouter<TestServer> = build_tool_router(&dispatcher);
        let router_tools = router.list_all();
        let router_names: Vec<_> = router_tools.iter().map(|t| t.name.as_ref()).collect();

        assert_eq!(registry_names.len(), router_names.len());
        for name in registry_names {
            assert!(router_names.contains(&name));
        }
    }
}
