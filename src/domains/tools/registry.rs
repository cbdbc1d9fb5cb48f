//! Tool Registry - the fixed catalog of tools, keyed by name.
//!
//! The registry is filled once at startup and only read afterwards, so it is
//! shared behind an `Arc` without locking.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use rmcp::model::Tool;
use tracing::{debug, info};

use super::definitions::{
    FindCustomerByFirstNameTool, FindSubscriberByDeviceSerialTool, FindSubscriptionByEmailTool,
    GetDeviceTool, ListSubscribersTableTool, ListUsersTableTool, ListUsersTool,
};
use super::error::ToolError;
use super::handlers::ToolHandler;
use super::upstream::{UpstreamClient, build_http_client};
use crate::core::config::Config;

/// Header carrying the subscriber service token.
const FLEET_TOKEN_HEADER: &str = "token";

/// A registered tool: its definition plus the handler that executes it.
#[derive(Clone)]
pub struct RegisteredTool {
    definition: Tool,
    handler: Arc<dyn ToolHandler>,
}

impl RegisteredTool {
    pub fn name(&self) -> &str {
        &self.definition.name
    }

    pub fn definition(&self) -> &Tool {
        &self.definition
    }

    pub fn handler(&self) -> &Arc<dyn ToolHandler> {
        &self.handler
    }
}

/// Tool registry - manages all available tools.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: HashMap<String, RegisteredTool>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the registry with every tool this server exposes.
    pub fn with_default_tools(config: &Config) -> Result<Self, ToolError> {
        let upstream = &config.upstream;
        let http = build_http_client(Duration::from_secs(upstream.timeout_secs))?;

        let customers = UpstreamClient::bearer(http.clone(), &upstream.customers);
        let fleet = UpstreamClient::with_header(http, &upstream.fleet, FLEET_TOKEN_HEADER);

        let mut registry = Self::new();
        registry.register(Arc::new(FindCustomerByFirstNameTool::new(customers.clone())))?;
        registry.register(Arc::new(ListUsersTool::new(customers.clone())))?;
        registry.register(Arc::new(ListUsersTableTool::new(customers)))?;
        registry.register(Arc::new(FindSubscriptionByEmailTool::new(fleet.clone())))?;
        registry.register(Arc::new(ListSubscribersTableTool::new(fleet.clone())))?;
        registry.register(Arc::new(FindSubscriberByDeviceSerialTool::new(fleet.clone())))?;
        registry.register(Arc::new(GetDeviceTool::new(fleet)))?;

        info!("Registered {} tools", registry.len());
        Ok(registry)
    }

    /// Register a tool under the name its definition declares.
    pub fn register(&mut self, handler: Arc<dyn ToolHandler>) -> Result<(), ToolError> {
        let definition = handler.definition();
        let name = definition.name.to_string();
        if self.tools.contains_key(&name) {
            return Err(ToolError::DuplicateTool(name));
        }
        debug!("Registering tool: {}", name);
        self.tools.insert(
            name,
            RegisteredTool {
                definition,
                handler,
            },
        );
        Ok(())
    }

    /// Look a tool up by name.
    pub fn get(&self, name: &str) -> Result<&RegisteredTool, ToolError> {
        self.tools
            .get(name)
            .ok_or_else(|| ToolError::unknown_tool(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// All tool names, sorted.
    pub fn tool_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tools.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// All registered tools, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = &RegisteredTool> {
        let mut tools: Vec<&RegisteredTool> = self.tools.values().collect();
        tools.sort_unstable_by(|a, b| a.name().cmp(b.name()));
        tools.into_iter()
    }

    /// Tool metadata for `tools/list`.
    pub fn list_tools(&self) -> Vec<Tool> {
        self.iter().map(|tool| tool.definition.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_registry() -> ToolRegistry {
        ToolRegistry::with_default_tools(&Config::default()).unwrap()
    }

    #[test]
    fn test_registry_tool_names() {
        let registry = test_registry();
        assert_eq!(
            registry.tool_names(),
            vec![
                "findCustomerByFirstName",
                "findSubscriberByDeviceSerial",
                "findSubscriptionByEmail",
                "getDevice",
                "listSubscribersTable",
                "listUsers",
                "listUsersTable",
            ]
        );
    }

    #[test]
    fn test_register_duplicate_fails() {
        let mut registry = test_registry();
        let customers =
            UpstreamClient::bearer(reqwest::Client::new(), &Config::default().upstream.customers);
        let err = registry
            .register(Arc::new(ListUsersTool::new(customers)))
            .unwrap_err();
        assert!(matches!(err, ToolError::DuplicateTool(name) if name == "listUsers"));
        assert_eq!(registry.len(), 7);
    }

    #[test]
    fn test_get_unknown_fails() {
        let registry = test_registry();
        assert!(matches!(
            registry.get("deleteUser"),
            Err(ToolError::UnknownTool(name)) if name == "deleteUser"
        ));
    }

    #[test]
    fn test_definitions_have_titles_and_schemas() {
        for tool in test_registry().list_tools() {
            assert!(tool.title.is_some(), "{} has no title", tool.name);
            assert!(tool.description.is_some(), "{} has no description", tool.name);
            assert_eq!(
                tool.input_schema.get("type").and_then(|t| t.as_str()),
                Some("object"),
                "{} schema is not an object",
                tool.name
            );
        }
    }
}
