//! Tools domain module.
//!
//! Tools are the operations MCP clients can call. Each one performs a single
//! GET against an upstream service and reshapes the JSON it gets back.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `registry.rs` - The fixed tool catalog, keyed by name
//! - `dispatcher.rs` - Lookup, argument validation and execution of one call
//! - `router.rs` - rmcp ToolRouter built from the registry (STDIO/TCP)
//! - `validation.rs` - Argument checks against the generated input schema
//! - `upstream.rs` - HTTP client for the upstream providers
//! - `shaping.rs` / `table.rs` - Response reshaping helpers
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` with a params struct and a type
//!    implementing [`ToolHandler`]
//! 2. Export it in `definitions/mod.rs`
//! 3. Register it in `ToolRegistry::with_default_tools`
//!
//! The router and the HTTP transport pick it up from the registry.

pub mod definitions;
mod dispatcher;
mod error;
mod handlers;
mod registry;
pub mod router;
pub mod shaping;
pub mod table;
pub mod upstream;
mod validation;

pub use dispatcher::Dispatcher;
pub use error::ToolError;
pub use handlers::{NoParams, ToolHandler, parse_params};
pub use registry::{RegisteredTool, ToolRegistry};
pub use router::build_tool_router;
pub use validation::validate_arguments;
