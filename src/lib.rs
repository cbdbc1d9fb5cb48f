//! myapi MCP Server Library
//!
//! This crate exposes a handful of remote HTTP read-endpoints as Model Context
//! Protocol (MCP) tools. Every tool performs exactly one upstream GET, reshapes
//! the JSON it receives and returns it as text content.
//!
//! # Architecture
//!
//! - **core**: Configuration, error handling, the MCP server handler and transports
//! - **domains**: Business logic organized by bounded contexts
//!   - **tools**: Tool registry, dispatcher, input validation, upstream client
//!     and the tool definitions themselves
//!
//! # Example
//!
//! ```rust,no_run
//! use myapi_mcp_server::{core::McpServer, core::Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config)?;
//!     // Start the server...
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
