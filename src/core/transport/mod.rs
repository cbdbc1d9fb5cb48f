//! Transport layer for the MCP server.
//!
//! - **STDIO** (feature `stdio`, default): the host spawns the server and
//!   talks over stdin/stdout
//! - **TCP** (feature `tcp`): line-delimited JSON-RPC, one MCP session per
//!   connection
//! - **HTTP** (feature `http`): stateless JSON-RPC over POST
//!
//! Every transport hands requests to the same [`McpServer`](crate::core::McpServer),
//! so tool behavior does not depend on how the client connects.

mod config;
mod error;
mod service;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "tcp")]
pub mod tcp;

#[cfg(feature = "stdio")]
pub mod stdio;

pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};
pub use service::TransportService;

#[cfg(feature = "tcp")]
pub use config::TcpConfig;

#[cfg(feature = "http")]
pub use config::HttpConfig;
