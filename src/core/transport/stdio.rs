//! STDIO transport implementation.
//!
//! The host spawns the server and speaks MCP over its stdin/stdout. Nothing
//! else may write to stdout while this transport runs.

use rmcp::ServiceExt;
use tracing::info;

use super::{TransportError, TransportResult};
use crate::core::McpServer;

/// STDIO transport handler.
pub struct StdioTransport;

impl StdioTransport {
    /// Serve until the host closes stdin.
    pub async fn run(server: McpServer) -> TransportResult<()> {
        info!("Ready - {} tools over stdin/stdout", server.dispatcher().registry().len());

        let service = server
            .serve(rmcp::transport::stdio())
            .await
            .map_err(|e| TransportError::init(e.to_string()))?;

        let reason = service
            .waiting()
            .await
            .map_err(|e| TransportError::ServiceError(e.to_string()))?;

        info!("STDIO transport finished: {:?}", reason);
        Ok(())
    }
}
