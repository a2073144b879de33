//! STDIO transport implementation.
//!
//! Standard input/output transport for MCP, used by Claude Desktop.

use rmcp::ServiceExt;
use tracing::{error, info};

use super::{TransportError, TransportResult};
use crate::core::McpServer;

/// STDIO transport handler.
pub struct StdioTransport;

impl StdioTransport {
    /// Run the STDIO transport until the client closes stdin.
    ///
    /// Failing to complete the initial handshake is the only fatal condition.
    pub async fn run(server: McpServer) -> TransportResult<()> {
        info!("Ready - communicating via stdin/stdout");

        let service = server
            .serve(rmcp::transport::stdio())
            .await
            .map_err(|e| {
                error!("MCP handshake failed: {}", e);
                TransportError::handshake(e.to_string())
            })?;

        service
            .waiting()
            .await
            .map_err(|e| TransportError::ServiceError(e.to_string()))?;

        info!("STDIO transport finished");
        Ok(())
    }
}
