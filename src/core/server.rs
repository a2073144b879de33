//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating to domain-specific services.
//!
//! ## Tool Architecture
//!
//! Tools are catalog entries in `domains/tools/registry.rs`. The ToolRouter
//! is built from the catalog in `domains/tools/router.rs`, and every call,
//! whatever the transport, goes through `domains/tools/handlers.rs`.
//! **Adding a new tool does NOT require modifying this file!**

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, handler::server::tool::ToolRouter, model::*,
    service::RequestContext, tool_handler,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::config::Config;
use crate::domains::{
    resources::ResourceService,
    tools::{self, ToolError, build_tool_router},
};
use crate::upstream::CoinRailzClient;

/// Instructions sent to clients on initialize.
pub const INSTRUCTIONS: &str = "Coin Railz x402 services: crypto market data, trading \
    signals, wallet and contract risk, prediction markets, AI agent wallets and more. \
    Every tool is a paid call billed in USD against COINRAILZ_API_KEY; get_gas_prices \
    and get_token_metadata are free on first use. Read coinrailz://catalog for prices.";

/// The main MCP server handler.
///
/// This struct implements the `ServerHandler` trait from rmcp and coordinates
/// between the upstream client and the domain services.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Coin Railz API client shared by every tool route.
    client: Arc<CoinRailzClient>,

    /// Service for handling resource-related requests.
    resource_service: Arc<ResourceService>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    pub fn new(config: Config) -> Result<Self, ToolError> {
        let client = CoinRailzClient::new(&config)?;
        Ok(Self::with_client(config, client))
    }

    /// Create a server with an explicit install id.
    pub fn with_install_id(config: Config, install_id: String) -> Result<Self, ToolError> {
        let client = CoinRailzClient::with_install_id(&config, install_id)?;
        Ok(Self::with_client(config, client))
    }

    fn with_client(config: Config, client: CoinRailzClient) -> Self {
        let config = Arc::new(config);
        let client = Arc::new(client);
        let resource_service = Arc::new(ResourceService::new(config.clone()));

        Self {
            tool_router: build_tool_router::<Self>(client.clone()),
            config,
            client,
            resource_service,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Get the upstream client.
    pub fn client(&self) -> &Arc<CoinRailzClient> {
        &self.client
    }

    // ========================================================================
    // JSON-RPC Transport Support Methods
    // ========================================================================

    /// List all available tools.
    pub fn list_tools(&self) -> Vec<Tool> {
        self.tool_router.list_all()
    }

    /// Call a tool by name.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<CallToolResult, McpError> {
        tools::call_tool(&self.client, name, arguments).await
    }

    /// List all available resources.
    pub async fn list_resources(&self) -> Vec<Resource> {
        self.resource_service.list_resources().await
    }

    /// Read a resource by URI.
    pub async fn read_resource(&self, uri: &str) -> Result<ReadResourceResult, McpError> {
        self.resource_service
            .read_resource(uri)
            .await
            .map_err(|e| McpError::resource_not_found(e.to_string(), None))
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation {
                name: self.config.server.name.clone(),
                version: self.config.server.version.clone(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        info!("Listing resources");
        let resources = self.resource_service.list_resources().await;
        Ok(ListResourcesResult {
            resources,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        info!("Reading resource: {}", request.uri);
        McpServer::read_resource(self, &request.uri).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server() -> McpServer {
        let mut config = Config::default();
        config.upstream.telemetry = false;
        McpServer::with_install_id(config, "mcp-test".to_string()).unwrap()
    }

    #[test]
    fn test_server_info() {
        let server = server();
        let info = server.get_info();
        assert_eq!(info.server_info.name, "coinrailz");
        assert_eq!(info.server_info.version, env!("CARGO_PKG_VERSION"));
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_some());
        assert!(info.capabilities.prompts.is_none());
    }

    #[test]
    fn test_lists_every_catalog_tool() {
        assert_eq!(server().list_tools().len(), tools::registry::all().len());
    }

    #[tokio::test]
    async fn test_unknown_tool_is_protocol_error() {
        let err = server().call_tool("nope", None).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_read_unknown_resource() {
        let err = server().read_resource("coinrailz://nope").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::RESOURCE_NOT_FOUND);
    }
}
