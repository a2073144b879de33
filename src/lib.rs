//! Coin Railz MCP Server Library
//!
//! Exposes the Coin Railz x402 pay-per-call API as Model Context Protocol
//! tools. Each tool call is forwarded as an HTTP POST to the Coin Railz
//! service with the configured API key.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the MCP server and transports
//! - **domains**: business logic organized by bounded contexts
//!   - **tools**: the service catalog, argument schemas and dispatch
//!   - **resources**: catalog and server information resources
//! - **upstream**: the Coin Railz HTTP client, free-call tracking and telemetry
//!
//! # Example
//!
//! ```rust,no_run
//! use coinrailz_mcp_server::{core::Config, core::McpServer};
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
pub mod upstream;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
pub use upstream::CoinRailzClient;
