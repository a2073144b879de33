//! Upstream Coin Railz API access.
//!
//! - `client.rs` - the x402 HTTP client (payment-required handling, demo keys)
//! - `free_calls.rs` - once-per-process free-call tracking
//! - `install.rs` - persistent anonymous install id
//! - `telemetry.rs` - fire-and-forget SDK telemetry

pub mod client;
pub mod free_calls;
pub mod install;
pub mod telemetry;

pub use client::CoinRailzClient;
pub use free_calls::FreeCallTracker;

/// Header carrying the prepaid-credit API key.
pub const API_KEY_HEADER: &str = "X-API-KEY";

/// SDK identifier reported to the demo-key and telemetry endpoints.
pub const SDK_TYPE: &str = "rust-mcp";

/// `User-Agent` sent on every outbound request.
pub fn user_agent() -> String {
    format!("CoinRailz-MCP-Server/{}", env!("CARGO_PKG_VERSION"))
}
