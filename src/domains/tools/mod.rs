//! Tools domain module.
//!
//! Every Coin Railz service is exposed as one MCP tool. A tool call is
//! forwarded as `POST {base}/x402/{service}` by the upstream client.
//!
//! ## Architecture
//!
//! - `definitions/` - Argument structs and payload builders, one file per category
//! - `registry.rs` - Static tool catalog (name, service path, price, category)
//! - `handlers.rs` - Shared tool-call dispatch used by every transport
//! - `router.rs` - Dynamic ToolRouter builder for STDIO transport
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Add a params struct implementing `ServicePayload` in the matching
//!    `definitions/` category file
//! 2. Add an `entry::<Params>(...)` line to the catalog in `registry.rs`
//!
//! **No need to modify `server.rs` or the router!** Routes are built from
//! the catalog.

pub mod definitions;
mod error;
pub mod handlers;
pub mod registry;
pub mod router;

pub use error::ToolError;
pub use handlers::call_tool;
pub use registry::{Category, PriceUnit, ToolDefinition};
pub use router::build_tool_router;
