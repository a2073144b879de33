//! Tool call handling shared by every transport.
//!
//! Both the rmcp `ToolRouter` (stdio) and the JSON-RPC adapter (HTTP) end up
//! in [`call_tool`], so tool results and errors look the same everywhere.

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content, JsonObject},
};
use serde_json::Value;
use tracing::{info, instrument, warn};

use super::error::ToolError;
use crate::upstream::CoinRailzClient;

/// Dispatch a tool call to the Coin Railz API.
///
/// Invalid requests (unknown tool, bad arguments) are protocol errors.
/// Upstream, transport and payment failures are returned as an error
/// tool result so the client can show them to the model.
#[instrument(skip(client, arguments))]
pub async fn call_tool(
    client: &CoinRailzClient,
    name: &str,
    arguments: Option<JsonObject>,
) -> Result<CallToolResult, McpError> {
    let result = client.call_tool(name, arguments.unwrap_or_default()).await;
    into_call_result(result)
}

/// Convert a client result into an MCP tool result.
pub fn into_call_result(result: Result<Value, ToolError>) -> Result<CallToolResult, McpError> {
    match result {
        Ok(value) => {
            info!("Tool call succeeded");
            Ok(success(value))
        }
        Err(e @ ToolError::InvalidRequest(_)) => {
            warn!("Rejected tool call: {}", e);
            Err(e.into())
        }
        Err(e) => {
            warn!(kind = e.kind(), "Tool call failed: {}", e);
            let body = e.to_json();
            Ok(CallToolResult {
                content: vec![Content::text(pretty(&body))],
                structured_content: Some(body),
                is_error: Some(true),
                meta: None,
            })
        }
    }
}

fn success(value: Value) -> CallToolResult {
    match value {
        Value::String(text) => CallToolResult::success(vec![Content::text(text)]),
        Value::Object(_) => CallToolResult {
            content: vec![Content::text(pretty(&value))],
            structured_content: Some(value),
            is_error: Some(false),
            meta: None,
        },
        other => CallToolResult::success(vec![Content::text(pretty(&other))]),
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
