//! Tool-specific error types.

use rmcp::ErrorData as McpError;
use serde_json::{Value, json};
use thiserror::Error;

/// Errors that can occur while dispatching a tool call.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Malformed request, unknown tool name, or arguments that don't match
    /// the tool's schema. No outbound call is made.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The Coin Railz API answered with a non-2xx status.
    #[error("Upstream returned HTTP {status}: {body}")]
    Upstream { status: u16, body: String },

    /// The request never produced an HTTP response (timeout, refused, DNS).
    #[error("Transport error: {0}")]
    Transport(String),

    /// A paid service was called without usable credentials.
    #[error("Payment required for '{service}' (${price}): {message}")]
    Authentication {
        service: String,
        price: String,
        message: String,
    },
}

impl ToolError {
    /// Create a new "invalid request" error.
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Create an error for a tool name missing from the catalog.
    pub fn unknown_tool(name: &str) -> Self {
        Self::InvalidRequest(format!("Unknown tool: {}", name))
    }

    /// Create a new upstream error.
    pub fn upstream(status: u16, body: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            body: body.into(),
        }
    }

    /// Create a new transport error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a new authentication error with setup guidance.
    pub fn authentication(service: impl Into<String>, price: impl Into<String>) -> Self {
        let price = price.into();
        Self::Authentication {
            service: service.into(),
            message: format!(
                "This service costs ${}. Set COINRAILZ_API_KEY to an API key with credits \
                 (buy credits at https://coinrailz.com/credits).",
                price
            ),
            price,
        }
    }

    /// Short machine-readable kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) => "invalid_request",
            Self::Upstream { .. } => "upstream_error",
            Self::Transport(_) => "transport_error",
            Self::Authentication { .. } => "authentication_error",
        }
    }

    /// Whether the caller may retry the same call unchanged.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Upstream HTTP status, if the error came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            Self::Authentication { .. } => Some(402),
            _ => None,
        }
    }

    /// JSON body returned to the MCP client inside an error tool result.
    pub fn to_json(&self) -> Value {
        let mut body = json!({
            "error": self.kind(),
            "message": self.to_string(),
            "retryable": self.is_retryable(),
        });

        match self {
            Self::Upstream { status, body: upstream } => {
                body["status"] = json!(status);
                body["body"] = serde_json::from_str::<Value>(upstream)
                    .unwrap_or_else(|_| Value::String(upstream.clone()));
            }
            Self::Authentication { service, price, .. } => {
                body["service"] = json!(service);
                body["price_usd"] = json!(price);
                body["quick_fix"] = json!({
                    "step_1": "Get a free demo key: run a free service first (gas-price-oracle, token-metadata)",
                    "step_2": "Or buy credits: https://coinrailz.com/credits ($10 minimum)",
                    "step_3": "Set env var: export COINRAILZ_API_KEY=your_key_here",
                });
            }
            _ => {}
        }

        body
    }
}

impl From<ToolError> for McpError {
    fn from(err: ToolError) -> Self {
        match err {
            ToolError::InvalidRequest(msg) => McpError::invalid_params(msg, None),
            other => McpError::internal_error(other.to_string(), Some(other.to_json())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_transport_is_retryable() {
        assert!(ToolError::transport("connection refused").is_retryable());
        assert!(!ToolError::upstream(500, "boom").is_retryable());
        assert!(!ToolError::unknown_tool("nope").is_retryable());
        assert!(!ToolError::authentication("ping", "0.25").is_retryable());
    }

    #[test]
    fn test_upstream_json_keeps_status_and_body() {
        let err = ToolError::upstream(503, r#"{"detail":"maintenance"}"#);
        let body = err.to_json();
        assert_eq!(body["error"], "upstream_error");
        assert_eq!(body["status"], 503);
        assert_eq!(body["body"]["detail"], "maintenance");
    }

    #[test]
    fn test_authentication_message_mentions_env_var() {
        let err = ToolError::authentication("contract-scan", "2.00");
        assert!(err.to_string().contains("COINRAILZ_API_KEY"));
        assert_eq!(err.status(), Some(402));
        assert_eq!(err.to_json()["price_usd"], "2.00");
    }

    #[test]
    fn test_invalid_request_maps_to_invalid_params() {
        let mcp: McpError = ToolError::unknown_tool("nope").into();
        assert_eq!(mcp.code, rmcp::model::ErrorCode::INVALID_PARAMS);
    }
}
