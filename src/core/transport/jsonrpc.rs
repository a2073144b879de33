//! JSON-RPC 2.0 adapter over raw bytes.
//!
//! Parses an MCP request envelope, dispatches it to the [`McpServer`] and
//! serializes the response. Used by the HTTP transport; the stdio transport
//! goes through rmcp and ends in the same tool dispatch.

use rmcp::ErrorData as McpError;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, info, instrument, warn};

use crate::core::McpServer;
use crate::core::server::INSTRUCTIONS;

/// Protocol version reported when the client does not ask for one.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

pub const PARSE_ERROR: i32 = -32700;
pub const INVALID_REQUEST: i32 = -32600;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;
pub const INTERNAL_ERROR: i32 = -32603;

/// JSON-RPC request structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

/// JSON-RPC response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcResponse {
    /// Create a success response.
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response.
    pub fn error(id: Value, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
                data: None,
            }),
        }
    }

    /// Parse error.
    pub fn parse_error(msg: impl Into<String>) -> Self {
        Self::error(Value::Null, PARSE_ERROR, msg)
    }

    /// Method not found error.
    pub fn method_not_found(id: Value, method: &str) -> Self {
        Self::error(id, METHOD_NOT_FOUND, format!("Method not found: {}", method))
    }

    /// Invalid request error.
    pub fn invalid_request(id: Value, msg: impl Into<String>) -> Self {
        Self::error(id, INVALID_REQUEST, msg)
    }

    /// Invalid params error.
    pub fn invalid_params(id: Value, msg: impl Into<String>) -> Self {
        Self::error(id, INVALID_PARAMS, msg)
    }

    /// Map an MCP protocol error, keeping its code and data.
    pub fn from_mcp_error(id: Value, err: McpError) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code: err.code.0,
                message: err.message.into_owned(),
                data: err.data,
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ToolCallParams {
    name: String,
    #[serde(default)]
    arguments: Option<rmcp::model::JsonObject>,
}

#[derive(Debug, Deserialize)]
struct ReadResourceParams {
    uri: String,
}

/// Dispatches raw JSON-RPC messages to an [`McpServer`].
#[derive(Clone)]
pub struct RpcDispatcher {
    server: McpServer,
}

impl RpcDispatcher {
    pub fn new(server: McpServer) -> Self {
        Self { server }
    }

    pub fn server(&self) -> &McpServer {
        &self.server
    }

    /// Handle one raw message.
    ///
    /// Returns the serialized response, or `None` for notifications.
    pub async fn handle(&self, raw: &[u8]) -> Option<Vec<u8>> {
        let response = match serde_json::from_slice::<Value>(raw) {
            Ok(message) => self.handle_value(message).await?,
            Err(e) => {
                warn!("Unparsable JSON-RPC message: {}", e);
                JsonRpcResponse::parse_error(format!("Parse error: {}", e))
            }
        };

        match serde_json::to_vec(&response) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                warn!("Failed to serialize JSON-RPC response: {}", e);
                serde_json::to_vec(&JsonRpcResponse::error(
                    response.id,
                    INTERNAL_ERROR,
                    "Failed to serialize response",
                ))
                .ok()
            }
        }
    }

    /// Handle an already-parsed message.
    pub async fn handle_value(&self, message: Value) -> Option<JsonRpcResponse> {
        let id = message.get("id").cloned();

        let request: JsonRpcRequest = match serde_json::from_value(message) {
            Ok(request) => request,
            Err(e) => {
                return Some(JsonRpcResponse::invalid_request(
                    id.unwrap_or(Value::Null),
                    format!("Invalid Request: {}", e),
                ));
            }
        };

        if request.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::invalid_request(
                request.id.unwrap_or(Value::Null),
                "Invalid Request: jsonrpc must be \"2.0\"",
            ));
        }

        match request.id.clone() {
            Some(id) => Some(self.process_request(id, request).await),
            None => {
                self.handle_notification(&request);
                None
            }
        }
    }

    #[instrument(skip_all, fields(method = %request.method))]
    async fn process_request(&self, id: Value, request: JsonRpcRequest) -> JsonRpcResponse {
        debug!("Received JSON-RPC request");

        match request.method.as_str() {
            "initialize" => self.handle_initialize(id, request.params),
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => self.handle_tools_list(id),
            "tools/call" => self.handle_tools_call(id, request.params).await,
            "resources/list" => self.handle_resources_list(id).await,
            "resources/read" => self.handle_resources_read(id, request.params).await,
            method => {
                warn!("Unknown method: {}", method);
                JsonRpcResponse::method_not_found(id, method)
            }
        }
    }

    fn handle_initialize(&self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        info!("Processing initialize request");

        let protocol_version = params
            .as_ref()
            .and_then(|p| p.get("protocolVersion"))
            .and_then(Value::as_str)
            .unwrap_or(PROTOCOL_VERSION)
            .to_string();

        JsonRpcResponse::success(
            id,
            json!({
                "protocolVersion": protocol_version,
                "capabilities": {
                    "tools": {},
                    "resources": {}
                },
                "serverInfo": {
                    "name": self.server.name(),
                    "version": self.server.version()
                },
                "instructions": INSTRUCTIONS
            }),
        )
    }

    fn handle_tools_list(&self, id: Value) -> JsonRpcResponse {
        JsonRpcResponse::success(id, json!({ "tools": self.server.list_tools() }))
    }

    async fn handle_tools_call(&self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        let params: ToolCallParams = match params.map(serde_json::from_value) {
            Some(Ok(params)) => params,
            Some(Err(e)) => return JsonRpcResponse::invalid_params(id, e.to_string()),
            None => return JsonRpcResponse::invalid_params(id, "Missing params"),
        };

        info!("Calling tool: {}", params.name);
        match self.server.call_tool(&params.name, params.arguments).await {
            Ok(result) => match serde_json::to_value(result) {
                Ok(result) => JsonRpcResponse::success(id, result),
                Err(e) => JsonRpcResponse::error(id, INTERNAL_ERROR, e.to_string()),
            },
            Err(e) => JsonRpcResponse::from_mcp_error(id, e),
        }
    }

    async fn handle_resources_list(&self, id: Value) -> JsonRpcResponse {
        let resources = self.server.list_resources().await;
        JsonRpcResponse::success(id, json!({ "resources": resources }))
    }

    async fn handle_resources_read(&self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        let params: ReadResourceParams = match params.map(serde_json::from_value) {
            Some(Ok(params)) => params,
            Some(Err(e)) => return JsonRpcResponse::invalid_params(id, e.to_string()),
            None => return JsonRpcResponse::invalid_params(id, "Missing resource URI"),
        };

        match self.server.read_resource(&params.uri).await {
            Ok(result) => JsonRpcResponse::success(id, json!({ "contents": result.contents })),
            Err(e) => JsonRpcResponse::from_mcp_error(id, e),
        }
    }

    fn handle_notification(&self, request: &JsonRpcRequest) {
        match request.method.as_str() {
            "notifications/initialized" => info!("Client sent initialized notification"),
            method => debug!("Received notification: {}", method),
        }
    }
}
