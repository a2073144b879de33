//! Tool argument definitions, grouped by service category.
//!
//! Each tool has a parameters struct (deserialized from the MCP call
//! arguments, schema published through `tools/list`) that knows how to turn
//! itself into the JSON payload expected by the Coin Railz endpoint.
//! The catalog in `registry.rs` ties each struct to its tool name and price.

use rmcp::model::JsonObject;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::error::ToolError;

pub mod agents;
pub mod banking;
pub mod discovery;
pub mod enterprise;
pub mod execution;
pub mod markets;
pub mod prediction;
pub mod premium;
pub mod real_estate;
pub mod trading;

/// Arguments of a single Coin Railz service.
pub trait ServicePayload: DeserializeOwned + JsonSchema + 'static {
    /// Convert validated arguments into the upstream request body.
    fn into_payload(self) -> Value;
}

/// Deserialize MCP arguments into `P` and build its payload.
pub fn build_payload<P: ServicePayload>(args: JsonObject) -> Result<Value, ToolError> {
    let params: P = serde_json::from_value(Value::Object(args))
        .map_err(|e| ToolError::invalid_request(format!("Invalid arguments: {}", e)))?;
    Ok(params.into_payload())
}

/// Insert `value` under `key` only when present.
pub(crate) fn insert_opt<T: Into<Value>>(payload: &mut Map<String, Value>, key: &str, value: Option<T>) {
    if let Some(value) = value {
        payload.insert(key.to_string(), value.into());
    }
}

/// Use `list` unless it is missing or empty.
pub(crate) fn or_defaults(list: Option<Vec<String>>, defaults: &[&str]) -> Vec<String> {
    match list {
        Some(list) if !list.is_empty() => list,
        _ => defaults.iter().map(|s| s.to_string()).collect(),
    }
}

pub(crate) fn default_chain() -> String {
    "ethereum".to_string()
}

pub(crate) fn default_true() -> bool {
    true
}
