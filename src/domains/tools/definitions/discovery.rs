//! Discovery & testing services.

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Value, json};

use super::ServicePayload;

/// Parameters for `ping_coinrailz`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct PingParams {
    /// Optional message to include in the ping.
    #[serde(default = "default_message")]
    pub message: String,
}

fn default_message() -> String {
    "Hello from Claude".to_string()
}

impl ServicePayload for PingParams {
    fn into_payload(self) -> Value {
        json!({ "message": self.message })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ping_default_message() {
        let params: PingParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.into_payload(), json!({ "message": "Hello from Claude" }));
    }
}
