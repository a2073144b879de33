//! AI agent infrastructure services.

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Map, Value, json};

use super::{ServicePayload, insert_opt};

/// Parameters for `create_agent_wallet`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AgentWalletParams {
    /// Name identifier for the agent.
    pub agent_name: String,

    /// Agent type: trading, payment, defi, general (default: trading).
    #[serde(default = "default_agent_type")]
    pub agent_type: String,
}

fn default_agent_type() -> String {
    "trading".to_string()
}

impl ServicePayload for AgentWalletParams {
    fn into_payload(self) -> Value {
        json!({ "agentName": self.agent_name, "agentType": self.agent_type })
    }
}

/// Parameters for `create_instant_agent_wallet`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct InstantWalletParams {
    /// Wallet purpose: trading, testing, payment (default: general).
    #[serde(default = "default_purpose")]
    pub purpose: String,
}

fn default_purpose() -> String {
    "general".to_string()
}

impl ServicePayload for InstantWalletParams {
    fn into_payload(self) -> Value {
        json!({ "purpose": self.purpose })
    }
}

/// Parameters for `verify_agent_identity`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AgentIdentityParams {
    /// The agent's wallet address.
    pub agent_address: String,

    /// Optional identity proof or attestation.
    #[serde(default)]
    pub proof: Option<String>,
}

impl ServicePayload for AgentIdentityParams {
    fn into_payload(self) -> Value {
        let mut payload = Map::new();
        payload.insert("agentAddress".to_string(), Value::String(self.agent_address));
        insert_opt(&mut payload, "proof", self.proof);
        Value::Object(payload)
    }
}
