//! Execution & infrastructure services.

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Map, Value, json};

use super::{ServicePayload, default_chain, default_true, insert_opt, or_defaults};

const BALANCE_CHAINS: &[&str] = &["ethereum", "base", "polygon", "bsc", "arbitrum", "optimism"];

/// Parameters for `get_multi_chain_balance`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct MultiChainBalanceParams {
    /// The wallet address to check (0x...).
    pub wallet_address: String,

    /// Chains to query. Defaults to all supported chains.
    #[serde(default)]
    pub chains: Option<Vec<String>>,

    /// Include ERC-20 token balances (default: true).
    #[serde(default = "default_true")]
    pub include_tokens: bool,
}

impl ServicePayload for MultiChainBalanceParams {
    fn into_payload(self) -> Value {
        json!({
            "walletAddress": self.wallet_address,
            "chains": or_defaults(self.chains, BALANCE_CHAINS),
            "includeTokens": self.include_tokens,
        })
    }
}

/// Parameters for `build_transaction`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct BuildTransactionParams {
    /// Sender wallet address.
    pub from_address: String,

    /// Recipient wallet address.
    pub to_address: String,

    /// Amount to send, in token units or wei.
    pub value: String,

    /// Blockchain network (default: ethereum).
    #[serde(default = "default_chain")]
    pub chain: String,

    /// ERC-20 token address; the native token is used when omitted.
    #[serde(default)]
    pub token_address: Option<String>,
}

impl ServicePayload for BuildTransactionParams {
    fn into_payload(self) -> Value {
        let mut payload = Map::new();
        payload.insert("from".to_string(), Value::String(self.from_address));
        payload.insert("to".to_string(), Value::String(self.to_address));
        payload.insert("value".to_string(), Value::String(self.value));
        payload.insert("chain".to_string(), Value::String(self.chain));
        insert_opt(&mut payload, "tokenAddress", self.token_address);
        Value::Object(payload)
    }
}

/// Parameters for `manage_approvals`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ManageApprovalsParams {
    /// The wallet address to check.
    pub wallet_address: String,

    /// Blockchain network (default: ethereum).
    #[serde(default = "default_chain")]
    pub chain: String,

    /// Action to perform: list or revoke_risky (default: list).
    #[serde(default = "default_action")]
    pub action: String,
}

fn default_action() -> String {
    "list".to_string()
}

impl ServicePayload for ManageApprovalsParams {
    fn into_payload(self) -> Value {
        json!({
            "walletAddress": self.wallet_address,
            "chain": self.chain,
            "action": self.action,
        })
    }
}

/// Parameters for `bridge_tokens`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct BridgeTokensParams {
    /// Source blockchain.
    pub from_chain: String,

    /// Destination blockchain.
    pub to_chain: String,

    /// Token to bridge.
    pub token_address: String,

    /// Amount to bridge.
    pub amount: String,

    /// Recipient on the destination chain, if different from the sender.
    #[serde(default)]
    pub recipient: Option<String>,
}

impl ServicePayload for BridgeTokensParams {
    fn into_payload(self) -> Value {
        let mut payload = Map::new();
        payload.insert("fromChain".to_string(), Value::String(self.from_chain));
        payload.insert("toChain".to_string(), Value::String(self.to_chain));
        payload.insert("tokenAddress".to_string(), Value::String(self.token_address));
        payload.insert("amount".to_string(), Value::String(self.amount));
        insert_opt(&mut payload, "recipient", self.recipient);
        Value::Object(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_transaction_native_token() {
        let params: BuildTransactionParams = serde_json::from_value(json!({
            "from_address": "0x1",
            "to_address": "0x2",
            "value": "1000",
        }))
        .unwrap();
        assert_eq!(
            params.into_payload(),
            json!({ "from": "0x1", "to": "0x2", "value": "1000", "chain": "ethereum" })
        );
    }

    #[test]
    fn test_bridge_includes_recipient_when_given() {
        let params: BridgeTokensParams = serde_json::from_value(json!({
            "from_chain": "ethereum",
            "to_chain": "base",
            "token_address": "0xusdc",
            "amount": "25",
            "recipient": "0x9",
        }))
        .unwrap();
        let body = params.into_payload();
        assert_eq!(body["recipient"], "0x9");
        assert_eq!(body["toChain"], "base");
    }

    #[test]
    fn test_multi_chain_balance_defaults() {
        let params: MultiChainBalanceParams =
            serde_json::from_value(json!({ "wallet_address": "0xw" })).unwrap();
        let body = params.into_payload();
        assert_eq!(body["includeTokens"], true);
        assert_eq!(body["chains"].as_array().map(Vec::len), Some(6));
    }
}
