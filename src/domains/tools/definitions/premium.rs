//! Premium analysis services.

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Value, json};

use super::{ServicePayload, default_chain, or_defaults};

const PORTFOLIO_CHAINS: &[&str] = &["ethereum", "base", "polygon", "arbitrum"];

/// Parameters for `scan_smart_contract`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ContractScanParams {
    /// The contract address to scan (0x...).
    pub contract_address: String,

    /// Blockchain network (default: ethereum).
    #[serde(default = "default_chain")]
    pub chain: String,
}

impl ServicePayload for ContractScanParams {
    fn into_payload(self) -> Value {
        json!({ "contractAddress": self.contract_address, "chain": self.chain })
    }
}

/// Parameters for `get_wallet_risk_score`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct WalletRiskParams {
    /// The wallet address to analyze (0x...).
    pub wallet_address: String,

    /// Primary chain for analysis (default: ethereum).
    #[serde(default = "default_chain")]
    pub chain: String,
}

impl ServicePayload for WalletRiskParams {
    fn into_payload(self) -> Value {
        json!({ "walletAddress": self.wallet_address, "chain": self.chain })
    }
}

/// Parameters for `track_portfolio`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct PortfolioTrackerParams {
    /// The wallet address to track.
    pub wallet_address: String,

    /// Chains to include. Defaults to ethereum, base, polygon, arbitrum.
    #[serde(default)]
    pub chains: Option<Vec<String>>,
}

impl ServicePayload for PortfolioTrackerParams {
    fn into_payload(self) -> Value {
        json!({
            "walletAddress": self.wallet_address,
            "chains": or_defaults(self.chains, PORTFOLIO_CHAINS),
        })
    }
}

/// Parameters for `optimize_portfolio`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct PortfolioOptimizationParams {
    /// Current holdings, e.g. `[{"token": "...", "amount": "...", "chain": "..."}]`.
    pub holdings: Vec<Value>,

    /// Risk level: low, medium, high (default: medium).
    #[serde(default = "default_risk_tolerance")]
    pub risk_tolerance: String,
}

fn default_risk_tolerance() -> String {
    "medium".to_string()
}

impl ServicePayload for PortfolioOptimizationParams {
    fn into_payload(self) -> Value {
        json!({ "holdings": self.holdings, "riskTolerance": self.risk_tolerance })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optimization_passes_holdings_through() {
        let params: PortfolioOptimizationParams = serde_json::from_value(json!({
            "holdings": [{ "token_address": "0xeth", "amount": "2", "chain": "base" }]
        }))
        .unwrap();
        let body = params.into_payload();
        assert_eq!(body["riskTolerance"], "medium");
        assert_eq!(body["holdings"][0]["token_address"], "0xeth");
        assert_eq!(body["holdings"][0]["amount"], "2");
    }
}
