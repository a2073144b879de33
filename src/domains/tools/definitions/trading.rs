//! Trading intelligence services.

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Map, Value, json};

use super::{ServicePayload, default_chain, insert_opt, or_defaults};

const GAS_CHAINS: &[&str] = &["ethereum", "base", "polygon", "arbitrum", "optimism"];
const WHALE_CHAINS: &[&str] = &["ethereum", "base", "polygon"];
const ARBITRAGE_CHAINS: &[&str] = &["ethereum", "base", "polygon", "arbitrum"];
const SENTIMENT_SOURCES: &[&str] = &["twitter", "reddit", "news"];

/// Upper bound accepted by the trending-tokens service.
pub const TRENDING_LIMIT_MAX: u32 = 50;

/// Parameters for `get_gas_prices`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GasPricesParams {
    /// Chains to query: ethereum, base, polygon, bsc, arbitrum, optimism.
    /// Defaults to all major chains.
    #[serde(default)]
    pub chains: Option<Vec<String>>,
}

impl ServicePayload for GasPricesParams {
    fn into_payload(self) -> Value {
        json!({ "chains": or_defaults(self.chains, GAS_CHAINS) })
    }
}

/// Parameters shared by the single-token lookups
/// (metadata, price, sentiment, DEX liquidity, risk metrics).
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TokenParams {
    /// The token contract address (0x...).
    pub token_address: String,

    /// Blockchain network (default: ethereum).
    #[serde(default = "default_chain")]
    pub chain: String,
}

impl ServicePayload for TokenParams {
    fn into_payload(self) -> Value {
        json!({ "tokenAddress": self.token_address, "chain": self.chain })
    }
}

/// Parameters for `get_trending_tokens`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TrendingTokensParams {
    /// Blockchain network (default: ethereum).
    #[serde(default = "default_chain")]
    pub chain: String,

    /// Number of tokens to return (default: 10, max: 50).
    #[serde(default = "default_trending_limit")]
    pub limit: u32,
}

fn default_trending_limit() -> u32 {
    10
}

impl ServicePayload for TrendingTokensParams {
    fn into_payload(self) -> Value {
        json!({ "chain": self.chain, "limit": self.limit.min(TRENDING_LIMIT_MAX) })
    }
}

/// Parameters for `get_whale_alerts`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct WhaleAlertsParams {
    /// Chains to monitor. Defaults to ethereum, base and polygon.
    #[serde(default)]
    pub chains: Option<Vec<String>>,

    /// Minimum transaction value in USD (default: 100000).
    #[serde(default = "default_min_value_usd")]
    pub min_value_usd: u64,
}

fn default_min_value_usd() -> u64 {
    100_000
}

impl ServicePayload for WhaleAlertsParams {
    fn into_payload(self) -> Value {
        json!({
            "chains": or_defaults(self.chains, WHALE_CHAINS),
            "minValueUsd": self.min_value_usd,
        })
    }
}

/// Parameters for `get_trade_signals`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TradeSignalsParams {
    /// Optional token address or symbol to focus on.
    #[serde(default)]
    pub token: Option<String>,

    /// Blockchain network (default: ethereum).
    #[serde(default = "default_chain")]
    pub chain: String,
}

impl ServicePayload for TradeSignalsParams {
    fn into_payload(self) -> Value {
        let mut payload = Map::new();
        insert_opt(&mut payload, "token", self.token);
        payload.insert("chain".to_string(), Value::String(self.chain));
        Value::Object(payload)
    }
}

/// Parameters for `get_trading_signal`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TradingSignalParams {
    /// Trading pair symbol, e.g. ETH/USDC.
    pub symbol: String,

    /// Chart timeframe: 1m, 5m, 15m, 1h, 4h, 1d (default: 1h).
    #[serde(default = "default_signal_timeframe")]
    pub timeframe: String,
}

fn default_signal_timeframe() -> String {
    "1h".to_string()
}

impl ServicePayload for TradingSignalParams {
    fn into_payload(self) -> Value {
        json!({ "symbol": self.symbol, "timeframe": self.timeframe })
    }
}

/// Parameters for `get_sentiment_analysis`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SentimentAnalysisParams {
    /// Topic to analyze (token name, project, or keyword).
    pub query: String,

    /// Sources: twitter, reddit, news, telegram. Defaults to twitter, reddit, news.
    #[serde(default)]
    pub sources: Option<Vec<String>>,
}

impl ServicePayload for SentimentAnalysisParams {
    fn into_payload(self) -> Value {
        json!({
            "query": self.query,
            "sources": or_defaults(self.sources, SENTIMENT_SOURCES),
        })
    }
}

/// Parameters for `get_arbitrage_opportunities`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ArbitrageParams {
    /// Chains to scan. Defaults to ethereum, base, polygon, arbitrum.
    #[serde(default)]
    pub chains: Option<Vec<String>>,

    /// Minimum profit percentage to report (default: 0.5).
    #[serde(default = "default_min_profit_pct")]
    pub min_profit_pct: f64,
}

fn default_min_profit_pct() -> f64 {
    0.5
}

impl ServicePayload for ArbitrageParams {
    fn into_payload(self) -> Value {
        json!({
            "chains": or_defaults(self.chains, ARBITRAGE_CHAINS),
            "minProfitPct": self.min_profit_pct,
        })
    }
}

/// Parameters for `get_correlation_matrix`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CorrelationMatrixParams {
    /// Token addresses or symbols to correlate.
    pub tokens: Vec<String>,

    /// Analysis period: 1d, 7d, 30d, 90d (default: 7d).
    #[serde(default = "default_correlation_timeframe")]
    pub timeframe: String,
}

fn default_correlation_timeframe() -> String {
    "7d".to_string()
}

impl ServicePayload for CorrelationMatrixParams {
    fn into_payload(self) -> Value {
        json!({ "tokens": self.tokens, "timeframe": self.timeframe })
    }
}

/// Parameters for `get_batch_quote`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct BatchQuoteParams {
    /// Token addresses to quote.
    pub tokens: Vec<String>,

    /// Blockchain network (default: ethereum).
    #[serde(default = "default_chain")]
    pub chain: String,
}

impl ServicePayload for BatchQuoteParams {
    fn into_payload(self) -> Value {
        json!({ "tokens": self.tokens, "chain": self.chain })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload<P: ServicePayload>(args: Value) -> Value {
        serde_json::from_value::<P>(args).unwrap().into_payload()
    }

    #[test]
    fn test_gas_prices_default_chains() {
        let body = payload::<GasPricesParams>(json!({}));
        assert_eq!(
            body["chains"],
            json!(["ethereum", "base", "polygon", "arbitrum", "optimism"])
        );
    }

    #[test]
    fn test_token_params_camel_case() {
        let body = payload::<TokenParams>(json!({ "token_address": "0xabc" }));
        assert_eq!(body, json!({ "tokenAddress": "0xabc", "chain": "ethereum" }));
    }

    #[test]
    fn test_trending_limit_is_clamped() {
        let body = payload::<TrendingTokensParams>(json!({ "limit": 500 }));
        assert_eq!(body["limit"], 50);

        let body = payload::<TrendingTokensParams>(json!({}));
        assert_eq!(body["limit"], 10);
    }

    #[test]
    fn test_trade_signals_omits_missing_token() {
        let body = payload::<TradeSignalsParams>(json!({ "chain": "base" }));
        assert_eq!(body, json!({ "chain": "base" }));

        let body = payload::<TradeSignalsParams>(json!({ "token": "PEPE" }));
        assert_eq!(body, json!({ "token": "PEPE", "chain": "ethereum" }));
    }

    #[test]
    fn test_whale_alerts_defaults() {
        let body = payload::<WhaleAlertsParams>(json!({}));
        assert_eq!(body["minValueUsd"], 100_000);
        assert_eq!(body["chains"], json!(["ethereum", "base", "polygon"]));
    }

    #[test]
    fn test_correlation_requires_tokens() {
        assert!(serde_json::from_value::<CorrelationMatrixParams>(json!({})).is_err());
    }
}
