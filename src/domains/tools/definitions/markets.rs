//! Traditional market sentiment services (stocks, forex).

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Value, json};

use super::{ServicePayload, default_true};

/// Parameters for `get_stock_sentiment`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct StockSentimentParams {
    /// Stock ticker symbol (e.g. AAPL, TSLA, NVDA).
    pub symbol: String,

    /// Include recent news and headlines analysis.
    #[serde(default = "default_true")]
    pub include_news: bool,

    /// Include technical analysis and chart patterns.
    #[serde(default = "default_true")]
    pub include_technicals: bool,

    /// Include institutional and insider activity.
    #[serde(default = "default_true")]
    pub include_institutional: bool,
}

impl ServicePayload for StockSentimentParams {
    fn into_payload(self) -> Value {
        json!({
            "symbol": self.symbol.to_uppercase(),
            "includeNews": self.include_news,
            "includeTechnicals": self.include_technicals,
            "includeInstitutional": self.include_institutional,
        })
    }
}

/// Parameters for `get_forex_sentiment`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ForexSentimentParams {
    /// Currency pair (e.g. EURUSD, GBPJPY).
    pub pair: String,

    /// Include economic factors analysis.
    #[serde(default = "default_true")]
    pub include_economic: bool,

    /// Include central bank policy outlook.
    #[serde(default = "default_true")]
    pub include_central_bank: bool,

    /// Include geopolitical factors.
    #[serde(default = "default_true")]
    pub include_geopolitical: bool,
}

impl ServicePayload for ForexSentimentParams {
    fn into_payload(self) -> Value {
        json!({
            "pair": self.pair.to_uppercase(),
            "includeEconomic": self.include_economic,
            "includeCentralBank": self.include_central_bank,
            "includeGeopolitical": self.include_geopolitical,
        })
    }
}
