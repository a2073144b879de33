//! Prediction market services.

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Map, Value, json};

use super::{ServicePayload, insert_opt};

/// Parameters for `get_polymarket_events`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct PolymarketEventsParams {
    /// Optional category filter (politics, crypto, sports, ...).
    #[serde(default)]
    pub category: Option<String>,

    /// Number of events to return (default: 20).
    #[serde(default = "default_events_limit")]
    pub limit: u32,
}

fn default_events_limit() -> u32 {
    20
}

impl ServicePayload for PolymarketEventsParams {
    fn into_payload(self) -> Value {
        let mut payload = Map::new();
        payload.insert("limit".to_string(), json!(self.limit));
        insert_opt(&mut payload, "category", self.category);
        Value::Object(payload)
    }
}

/// Parameters for `get_polymarket_odds`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct PolymarketOddsParams {
    /// The Polymarket event ID.
    pub event_id: String,
}

impl ServicePayload for PolymarketOddsParams {
    fn into_payload(self) -> Value {
        json!({ "eventId": self.event_id })
    }
}

/// Parameters for `search_polymarket`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct PolymarketSearchParams {
    /// Search query.
    pub query: String,

    /// Number of results to return (default: 10).
    #[serde(default = "default_search_limit")]
    pub limit: u32,
}

fn default_search_limit() -> u32 {
    10
}

impl ServicePayload for PolymarketSearchParams {
    fn into_payload(self) -> Value {
        json!({ "query": self.query, "limit": self.limit })
    }
}

/// Parameters for `get_prediction_market_odds`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct PredictionOddsParams {
    /// Specific event ID.
    #[serde(default)]
    pub event_id: Option<String>,

    /// Search query for events.
    #[serde(default)]
    pub query: Option<String>,
}

impl ServicePayload for PredictionOddsParams {
    fn into_payload(self) -> Value {
        let mut payload = Map::new();
        insert_opt(&mut payload, "eventId", self.event_id);
        insert_opt(&mut payload, "query", self.query);
        Value::Object(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_category_is_optional() {
        let params: PolymarketEventsParams = serde_json::from_value(json!({})).unwrap();
        assert_eq!(params.into_payload(), json!({ "limit": 20 }));

        let params: PolymarketEventsParams =
            serde_json::from_value(json!({ "category": "crypto", "limit": 5 })).unwrap();
        assert_eq!(params.into_payload(), json!({ "limit": 5, "category": "crypto" }));
    }
}
