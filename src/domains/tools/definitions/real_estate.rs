//! Real estate services.

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Map, Value, json};

use super::{ServicePayload, insert_opt};

/// Parameters for `get_property_valuation`.
///
/// Either field may be given; both are forwarded when present.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct PropertyValuationParams {
    /// Property street address.
    #[serde(default)]
    pub address: Option<String>,

    /// Property ID, if known.
    #[serde(default)]
    pub property_id: Option<String>,
}

impl ServicePayload for PropertyValuationParams {
    fn into_payload(self) -> Value {
        let mut payload = Map::new();
        insert_opt(&mut payload, "address", self.address);
        insert_opt(&mut payload, "propertyId", self.property_id);
        Value::Object(payload)
    }
}

/// Parameters for `analyze_lease`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct LeaseAnalysisParams {
    /// Lease details including rent, term, location, size.
    pub lease_terms: Map<String, Value>,
}

impl ServicePayload for LeaseAnalysisParams {
    fn into_payload(self) -> Value {
        Value::Object(self.lease_terms)
    }
}

/// Parameters for `track_construction_progress`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ConstructionProgressParams {
    /// The construction project ID.
    pub project_id: String,
}

impl ServicePayload for ConstructionProgressParams {
    fn into_payload(self) -> Value {
        json!({ "projectId": self.project_id })
    }
}
