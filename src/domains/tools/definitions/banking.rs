//! Banking & finance services.

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Map, Value, json};

use super::ServicePayload;

/// Parameters for `get_credit_risk_score`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreditRiskParams {
    /// Identifier for the entity (wallet, business ID, etc.).
    pub entity_id: String,

    /// Entity type: individual, business, dao (default: individual).
    #[serde(default = "default_entity_type")]
    pub entity_type: String,
}

fn default_entity_type() -> String {
    "individual".to_string()
}

impl ServicePayload for CreditRiskParams {
    fn into_payload(self) -> Value {
        json!({ "entityId": self.entity_id, "entityType": self.entity_type })
    }
}

/// Parameters for `detect_fraud`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct FraudDetectionParams {
    /// Transaction details to analyze; forwarded as-is.
    pub transaction_data: Map<String, Value>,
}

impl ServicePayload for FraudDetectionParams {
    fn into_payload(self) -> Value {
        Value::Object(self.transaction_data)
    }
}

/// Parameters for `run_compliance_check`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ComplianceCheckParams {
    /// Identifier for the entity (wallet address, etc.).
    pub entity_id: String,

    /// Check type: aml, kyc, sanctions, pep (default: aml).
    #[serde(default = "default_check_type")]
    pub check_type: String,
}

fn default_check_type() -> String {
    "aml".to_string()
}

impl ServicePayload for ComplianceCheckParams {
    fn into_payload(self) -> Value {
        json!({ "entityId": self.entity_id, "checkType": self.check_type })
    }
}
