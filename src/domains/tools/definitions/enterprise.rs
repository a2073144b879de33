//! Enterprise services (audits, payment processing, consultations).

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Value, json};

use super::{ServicePayload, default_chain, or_defaults};

const DEFAULT_CURRENCIES: &[&str] = &["USDC", "ETH", "USDT"];

/// Parameters for `request_smart_contract_audit`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ContractAuditParams {
    /// Contract to audit.
    pub contract_address: String,

    /// Blockchain network (default: ethereum).
    #[serde(default = "default_chain")]
    pub chain: String,

    /// Audit scope: quick, standard, full (default: full).
    #[serde(default = "default_scope")]
    pub scope: String,
}

fn default_scope() -> String {
    "full".to_string()
}

impl ServicePayload for ContractAuditParams {
    fn into_payload(self) -> Value {
        json!({
            "contractAddress": self.contract_address,
            "chain": self.chain,
            "scope": self.scope,
        })
    }
}

/// Parameters for `request_payment_processing`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct PaymentProcessingParams {
    /// Merchant identifier.
    pub merchant_id: String,

    /// Payment type: one-time, subscription, escrow (default: one-time).
    #[serde(default = "default_payment_type")]
    pub payment_type: String,

    /// Accepted cryptocurrencies. Defaults to USDC, ETH, USDT.
    #[serde(default)]
    pub currencies: Option<Vec<String>>,
}

fn default_payment_type() -> String {
    "one-time".to_string()
}

impl ServicePayload for PaymentProcessingParams {
    fn into_payload(self) -> Value {
        json!({
            "merchantId": self.merchant_id,
            "paymentType": self.payment_type,
            "currencies": or_defaults(self.currencies, DEFAULT_CURRENCIES),
        })
    }
}

/// Parameters for `request_compliance_consultation`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ComplianceConsultationParams {
    /// Entity type: exchange, defi, nft, payment.
    pub entity_type: String,

    /// Jurisdictions to cover (US, EU, UK, ...).
    pub jurisdictions: Vec<String>,

    /// Services requiring compliance (custody, trading, payments).
    pub services: Vec<String>,
}

impl ServicePayload for ComplianceConsultationParams {
    fn into_payload(self) -> Value {
        json!({
            "entityType": self.entity_type,
            "jurisdictions": self.jurisdictions,
            "services": self.services,
        })
    }
}
