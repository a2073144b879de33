//! Tool Registry - the static catalog of Coin Railz services.
//!
//! This module provides:
//! - The immutable table of every tool (name, service path, category, price)
//! - Name and service-path lookup
//! - Tool metadata (`rmcp::model::Tool`) for listing
//!
//! Each entry carries plain function pointers for its input schema and
//! payload builder, so dispatch is a table lookup.

use std::fmt;
use std::sync::Arc;

use rmcp::handler::server::tool::cached_schema_for_type;
use rmcp::model::{JsonObject, Tool};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{Value, json};

use super::definitions::{
    ServicePayload, agents::*, banking::*, build_payload, discovery::*, enterprise::*,
    execution::*, markets::*, prediction::*, premium::*, real_estate::*, trading::*,
};
use super::error::ToolError;

// ============================================================================
// Types
// ============================================================================

/// Service category, as grouped in the Coin Railz catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Discovery,
    Trading,
    Execution,
    Premium,
    RealEstate,
    Banking,
    PredictionMarkets,
    AgentInfrastructure,
    Enterprise,
    TraditionalMarkets,
}

impl Category {
    /// All categories in catalog order.
    pub const ALL: [Category; 10] = [
        Category::Discovery,
        Category::Trading,
        Category::Execution,
        Category::Premium,
        Category::RealEstate,
        Category::Banking,
        Category::PredictionMarkets,
        Category::AgentInfrastructure,
        Category::Enterprise,
        Category::TraditionalMarkets,
    ];

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Discovery => "Discovery & Testing",
            Category::Trading => "Trading Intelligence",
            Category::Execution => "Execution & Infrastructure",
            Category::Premium => "Premium Services",
            Category::RealEstate => "Real Estate",
            Category::Banking => "Banking & Finance",
            Category::PredictionMarkets => "Prediction Markets",
            Category::AgentInfrastructure => "AI Agent Infrastructure",
            Category::Enterprise => "Enterprise Services",
            Category::TraditionalMarkets => "Traditional Markets",
        }
    }
}

/// How a tool's price is billed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceUnit {
    PerCall,
    PerHour,
}

/// One entry of the tool catalog.
pub struct ToolDefinition {
    /// Tool name as registered in MCP.
    pub name: &'static str,

    /// Path segment under `/x402/` on the Coin Railz API.
    pub service: &'static str,

    pub category: Category,

    /// Price in US cents.
    price_cents: u64,

    pub unit: PriceUnit,

    /// Whether the first call per API key is free.
    pub free_first_call: bool,

    /// Tool description shown to clients.
    pub description: &'static str,

    schema: fn() -> Arc<JsonObject>,
    payload: fn(JsonObject) -> Result<Value, ToolError>,
}

impl ToolDefinition {
    /// Price in USD.
    pub fn price(&self) -> Decimal {
        Decimal::new(self.price_cents as i64, 2)
    }

    /// Price formatted for display, e.g. `0.25` or `50.00/hour`.
    pub fn price_label(&self) -> String {
        match self.unit {
            PriceUnit::PerCall => self.price().to_string(),
            PriceUnit::PerHour => format!("{}/hour", self.price()),
        }
    }

    /// Upstream path relative to the base URL.
    pub fn path(&self) -> String {
        format!("/x402/{}", self.service)
    }

    /// JSON schema of the tool arguments.
    pub fn input_schema(&self) -> Arc<JsonObject> {
        (self.schema)()
    }

    /// Validate arguments and build the upstream request body.
    pub fn build_payload(&self, arguments: JsonObject) -> Result<Value, ToolError> {
        (self.payload)(arguments)
    }

    /// Create a Tool model for this entry (metadata).
    pub fn to_tool(&self) -> Tool {
        Tool {
            name: self.name.into(),
            description: Some(self.full_description().into()),
            input_schema: self.input_schema(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Catalog summary used by the catalog resource.
    pub fn summary(&self) -> Value {
        json!({
            "name": self.name,
            "service": self.service,
            "category": self.category,
            "price_usd": self.price().to_string(),
            "unit": self.unit,
            "free_first_call": self.free_first_call,
        })
    }

    fn full_description(&self) -> String {
        if self.free_first_call {
            format!(
                "{} Price: ${} (first call free).",
                self.description,
                self.price_label()
            )
        } else {
            format!("{} Price: ${}.", self.description, self.price_label())
        }
    }
}

impl fmt::Debug for ToolDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolDefinition")
            .field("name", &self.name)
            .field("service", &self.service)
            .field("category", &self.category)
            .field("price", &self.price_label())
            .field("free_first_call", &self.free_first_call)
            .finish()
    }
}

// ============================================================================
// Catalog
// ============================================================================

const fn entry<P: ServicePayload>(
    name: &'static str,
    service: &'static str,
    category: Category,
    price_cents: u64,
    description: &'static str,
) -> ToolDefinition {
    ToolDefinition {
        name,
        service,
        category,
        price_cents,
        unit: PriceUnit::PerCall,
        free_first_call: false,
        description,
        schema: cached_schema_for_type::<P>,
        payload: build_payload::<P>,
    }
}

const fn free_first(mut def: ToolDefinition) -> ToolDefinition {
    def.free_first_call = true;
    def
}

const fn hourly(mut def: ToolDefinition) -> ToolDefinition {
    def.unit = PriceUnit::PerHour;
    def
}

use Category::*;

static CATALOG: [ToolDefinition; 41] = [
    // Discovery & testing
    entry::<PingParams>(
        "ping_coinrailz", "ping", Discovery, 25,
        "Test connectivity to the Coin Railz x402 payment infrastructure. Returns platform status, version and available services.",
    ),
    // Trading intelligence
    free_first(entry::<GasPricesParams>(
        "get_gas_prices", "gas-price-oracle", Trading, 10,
        "Get real-time gas prices in gwei, with USD cost estimates, across blockchain networks.",
    )),
    free_first(entry::<TokenParams>(
        "get_token_metadata", "token-metadata", Trading, 10,
        "Get ERC-20 token metadata: name, symbol, decimals and total supply.",
    )),
    entry::<TokenParams>(
        "get_token_price", "token-price", Trading, 15,
        "Get the real-time USD price of a token from multiple DEX sources.",
    ),
    entry::<TokenParams>(
        "get_token_sentiment", "token-sentiment", Trading, 25,
        "Get AI-powered social sentiment for a token: score, social volume and trending topics.",
    ),
    entry::<TrendingTokensParams>(
        "get_trending_tokens", "trending-tokens", Trading, 50,
        "Get trending tokens across DeFi platforms with volume, price change and social metrics.",
    ),
    entry::<WhaleAlertsParams>(
        "get_whale_alerts", "whale-alerts", Trading, 35,
        "Get recent large (whale) transactions across chains with sender, receiver and token details.",
    ),
    entry::<TokenParams>(
        "get_dex_liquidity", "dex-liquidity", Trading, 20,
        "Get DEX liquidity depth, top pools and slippage estimates for a token.",
    ),
    entry::<TradeSignalsParams>(
        "get_trade_signals", "trade-signals", Trading, 75,
        "Get AI-powered trading signals with entry/exit recommendations and confidence scores.",
    ),
    entry::<TradingSignalParams>(
        "get_trading_signal", "trading-signal", Trading, 50,
        "Get a buy/sell signal for a trading pair and timeframe, with indicators and target prices.",
    ),
    entry::<SentimentAnalysisParams>(
        "get_sentiment_analysis", "sentiment-analysis", Trading, 30,
        "Get AI-powered sentiment analysis for a crypto topic: score, volume trends and key narratives.",
    ),
    entry::<ArbitrageParams>(
        "get_arbitrage_opportunities", "arbitrage-scanner", Trading, 100,
        "Scan for cross-chain arbitrage opportunities with routes and expected profit.",
    ),
    entry::<CorrelationMatrixParams>(
        "get_correlation_matrix", "correlation-matrix", Trading, 50,
        "Get correlation coefficients between all pairs of the given tokens.",
    ),
    entry::<TokenParams>(
        "get_risk_metrics", "risk-metrics", Trading, 40,
        "Get volatility, VaR, max drawdown and other risk metrics for a token.",
    ),
    entry::<BatchQuoteParams>(
        "get_batch_quote", "batch-quote", Trading, 25,
        "Get prices and metadata for multiple tokens in a single request.",
    ),
    // Execution & infrastructure
    entry::<MultiChainBalanceParams>(
        "get_multi_chain_balance", "multi-chain-balance", Execution, 50,
        "Get native and ERC-20 wallet balances across EVM networks.",
    ),
    entry::<BuildTransactionParams>(
        "build_transaction", "transaction-builder", Execution, 15,
        "Build an unsigned transaction object, with gas estimates, ready for signing.",
    ),
    entry::<ManageApprovalsParams>(
        "manage_approvals", "approval-manager", Execution, 30,
        "List a wallet's token approvals with risk assessment, or revoke risky ones.",
    ),
    entry::<BridgeTokensParams>(
        "bridge_tokens", "seamless-chain-bridge", Execution, 50,
        "Get a bridge route, fees and estimated time for a cross-chain token transfer.",
    ),
    // Premium
    entry::<ContractScanParams>(
        "scan_smart_contract", "contract-scan", Premium, 200,
        "Security analysis of a smart contract: vulnerabilities, rug pull risk and audit score.",
    ),
    entry::<WalletRiskParams>(
        "get_wallet_risk_score", "wallet-risk", Premium, 50,
        "Risk score, transaction patterns and security recommendations for a wallet.",
    ),
    entry::<PortfolioTrackerParams>(
        "track_portfolio", "portfolio-tracker", Premium, 75,
        "Portfolio value, allocation, P&L and historical performance for a wallet.",
    ),
    entry::<PortfolioOptimizationParams>(
        "optimize_portfolio", "portfolio-optimization", Premium, 100,
        "AI-powered rebalancing recommendations and optimal allocation for a set of holdings.",
    ),
    // Real estate
    entry::<PropertyValuationParams>(
        "get_property_valuation", "property-valuation", RealEstate, 500,
        "AI-powered property valuation with comparable sales and market trends.",
    ),
    entry::<LeaseAnalysisParams>(
        "analyze_lease", "lease-analysis", RealEstate, 300,
        "Analyze commercial lease terms against the market and get recommendations.",
    ),
    entry::<ConstructionProgressParams>(
        "track_construction_progress", "construction-progress", RealEstate, 200,
        "Track construction project progress, timeline and budget status.",
    ),
    // Banking & finance
    entry::<CreditRiskParams>(
        "get_credit_risk_score", "credit-risk-score", Banking, 200,
        "Credit risk assessment for individuals, businesses or DAOs.",
    ),
    entry::<FraudDetectionParams>(
        "detect_fraud", "fraud-detection", Banking, 50,
        "AI-powered fraud score and risk indicators for a transaction.",
    ),
    entry::<ComplianceCheckParams>(
        "run_compliance_check", "compliance-check", Banking, 100,
        "Run AML, KYC, sanctions or PEP compliance checks on an entity.",
    ),
    // Prediction markets
    entry::<PolymarketEventsParams>(
        "get_polymarket_events", "polymarket-events", PredictionMarkets, 25,
        "List active Polymarket prediction markets with current odds.",
    ),
    entry::<PolymarketOddsParams>(
        "get_polymarket_odds", "polymarket-odds", PredictionMarkets, 15,
        "Current odds, volume and price history for a Polymarket event.",
    ),
    entry::<PolymarketSearchParams>(
        "search_polymarket", "polymarket-search", PredictionMarkets, 20,
        "Search Polymarket events by keyword.",
    ),
    entry::<PredictionOddsParams>(
        "get_prediction_market_odds", "prediction-market-odds", PredictionMarkets, 50,
        "Prediction market odds aggregated from multiple sources.",
    ),
    // AI agent infrastructure
    entry::<AgentWalletParams>(
        "create_agent_wallet", "agent-create-wallet", AgentInfrastructure, 100,
        "Create a wallet with managed keys for an AI agent.",
    ),
    entry::<InstantWalletParams>(
        "create_instant_agent_wallet", "instant-agent-wallet", AgentInfrastructure, 50,
        "Create a temporary agent wallet valid for 24 hours.",
    ),
    entry::<AgentIdentityParams>(
        "verify_agent_identity", "verified-agent-identity", AgentInfrastructure, 200,
        "Verify and register an AI agent's on-chain identity (ERC-8004).",
    ),
    // Enterprise
    entry::<ContractAuditParams>(
        "request_smart_contract_audit", "service/smart-contract-audit", Enterprise, 100_000,
        "Request a smart contract security audit. Returns confirmation and estimated delivery time.",
    ),
    hourly(entry::<PaymentProcessingParams>(
        "request_payment_processing", "service/payment-processing", Enterprise, 5_000,
        "Set up multi-chain payment processing for a merchant.",
    )),
    entry::<ComplianceConsultationParams>(
        "request_compliance_consultation", "service/compliance-consultation", Enterprise, 50_000,
        "Request an AML/KYC compliance consultation with a preliminary assessment.",
    ),
    // Traditional markets
    entry::<StockSentimentParams>(
        "get_stock_sentiment", "stock-sentiment", TraditionalMarkets, 40,
        "AI-powered stock sentiment with rating, confidence, key drivers and a trading recommendation.",
    ),
    entry::<ForexSentimentParams>(
        "get_forex_sentiment", "forex-sentiment", TraditionalMarkets, 40,
        "AI-powered forex pair sentiment with rating, confidence, key drivers and a trading recommendation.",
    ),
];

// ============================================================================
// Lookup
// ============================================================================

/// Every registered tool, in catalog order.
pub fn all() -> &'static [ToolDefinition] {
    &CATALOG
}

/// Find a tool by its MCP name.
pub fn lookup(name: &str) -> Result<&'static ToolDefinition, ToolError> {
    CATALOG
        .iter()
        .find(|def| def.name == name)
        .ok_or_else(|| ToolError::unknown_tool(name))
}

/// Find a tool by its upstream service path.
pub fn lookup_service(service: &str) -> Option<&'static ToolDefinition> {
    CATALOG.iter().find(|def| def.service == service)
}

/// Service paths whose first call is free.
pub fn free_first_call_services() -> impl Iterator<Item = &'static str> {
    CATALOG
        .iter()
        .filter(|def| def.free_first_call)
        .map(|def| def.service)
}

/// Get all tools as Tool models (metadata).
pub fn get_all_tools() -> Vec<Tool> {
    CATALOG.iter().map(ToolDefinition::to_tool).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_tool_has_non_negative_price() {
        for def in all() {
            let found = lookup(def.name).unwrap();
            assert!(found.price() >= Decimal::ZERO, "{} has negative price", def.name);
        }
    }

    #[test]
    fn test_names_and_services_are_unique() {
        let names: HashSet<_> = all().iter().map(|d| d.name).collect();
        let services: HashSet<_> = all().iter().map(|d| d.service).collect();
        assert_eq!(names.len(), all().len());
        assert_eq!(services.len(), all().len());
    }

    #[test]
    fn test_all_categories_represented() {
        let used: HashSet<_> = all().iter().map(|d| d.category).collect();
        for category in Category::ALL {
            assert!(used.contains(&category), "{:?} has no tools", category);
        }
    }

    #[test]
    fn test_free_first_call_services() {
        let free: Vec<_> = free_first_call_services().collect();
        assert_eq!(free, vec!["gas-price-oracle", "token-metadata"]);
    }

    #[test]
    fn test_lookup_unknown_is_invalid_request() {
        assert!(matches!(
            lookup("get_moon_price"),
            Err(ToolError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_prices_and_paths() {
        let ping = lookup("ping_coinrailz").unwrap();
        assert_eq!(ping.price().to_string(), "0.25");
        assert_eq!(ping.path(), "/x402/ping");

        let audit = lookup("request_smart_contract_audit").unwrap();
        assert_eq!(audit.path(), "/x402/service/smart-contract-audit");
        assert_eq!(audit.price_label(), "1000.00");

        let processing = lookup("request_payment_processing").unwrap();
        assert_eq!(processing.price_label(), "50.00/hour");
    }

    #[test]
    fn test_lookup_service() {
        let def = lookup_service("token-metadata").unwrap();
        assert_eq!(def.name, "get_token_metadata");
        assert!(def.free_first_call);
        assert!(lookup_service("nope").is_none());
    }

    #[test]
    fn test_tool_metadata_has_schema() {
        let tools = get_all_tools();
        assert_eq!(tools.len(), all().len());
        let gas = tools.iter().find(|t| t.name == "get_gas_prices").unwrap();
        assert!(gas.description.as_deref().unwrap().contains("first call free"));
        assert!(gas.input_schema.contains_key("properties"));
    }

    #[test]
    fn test_input_schema_is_shared_object() {
        let price = lookup("get_token_price").unwrap();
        let first = price.input_schema();
        let second = price.input_schema();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first["type"], "object");
        assert_eq!(first["required"], json!(["token_address"]));
    }
}
