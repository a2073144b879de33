//! HTTP client for the Coin Railz x402 API.
//!
//! Every tool call becomes `POST {base}/x402/{service}` with a JSON body.
//! Payment-required (402) answers are resolved by retrying once with the
//! configured API key or an auto-fetched demo key.

use std::time::Duration;

use reqwest::{Response, StatusCode, header};
use rmcp::model::JsonObject;
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use super::free_calls::FreeCallTracker;
use super::telemetry::{self, TelemetryEvent, TelemetryReport};
use super::{API_KEY_HEADER, SDK_TYPE, install, user_agent};
use crate::core::config::{Config, Credentials, UpstreamConfig};
use crate::domains::tools::ToolError;
use crate::domains::tools::registry::{self, ToolDefinition};

const DEMO_KEY_TIMEOUT: Duration = Duration::from_secs(10);

const DEMO_KEY_NOTE: &str =
    "Used auto-fetched demo key. Set COINRAILZ_API_KEY env var to use your own credits.";

#[derive(Debug, Deserialize)]
struct DemoKeyResponse {
    api_key: Option<String>,
}

/// Shared client holding credentials and per-process call state.
pub struct CoinRailzClient {
    http: reqwest::Client,
    credentials: Credentials,
    upstream: UpstreamConfig,
    free_calls: FreeCallTracker,
    demo_key: Mutex<Option<String>>,
    install_id: String,
}

impl CoinRailzClient {
    /// Create a client from configuration, resolving the persistent install id.
    pub fn new(config: &Config) -> Result<Self, ToolError> {
        Self::with_install_id(config, install::resolve())
    }

    /// Create a client with an explicit install id.
    pub fn with_install_id(config: &Config, install_id: String) -> Result<Self, ToolError> {
        let http = reqwest::Client::builder()
            .timeout(config.upstream.timeout())
            .build()
            .map_err(|e| ToolError::transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            credentials: config.credentials.clone(),
            upstream: config.upstream.clone(),
            free_calls: FreeCallTracker::new(),
            demo_key: Mutex::new(None),
            install_id,
        })
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn install_id(&self) -> &str {
        &self.install_id
    }

    pub fn free_calls(&self) -> &FreeCallTracker {
        &self.free_calls
    }

    /// Look up a tool by name and call it.
    pub async fn call_tool(&self, name: &str, arguments: JsonObject) -> Result<Value, ToolError> {
        let def = registry::lookup(name)?;
        self.call(def, arguments).await
    }

    /// Call a catalog tool with raw MCP arguments.
    #[instrument(skip(self, def, arguments), fields(tool = def.name, service = def.service))]
    pub async fn call(&self, def: &ToolDefinition, arguments: JsonObject) -> Result<Value, ToolError> {
        let payload = def.build_payload(arguments)?;
        self.report(TelemetryEvent::Usage);

        let url = format!("{}{}", self.credentials.base(), def.path());
        let free = self.free_calls.consume_free_call_if_eligible(def.service);
        let key = if free { None } else { self.current_key().await };

        debug!(free, with_key = key.is_some(), "Calling {}", url);
        let response = self.post(&url, &payload, key.as_deref()).await?;

        if response.status() != StatusCode::PAYMENT_REQUIRED {
            return Self::into_result(response).await;
        }

        let challenge = Self::read_json(response).await;
        let retry = match key {
            // The key we sent was refused; nothing else to try.
            Some(_) => None,
            None => match &self.credentials.api_key {
                Some(api_key) => {
                    info!("Free call refused upstream, retrying with API key");
                    Some((api_key.clone(), false))
                }
                None if self.upstream.auto_demo_key => {
                    self.demo_key().await.map(|demo| (demo, true))
                }
                None => None,
            },
        };

        let Some((retry_key, is_demo)) = retry else {
            return Err(Self::payment_required(def, &challenge));
        };

        let response = self.post(&url, &payload, Some(&retry_key)).await?;
        if response.status() == StatusCode::PAYMENT_REQUIRED {
            let challenge = Self::read_json(response).await;
            return Err(Self::payment_required(def, &challenge));
        }

        let mut result = Self::into_result(response).await?;
        if is_demo {
            if let Value::Object(map) = &mut result {
                map.insert("_sdk_note".to_string(), json!(DEMO_KEY_NOTE));
            }
        }
        Ok(result)
    }

    /// Send the one-time install event.
    pub fn report_install(&self) {
        self.report(TelemetryEvent::Install);
    }

    fn report(&self, event: TelemetryEvent) {
        if !self.upstream.telemetry {
            return;
        }
        let report = TelemetryReport::new(
            &self.install_id,
            event,
            self.credentials.has_api_key(),
            self.credentials.base(),
        );
        let url = format!("{}/api/sdk/telemetry", self.credentials.base());
        telemetry::spawn_report(self.http.clone(), url, report);
    }

    /// Configured API key, or a demo key fetched earlier.
    async fn current_key(&self) -> Option<String> {
        if let Some(api_key) = &self.credentials.api_key {
            return Some(api_key.clone());
        }
        self.demo_key.lock().await.clone()
    }

    /// Demo key with trial credits, fetched at most once successfully.
    async fn demo_key(&self) -> Option<String> {
        let mut cached = self.demo_key.lock().await;
        if cached.is_some() {
            return cached.clone();
        }

        let url = format!("{}/api/sdk/demo-key", self.credentials.base());
        let result = self
            .http
            .post(&url)
            .header(header::USER_AGENT, user_agent())
            .timeout(DEMO_KEY_TIMEOUT)
            .json(&json!({ "installId": self.install_id, "sdkType": SDK_TYPE }))
            .send()
            .await;

        let response = match result {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                warn!(status = %response.status(), "Demo key request refused");
                return None;
            }
            Err(e) => {
                warn!(error = %e, "Demo key request failed");
                return None;
            }
        };

        match response.json::<DemoKeyResponse>().await {
            Ok(DemoKeyResponse { api_key: Some(key) }) if !key.is_empty() => {
                info!("Obtained demo API key");
                *cached = Some(key.clone());
                Some(key)
            }
            Ok(_) => {
                warn!("Demo key response carried no key");
                None
            }
            Err(e) => {
                warn!(error = %e, "Invalid demo key response");
                None
            }
        }
    }

    async fn post(&self, url: &str, payload: &Value, key: Option<&str>) -> Result<Response, ToolError> {
        let mut request = self
            .http
            .post(url)
            .header(header::USER_AGENT, user_agent())
            .json(payload);

        if let Some(key) = key {
            request = request.header(API_KEY_HEADER, key);
        }

        request.send().await.map_err(|e| {
            warn!(error = %e, "Request to {} failed", url);
            if e.is_builder() {
                // Malformed base URL; retrying cannot help.
                ToolError::invalid_request(format!("Invalid request URL {}: {}", url, e))
            } else {
                ToolError::transport(e.to_string())
            }
        })
    }

    /// Map a non-402 response to the tool result.
    async fn into_result(response: Response) -> Result<Value, ToolError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ToolError::transport(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "Upstream error");
            return Err(ToolError::upstream(status.as_u16(), body));
        }

        Ok(serde_json::from_str(&body).unwrap_or(Value::String(body)))
    }

    async fn read_json(response: Response) -> Value {
        response.json().await.unwrap_or(Value::Null)
    }

    fn payment_required(def: &ToolDefinition, challenge: &Value) -> ToolError {
        let price = match &challenge["accepts"][0]["maxAmountRequiredUSD"] {
            Value::String(price) => price.clone(),
            Value::Number(price) => price.to_string(),
            _ => def.price_label(),
        };
        ToolError::authentication(def.service, price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex as StdMutex};

    use axum::extract::State;
    use axum::http::{HeaderMap, Uri};
    use axum::routing::post;
    use axum::{Json, Router};

    #[derive(Debug, Clone)]
    struct Recorded {
        path: String,
        api_key: Option<String>,
        body: Value,
    }

    #[derive(Clone, Copy)]
    enum Mode {
        Ok,
        Fail(u16),
        /// 402 unless an X-API-KEY header is present.
        RequireKey,
        /// 402 unless the key is the demo key.
        RequireDemoKey,
    }

    #[derive(Clone)]
    struct Mock {
        mode: Mode,
        calls: Arc<StdMutex<Vec<Recorded>>>,
        demo_requests: Arc<AtomicUsize>,
        telemetry: Arc<StdMutex<Vec<Value>>>,
    }

    impl Mock {
        fn calls(&self) -> Vec<Recorded> {
            self.calls.lock().unwrap().clone()
        }

        fn telemetry_events(&self) -> Vec<Value> {
            self.telemetry
                .lock()
                .unwrap()
                .iter()
                .map(|report| report["event"].clone())
                .collect()
        }
    }

    async fn service(
        State(mock): State<Mock>,
        uri: Uri,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> (axum::http::StatusCode, Json<Value>) {
        let api_key = headers
            .get("x-api-key")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        mock.calls.lock().unwrap().push(Recorded {
            path: uri.path().to_string(),
            api_key: api_key.clone(),
            body,
        });

        let payment = (
            axum::http::StatusCode::PAYMENT_REQUIRED,
            Json(json!({ "accepts": [{ "maxAmountRequiredUSD": "0.10" }] })),
        );
        let ok = (axum::http::StatusCode::OK, Json(json!({ "ok": true })));

        match mock.mode {
            Mode::Ok => ok,
            Mode::Fail(status) => (
                axum::http::StatusCode::from_u16(status).unwrap(),
                Json(json!({ "error": "boom" })),
            ),
            Mode::RequireKey if api_key.is_some() => ok,
            Mode::RequireDemoKey if api_key.as_deref() == Some("demo-123") => ok,
            Mode::RequireKey | Mode::RequireDemoKey => payment,
        }
    }

    async fn demo_key(State(mock): State<Mock>, Json(body): Json<Value>) -> Json<Value> {
        assert_eq!(body["sdkType"], "rust-mcp");
        assert_eq!(body["installId"], "mcp-test");
        mock.demo_requests.fetch_add(1, Ordering::SeqCst);
        Json(json!({ "api_key": "demo-123" }))
    }

    async fn telemetry(State(mock): State<Mock>, Json(body): Json<Value>) -> Json<Value> {
        mock.telemetry.lock().unwrap().push(body);
        Json(json!({ "ok": true }))
    }

    async fn spawn_mock(mode: Mode) -> (String, Mock) {
        let mock = Mock {
            mode,
            calls: Arc::new(StdMutex::new(Vec::new())),
            demo_requests: Arc::new(AtomicUsize::new(0)),
            telemetry: Arc::new(StdMutex::new(Vec::new())),
        };
        let app = Router::new()
            .route("/x402/{*service}", post(service))
            .route("/api/sdk/demo-key", post(demo_key))
            .route("/api/sdk/telemetry", post(telemetry))
            .with_state(mock.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{}", addr), mock)
    }

    fn config(base_url: &str, api_key: Option<&str>, auto_demo_key: bool) -> Config {
        let mut config = Config::default();
        config.credentials.base_url = base_url.to_string();
        config.credentials.api_key = api_key.map(str::to_string);
        config.upstream.auto_demo_key = auto_demo_key;
        config.upstream.telemetry = false;
        config.upstream.timeout_secs = 5;
        config
    }

    fn client(base_url: &str, api_key: Option<&str>, auto_demo_key: bool) -> CoinRailzClient {
        let config = config(base_url, api_key, auto_demo_key);
        CoinRailzClient::with_install_id(&config, "mcp-test".to_string()).unwrap()
    }

    fn args(value: Value) -> JsonObject {
        value.as_object().cloned().unwrap_or_default()
    }

    #[tokio::test]
    async fn test_free_call_then_keyed_call() {
        let (base, mock) = spawn_mock(Mode::Ok).await;
        let client = client(&base, Some("sk-test"), false);

        client.call_tool("get_gas_prices", JsonObject::new()).await.unwrap();
        client.call_tool("get_gas_prices", JsonObject::new()).await.unwrap();

        let calls = mock.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].path, "/x402/gas-price-oracle");
        assert_eq!(calls[0].api_key, None);
        assert_eq!(calls[1].api_key.as_deref(), Some("sk-test"));
    }

    #[tokio::test]
    async fn test_second_free_call_without_key_is_authentication_error() {
        let (base, mock) = spawn_mock(Mode::RequireKey).await;
        let client = client(&base, None, false);

        // First call goes out without credentials and is refused.
        let first = client.call_tool("get_token_metadata", args(json!({ "token_address": "0xabc" }))).await;
        assert!(matches!(first, Err(ToolError::Authentication { .. })));

        let err = client
            .call_tool("get_token_metadata", args(json!({ "token_address": "0xabc" })))
            .await
            .unwrap_err();
        match err {
            ToolError::Authentication { service, price, message } => {
                assert_eq!(service, "token-metadata");
                assert_eq!(price, "0.10");
                assert!(message.contains("COINRAILZ_API_KEY"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(mock.calls().iter().all(|c| c.api_key.is_none()));
    }

    #[tokio::test]
    async fn test_unknown_tool_makes_no_request() {
        let (base, mock) = spawn_mock(Mode::Ok).await;
        let client = client(&base, Some("sk-test"), false);

        let err = client.call_tool("get_moon_price", JsonObject::new()).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidRequest(_)));
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_arguments_make_no_request() {
        let (base, mock) = spawn_mock(Mode::Ok).await;
        let client = client(&base, Some("sk-test"), false);

        // `token_address` is required
        let err = client.call_tool("get_token_price", JsonObject::new()).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidRequest(_)));
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn test_upstream_500() {
        let (base, _mock) = spawn_mock(Mode::Fail(500)).await;
        let client = client(&base, Some("sk-test"), false);

        let err = client
            .call_tool("get_token_price", args(json!({ "token_address": "0xeth" })))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert!(!err.is_retryable());
        assert!(matches!(err, ToolError::Upstream { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_base_url_override_keeps_paths() {
        let (base, mock) = spawn_mock(Mode::Ok).await;
        // Trailing slash is tolerated.
        let client = client(&format!("{}/", base), Some("sk-test"), false);

        client
            .call_tool("request_smart_contract_audit", args(json!({ "contract_address": "0x1" })))
            .await
            .unwrap();
        client.call_tool("ping_coinrailz", JsonObject::new()).await.unwrap();

        let calls = mock.calls();
        assert_eq!(calls[0].path, "/x402/service/smart-contract-audit");
        assert_eq!(calls[0].body["contractAddress"], "0x1");
        assert_eq!(calls[0].body["scope"], "full");
        assert_eq!(calls[1].path, "/x402/ping");
    }

    #[tokio::test]
    async fn test_connection_refused_is_retryable_transport_error() {
        // Bind then drop to get a port with nothing listening.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = client(&format!("http://{}", addr), Some("sk-test"), false);
        let err = client
            .call_tool("get_token_price", args(json!({ "token_address": "0xeth" })))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::Transport(_)));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_refused_free_call_retries_with_key() {
        let (base, mock) = spawn_mock(Mode::RequireKey).await;
        let client = client(&base, Some("sk-test"), false);

        let result = client.call_tool("get_gas_prices", JsonObject::new()).await.unwrap();
        assert_eq!(result, json!({ "ok": true }));

        let calls = mock.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].api_key, None);
        assert_eq!(calls[1].api_key.as_deref(), Some("sk-test"));
    }

    #[tokio::test]
    async fn test_demo_key_fetched_once_and_annotated() {
        let (base, mock) = spawn_mock(Mode::RequireDemoKey).await;
        let client = client(&base, None, true);

        let result = client
            .call_tool("get_token_price", args(json!({ "token_address": "0xeth" })))
            .await
            .unwrap();
        assert_eq!(result["ok"], true);
        assert!(result["_sdk_note"].as_str().unwrap().contains("demo key"));

        // The cached demo key is attached up front on the next call.
        let result = client
            .call_tool("get_token_price", args(json!({ "token_address": "0xeth" })))
            .await
            .unwrap();
        assert!(result.get("_sdk_note").is_none());

        assert_eq!(mock.demo_requests.load(Ordering::SeqCst), 1);
        let keys: Vec<_> = mock.calls().into_iter().map(|c| c.api_key).collect();
        assert_eq!(
            keys,
            vec![None, Some("demo-123".to_string()), Some("demo-123".to_string())]
        );
    }

    #[test]
    fn test_payment_price_falls_back_to_catalog() {
        let def = registry::lookup("get_trending_tokens").unwrap();
        let err = CoinRailzClient::payment_required(def, &Value::Null);
        assert!(matches!(err, ToolError::Authentication { ref price, .. } if price == "0.50"));
    }

    #[tokio::test]
    async fn test_non_json_body_returned_as_string() {
        let app = Router::new().route("/x402/ping", post(|| async { "pong" }));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let client = client(&format!("http://{}", addr), Some("sk-test"), false);
        let result = client.call_tool("ping_coinrailz", JsonObject::new()).await.unwrap();
        assert_eq!(result, Value::String("pong".to_string()));
    }

    #[tokio::test]
    async fn test_slow_upstream_times_out_as_retryable_transport_error() {
        let app = Router::new().route(
            "/x402/ping",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(json!({ "ok": true }))
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let mut config = config(&format!("http://{}", addr), Some("sk-test"), false);
        config.upstream.timeout_secs = 1;
        let client = CoinRailzClient::with_install_id(&config, "mcp-test".to_string()).unwrap();

        let started = std::time::Instant::now();
        let err = client.call_tool("ping_coinrailz", JsonObject::new()).await.unwrap_err();
        assert!(started.elapsed() < Duration::from_secs(4));
        assert!(matches!(err, ToolError::Transport(_)));
        assert!(err.is_retryable());
    }

    async fn wait_for_telemetry(mock: &Mock, count: usize) {
        for _ in 0..50 {
            if mock.telemetry.lock().unwrap().len() >= count {
                return;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    }

    #[tokio::test]
    async fn test_usage_reported_per_call_when_enabled() {
        let (base, mock) = spawn_mock(Mode::Ok).await;
        let mut config = config(&base, Some("sk-test"), false);
        config.upstream.telemetry = true;
        let client = CoinRailzClient::with_install_id(&config, "mcp-test".to_string()).unwrap();

        client.call_tool("ping_coinrailz", JsonObject::new()).await.unwrap();
        wait_for_telemetry(&mock, 1).await;

        assert_eq!(mock.telemetry_events(), vec![json!("usage")]);
        let report = mock.telemetry.lock().unwrap()[0].clone();
        assert_eq!(report["installId"], "mcp-test");
        assert_eq!(report["environment"]["hasApiKey"], true);
    }

    #[tokio::test]
    async fn test_no_telemetry_when_disabled() {
        let (base, mock) = spawn_mock(Mode::Ok).await;
        let client = client(&base, Some("sk-test"), false);

        client.call_tool("ping_coinrailz", JsonObject::new()).await.unwrap();
        client.report_install();
        tokio::time::sleep(Duration::from_millis(200)).await;

        assert!(mock.telemetry_events().is_empty());
        assert_eq!(mock.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_base_url_is_not_retryable() {
        let client = client("not a url", Some("sk-test"), false);
        let err = client.call_tool("ping_coinrailz", JsonObject::new()).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidRequest(_)));
        assert!(!err.is_retryable());
    }
}
