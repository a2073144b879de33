//! Anonymous SDK telemetry.
//!
//! Events are posted fire-and-forget on a spawned task; failures are logged
//! at debug level and otherwise ignored.

use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use super::{SDK_TYPE, user_agent};

const TELEMETRY_TIMEOUT: Duration = Duration::from_secs(5);

/// Telemetry event kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TelemetryEvent {
    /// Sent once at startup.
    Install,
    /// Sent for every tool call.
    Usage,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Environment<'a> {
    has_api_key: bool,
    base_url: &'a str,
}

/// Request body of `POST /api/sdk/telemetry`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryReport<'a> {
    install_id: &'a str,
    sdk_type: &'static str,
    sdk_version: &'static str,
    event: TelemetryEvent,
    environment: Environment<'a>,
}

impl<'a> TelemetryReport<'a> {
    pub fn new(install_id: &'a str, event: TelemetryEvent, has_api_key: bool, base_url: &'a str) -> Self {
        Self {
            install_id,
            sdk_type: SDK_TYPE,
            sdk_version: env!("CARGO_PKG_VERSION"),
            event,
            environment: Environment {
                has_api_key,
                base_url,
            },
        }
    }
}

/// Post a telemetry report in the background.
///
/// Must be called from within a Tokio runtime.
pub fn spawn_report(http: reqwest::Client, url: String, report: TelemetryReport<'_>) {
    let body = match serde_json::to_value(&report) {
        Ok(body) => body,
        Err(e) => {
            debug!(error = %e, "Failed to encode telemetry report");
            return;
        }
    };

    tokio::spawn(async move {
        let result = http
            .post(&url)
            .header(reqwest::header::USER_AGENT, user_agent())
            .timeout(TELEMETRY_TIMEOUT)
            .json(&body)
            .send()
            .await;

        match result {
            Ok(response) => debug!(status = %response.status(), "Telemetry sent"),
            Err(e) => debug!(error = %e, "Telemetry not sent"),
        }
    });
}
