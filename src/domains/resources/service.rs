//! Resource service implementation.
//!
//! The ResourceService manages resource discovery and access.
//! Resources are defined in `definitions/` and registered via `registry.rs`.
//! Adding a new resource does NOT require modifying this file.

use rmcp::model::{ReadResourceResult, Resource, ResourceContents};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::info;

use super::error::ResourceError;
use super::registry::get_all_resources;
use crate::core::config::Config;
use crate::domains::tools::registry;

/// Service for managing and accessing resources.
pub struct ResourceService {
    /// Server configuration, reported by the server info resource.
    config: Arc<Config>,

    /// Registered resources, in listing order.
    resources: Vec<ResourceEntry>,
}

/// An entry in the resource registry.
#[derive(Debug, Clone)]
pub struct ResourceEntry {
    /// The resource metadata.
    pub resource: Resource,

    /// The content provider for this resource.
    pub content: ResourceContent,
}

/// Content kinds, rendered on every read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceContent {
    /// The tool catalog.
    Catalog,

    /// Server and upstream settings.
    ServerInfo,
}

impl ResourceService {
    /// Create a new ResourceService with the given configuration.
    pub fn new(config: Arc<Config>) -> Self {
        info!("Initializing ResourceService");
        Self {
            config,
            resources: get_all_resources(),
        }
    }

    /// List all available resources.
    pub async fn list_resources(&self) -> Vec<Resource> {
        self.resources
            .iter()
            .map(|entry| entry.resource.clone())
            .collect()
    }

    /// Read a resource by URI.
    pub async fn read_resource(&self, uri: &str) -> Result<ReadResourceResult, ResourceError> {
        let entry = self
            .resources
            .iter()
            .find(|entry| entry.resource.raw.uri == uri)
            .ok_or_else(|| ResourceError::not_found(uri))?;

        let body = match entry.content {
            ResourceContent::Catalog => self.catalog(),
            ResourceContent::ServerInfo => self.server_info(),
        };
        let text = serde_json::to_string_pretty(&body)
            .map_err(|e| ResourceError::internal(e.to_string()))?;

        Ok(ReadResourceResult {
            contents: vec![ResourceContents::text(text, uri)],
        })
    }

    fn catalog(&self) -> Value {
        let tools: Vec<Value> = registry::all().iter().map(|def| def.summary()).collect();
        json!({
            "count": tools.len(),
            "tools": tools,
        })
    }

    fn server_info(&self) -> Value {
        json!({
            "name": self.config.server.name,
            "version": self.config.server.version,
            "base_url": self.config.credentials.base(),
            "has_api_key": self.config.credentials.has_api_key(),
            "transport": self.config.transport.description(),
            "free_first_call_services": registry::free_first_call_services().collect::<Vec<_>>(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> ResourceService {
        let mut config = Config::default();
        config.credentials.api_key = Some("sk-secret".to_string());
        ResourceService::new(Arc::new(config))
    }

    fn text(result: &ReadResourceResult) -> &str {
        match &result.contents[0] {
            ResourceContents::TextResourceContents { text, .. } => text,
            other => panic!("unexpected contents: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_resource_service_creation() {
        let resources = service().list_resources().await;
        assert_eq!(resources.len(), 2);
    }

    #[tokio::test]
    async fn test_read_catalog() {
        let result = service().read_resource("coinrailz://catalog").await.unwrap();
        let body: Value = serde_json::from_str(text(&result)).unwrap();
        assert_eq!(body["count"], 41);
        assert_eq!(body["tools"][0]["name"], "ping_coinrailz");
        assert_eq!(body["tools"][0]["price_usd"], "0.25");
    }

    #[tokio::test]
    async fn test_server_info_hides_key() {
        let result = service()
            .read_resource("coinrailz://server/info")
            .await
            .unwrap();
        let raw = text(&result);
        assert!(!raw.contains("sk-secret"));

        let body: Value = serde_json::from_str(raw).unwrap();
        assert_eq!(body["has_api_key"], true);
        assert_eq!(body["base_url"], "https://coinrailz.com");
    }

    #[tokio::test]
    async fn test_read_nonexistent_resource() {
        let result = service().read_resource("coinrailz://nope").await;
        assert!(matches!(result, Err(ResourceError::NotFound(_))));
    }
}
