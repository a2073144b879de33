//! Server info resource definition.

use super::ResourceDefinition;
use crate::domains::resources::service::ResourceContent;

/// Server information resource (dynamic).
pub struct ServerInfoResource;

impl ResourceDefinition for ServerInfoResource {
    const URI: &'static str = "coinrailz://server/info";
    const NAME: &'static str = "Server Information";
    const DESCRIPTION: &'static str =
        "Server name, version, upstream base URL, credential status and transport";
    const MIME_TYPE: &'static str = "application/json";

    fn content() -> ResourceContent {
        ResourceContent::ServerInfo
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_info_metadata() {
        assert_eq!(ServerInfoResource::URI, "coinrailz://server/info");
        assert_eq!(ServerInfoResource::MIME_TYPE, "application/json");
    }
}
