//! Tool catalog resource definition.

use super::ResourceDefinition;
use crate::domains::resources::service::ResourceContent;

/// Every Coin Railz tool with its service path and price.
pub struct CatalogResource;

impl ResourceDefinition for CatalogResource {
    const URI: &'static str = "coinrailz://catalog";
    const NAME: &'static str = "Coin Railz Service Catalog";
    const DESCRIPTION: &'static str =
        "All available Coin Railz services with category, USD price and free-first-call flag";
    const MIME_TYPE: &'static str = "application/json";

    fn content() -> ResourceContent {
        ResourceContent::Catalog
    }
}
