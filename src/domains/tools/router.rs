//! Tool Router - builds the rmcp ToolRouter from the registry.
//!
//! One dynamic route per catalog entry; every route delegates to the shared
//! [`call_tool`](super::handlers::call_tool) dispatch.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::handler::server::tool::{ToolCallContext, ToolRoute, ToolRouter};

use super::handlers::call_tool;
use super::registry::{self, ToolDefinition};
use crate::upstream::CoinRailzClient;

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(client: Arc<CoinRailzClient>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    registry::all()
        .iter()
        .fold(ToolRouter::new(), |router, def| {
            router.with_route(create_route(def, client.clone()))
        })
}

/// Create the route for a single catalog entry.
fn create_route<S>(def: &'static ToolDefinition, client: Arc<CoinRailzClient>) -> ToolRoute<S>
where
    S: Send + Sync + 'static,
{
    ToolRoute::new_dyn(def.to_tool(), move |ctx: ToolCallContext<'_, S>| {
        let args = ctx.arguments.clone();
        let client = client.clone();
        async move { call_tool(&client, def.name, args).await }.boxed()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Config;

    struct TestServer {}

    fn test_client() -> Arc<CoinRailzClient> {
        let mut config = Config::default();
        config.upstream.telemetry = false;
        Arc::new(CoinRailzClient::with_install_id(&config, "mcp-test".to_string()).unwrap())
    }

    #[test]
    fn test_build_router() {
        let router: ToolRouter<TestServer> = build_tool_router(test_client());
        let tools = router.list_all();
        assert_eq!(tools.len(), 41);

        let names: Vec<_> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert!(names.contains(&"ping_coinrailz"));
        assert!(names.contains(&"get_gas_prices"));
        assert!(names.contains(&"request_payment_processing"));
        assert!(names.contains(&"get_forex_sentiment"));
    }

    #[test]
    fn test_registry_matches_router() {
        let router: ToolRouter<TestServer> = build_tool_router(test_client());
        let router_tools = router.list_all();
        let router_names: Vec<_> = router_tools.iter().map(|t| t.name.as_ref()).collect();

        assert_eq!(registry::all().len(), router_names.len());
        for def in registry::all() {
            assert!(router_names.contains(&def.name), "missing route for {}", def.name);
        }
    }
}
