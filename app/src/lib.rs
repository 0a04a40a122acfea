//! swap-gateway application
//!
//! Loads configuration, wires the routing engine and chain RPC adapters into
//! the swap planner, and serves the HTTP API.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{bail, Context};
use eth_rpc_client::JsonRpcProvider;
use routing_client::HttpRoutingClient;
use swap_api::AppState;
use swap_core::{AppConfig, TokenRegistry};
use swap_planner::SwapPlanner;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "swap_gateway=debug,info";

/// Install the global tracing subscriber (`RUST_LOG` overrides the default)
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Build the shared API state from configuration
pub async fn build_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let registry = TokenRegistry::mainnet().context("Failed to build token registry")?;
    if config.chain_id != registry.chain_id() {
        bail!(
            "No token registry for chain {} (available: {})",
            config.chain_id,
            registry.chain_id()
        );
    }

    let chain = Arc::new(JsonRpcProvider::new(&config.rpc).context("Failed to create RPC client")?);
    match chain.chain_id().await {
        Ok(id) if id == config.chain_id => tracing::info!(chain_id = id, "RPC endpoint reachable"),
        Ok(id) => tracing::warn!(
            "RPC endpoint reports chain {} but gateway is configured for {}",
            id,
            config.chain_id
        ),
        Err(e) => tracing::warn!("RPC endpoint not reachable at startup: {}", e),
    }

    let router = HttpRoutingClient::new(&config.routing, registry.chain_id())
        .context("Failed to create routing client")?;
    tracing::info!(base_url = %config.routing.base_url, "Routing engine configured");

    let planner = SwapPlanner::new(Arc::new(registry), Arc::new(router), chain);
    Ok(AppState::new(planner))
}

/// Run the gateway until shutdown
pub async fn run() -> anyhow::Result<()> {
    let _ = dotenv::dotenv();
    init_tracing();

    tracing::info!("Starting swap gateway v{}", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::from_env().context("Invalid configuration")?;
    let addr: SocketAddr = format!("{}:{}", config.bind_address, config.api_port)
        .parse()
        .with_context(|| {
            format!(
                "Invalid listen address {}:{}",
                config.bind_address, config.api_port
            )
        })?;

    let state = build_state(&config).await?;
    tracing::info!(tokens = state.registry().len(), "Token registry loaded");

    swap_api::start_server(state, addr)
        .await
        .context("API server failed")
}
