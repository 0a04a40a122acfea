//! eth-rpc-client: Minimal Ethereum JSON-RPC client
//!
//! The swap gateway only needs the current network gas price, so this crate
//! exposes a narrow [`ChainProvider`] trait and a `reqwest`-backed
//! implementation that speaks JSON-RPC 2.0 to any standard endpoint
//! (Alchemy, Infura, a local node).

mod jsonrpc;

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use swap_core::{FixedPointAmount, RpcConfig};
use thiserror::Error;

/// Chain RPC errors
#[derive(Debug, Error)]
pub enum RpcError {
    #[error("RPC request failed: {0}")]
    Transport(String),

    #[error("RPC endpoint returned HTTP {status}")]
    Http { status: u16 },

    #[error("RPC error {code}: {message}")]
    Node { code: i64, message: String },

    #[error("RPC response has no result")]
    MissingResult,

    #[error("Failed to parse RPC response: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for RpcError {
    fn from(err: reqwest::Error) -> Self {
        // The endpoint URL usually embeds the API key
        Self::Transport(err.without_url().to_string())
    }
}

/// Result type for RPC operations
pub type Result<T> = std::result::Result<T, RpcError>;

/// Read-only view of the chain used to annotate built transactions
#[async_trait]
pub trait ChainProvider: Send + Sync {
    /// Current gas price in wei
    async fn gas_price(&self) -> Result<FixedPointAmount>;
}

/// JSON-RPC backed chain provider
pub struct JsonRpcProvider {
    http: reqwest::Client,
    url: String,
    next_id: AtomicU64,
}

impl JsonRpcProvider {
    pub fn new(config: &RpcConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("swap-gateway/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            url: config.url.clone(),
            next_id: AtomicU64::new(1),
        })
    }

    /// Issue a single JSON-RPC call and return its `result` member
    pub async fn call(&self, method: &str, params: Value) -> Result<Value> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = jsonrpc::Request::new(id, method, params);

        tracing::debug!(method, id, "Sending JSON-RPC request");

        let response = self.http.post(&self.url).json(&request).send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(method, status = status.as_u16(), "JSON-RPC call rejected");
            return Err(RpcError::Http {
                status: status.as_u16(),
            });
        }

        let envelope: jsonrpc::Response = response
            .json()
            .await
            .map_err(|e| RpcError::Parse(e.without_url().to_string()))?;

        envelope.into_result()
    }

    /// Chain id reported by the endpoint (`eth_chainId`)
    pub async fn chain_id(&self) -> Result<u64> {
        let value = self.call("eth_chainId", json!([])).await?;
        let quantity = parse_quantity(&value)?;
        u64::try_from(quantity.as_biguint())
            .map_err(|_| RpcError::Parse(format!("chain id out of range: {}", quantity)))
    }
}

#[async_trait]
impl ChainProvider for JsonRpcProvider {
    async fn gas_price(&self) -> Result<FixedPointAmount> {
        let value = self.call("eth_gasPrice", json!([])).await?;
        let price = parse_quantity(&value)?;
        tracing::debug!(gas_price = %price, "Fetched gas price");
        Ok(price)
    }
}

fn parse_quantity(value: &Value) -> Result<FixedPointAmount> {
    let raw = value
        .as_str()
        .ok_or_else(|| RpcError::Parse(format!("expected hex quantity, got {}", value)))?;
    FixedPointAmount::from_hex_quantity(raw).map_err(|e| RpcError::Parse(e.to_string()))
}
