//! routing-client: Adapter around an external route-finding engine
//!
//! Route search, pool state, and calldata encoding all live in the engine.
//! This crate only shapes the request, maps the engine's answer into a
//! [`RouteResult`], and turns every failure into a [`RoutingError`] so the
//! caller never depends on the engine's error shapes.

pub mod http;
pub mod types;

use async_trait::async_trait;
use swap_core::{FixedPointAmount, TokenDescriptor};
use thiserror::Error;

pub use http::HttpRoutingClient;
pub use types::{MethodParameters, Percent, RouteResult, SwapOptions, TradeType};

/// Routing engine errors
#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("Routing request failed: {0}")]
    Transport(String),

    #[error("Routing engine returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Routing engine error {code}: {detail}")]
    Engine { code: String, detail: String },

    #[error("Failed to parse routing response: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for RoutingError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.without_url().to_string())
    }
}

/// Result type for routing operations
pub type Result<T> = std::result::Result<T, RoutingError>;

/// Best-effort route search.
///
/// `Ok(None)` means the engine searched and found nothing; errors are
/// reserved for failures to ask or to understand the answer.
#[async_trait]
pub trait RoutingClient: Send + Sync {
    async fn route(
        &self,
        amount: &FixedPointAmount,
        token_in: &TokenDescriptor,
        token_out: &TokenDescriptor,
        trade_type: TradeType,
        options: &SwapOptions,
    ) -> Result<Option<RouteResult>>;
}
