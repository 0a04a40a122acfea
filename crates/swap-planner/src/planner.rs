//! Swap orchestration
//!
//! Validates a request, resolves its tokens, converts the amount to fixed
//! point, asks the routing engine for a route, and assembles a plan. The
//! planner keeps no state between calls; concurrent identical requests each
//! reach the engine.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use eth_rpc_client::ChainProvider;
use routing_client::{Percent, RoutingClient, SwapOptions, TradeType};
use swap_core::constants::{DEADLINE_SECS, DEFAULT_SLIPPAGE_PERCENT, REQUIRED_SWAP_FIELDS};
use swap_core::{format_units, parse_units, Address, SwapError, TokenDescriptor, TokenRegistry};

use crate::state::{SwapPlan, SwapRequest};

/// Source of the current time, for deadline computation
pub trait Clock: Send + Sync {
    fn now_unix(&self) -> u64;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_unix(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default()
    }
}

/// Turns swap requests into executable swap plans
#[derive(Clone)]
pub struct SwapPlanner {
    registry: Arc<TokenRegistry>,
    router: Arc<dyn RoutingClient>,
    chain: Arc<dyn ChainProvider>,
    clock: Arc<dyn Clock>,
}

/// Request fields after presence checks
struct RequiredFields<'a> {
    token_in: &'a str,
    token_out: &'a str,
    amount: &'a str,
    recipient: &'a str,
}

impl SwapPlanner {
    pub fn new(
        registry: Arc<TokenRegistry>,
        router: Arc<dyn RoutingClient>,
        chain: Arc<dyn ChainProvider>,
    ) -> Self {
        Self {
            registry,
            router,
            chain,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the wall clock (tests, replay)
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn registry(&self) -> &TokenRegistry {
        &self.registry
    }

    /// Plan a swap end to end.
    ///
    /// Client-input problems map to the matching `SwapError` variant;
    /// routing and chain failures become `SwapError::Internal`.
    pub async fn plan_swap(&self, request: &SwapRequest) -> Result<SwapPlan, SwapError> {
        let fields = required_fields(request)?;

        let (token_in, token_out) = self.resolve_tokens(fields.token_in, fields.token_out)?;

        let amount_in = parse_units(fields.amount, token_in.decimals)?;
        if amount_in.is_zero() {
            return Err(SwapError::InvalidAmount {
                message: "amount must be greater than zero".to_string(),
            });
        }

        let slippage = check_slippage(request.slippage_percentage)?;
        let recipient = Address::parse(fields.recipient)?;

        let deadline = self.clock.now_unix() + DEADLINE_SECS;
        let options = SwapOptions {
            recipient,
            slippage_tolerance: Percent::from_percentage(slippage),
            deadline,
        };

        tracing::info!(
            token_in = %token_in.symbol,
            token_out = %token_out.symbol,
            amount_in = %amount_in,
            slippage,
            "Planning swap"
        );

        let route = self
            .router
            .route(&amount_in, token_in, token_out, TradeType::ExactInput, &options)
            .await
            .map_err(|e| {
                tracing::error!("Routing failed for {} -> {}: {}", token_in.symbol, token_out.symbol, e);
                SwapError::internal(e.to_string())
            })?;

        let Some(route) = route else {
            tracing::info!("No route found for {} -> {}", token_in.symbol, token_out.symbol);
            return Err(SwapError::NoRouteFound);
        };
        let Some(transaction) = route.method_parameters.clone() else {
            tracing::info!(
                "Route for {} -> {} has no executable transaction",
                token_in.symbol,
                token_out.symbol
            );
            return Err(SwapError::NoRouteFound);
        };

        let expected_output = format_units(&route.quote, token_out.decimals);

        let gas_price = self.chain.gas_price().await.map_err(|e| {
            tracing::error!("Failed to fetch gas price: {}", e);
            SwapError::internal(e.to_string())
        })?;

        tracing::info!(
            expected_output = %expected_output,
            hops = route.pool_addresses.len(),
            "Swap planned"
        );

        Ok(SwapPlan {
            token_in: token_in.clone(),
            token_out: token_out.clone(),
            amount_in,
            quote: route.quote,
            expected_output,
            transaction,
            gas_limit: route.estimated_gas_used,
            gas_price,
            path: route.token_path,
            pools: route.pool_addresses,
            deadline,
        })
    }

    fn resolve_tokens(
        &self,
        token_in: &str,
        token_out: &str,
    ) -> Result<(&TokenDescriptor, &TokenDescriptor), SwapError> {
        match (self.registry.lookup(token_in), self.registry.lookup(token_out)) {
            (Some(a), Some(b)) => Ok((a, b)),
            _ => {
                tracing::debug!(token_in, token_out, "Unknown token symbol");
                Err(SwapError::UnknownToken {
                    supported: self.registry.symbols(),
                })
            }
        }
    }
}

fn required_fields(request: &SwapRequest) -> Result<RequiredFields<'_>, SwapError> {
    fn present(field: &Option<String>) -> Option<&str> {
        field.as_deref().filter(|v| !v.is_empty())
    }

    match (
        present(&request.token_in_symbol),
        present(&request.token_out_symbol),
        present(&request.amount),
        present(&request.recipient_address),
    ) {
        (Some(token_in), Some(token_out), Some(amount), Some(recipient)) => Ok(RequiredFields {
            token_in,
            token_out,
            amount,
            recipient,
        }),
        _ => Err(SwapError::InvalidRequest {
            required: REQUIRED_SWAP_FIELDS.iter().map(|f| f.to_string()).collect(),
        }),
    }
}

/// Slippage is a percent value out of 100, within [0, 100]
fn check_slippage(slippage: Option<f64>) -> Result<f64, SwapError> {
    let value = slippage.unwrap_or(DEFAULT_SLIPPAGE_PERCENT);
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        return Err(SwapError::InvalidSlippage {
            message: format!("must be between 0 and 100, got {}", value),
        });
    }
    Ok(value)
}
