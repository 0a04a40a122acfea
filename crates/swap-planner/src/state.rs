//! Swap planning input and output types

use routing_client::MethodParameters;
use swap_core::{FixedPointAmount, TokenDescriptor};

/// A requested swap as received from the caller.
///
/// Every field is optional here; presence is checked by the planner so
/// that all missing-field cases produce the same structured error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SwapRequest {
    pub token_in_symbol: Option<String>,
    pub token_out_symbol: Option<String>,
    /// Human decimal amount of the input token (e.g. "1.5")
    pub amount: Option<String>,
    /// Percent out of 100; defaults to 0.5
    pub slippage_percentage: Option<f64>,
    pub recipient_address: Option<String>,
}

/// A planned swap: resolved tokens, quoted output, and executable call
#[derive(Debug, Clone, PartialEq)]
pub struct SwapPlan {
    pub token_in: TokenDescriptor,
    pub token_out: TokenDescriptor,
    /// Input amount in the input token's smallest unit
    pub amount_in: FixedPointAmount,
    /// Quoted output in the output token's smallest unit
    pub quote: FixedPointAmount,
    /// Quoted output formatted with the output token's decimals
    pub expected_output: String,
    pub transaction: MethodParameters,
    pub gas_limit: FixedPointAmount,
    /// Gas price in wei at planning time
    pub gas_price: FixedPointAmount,
    /// Token symbols along the route
    pub path: Vec<String>,
    /// Pool addresses along the route
    pub pools: Vec<String>,
    /// Unix timestamp the transaction expires at
    pub deadline: u64,
}
