//! Routing request and result types

use serde::{Deserialize, Serialize};
use swap_core::{Address, FixedPointAmount};

/// Which side of the trade is fixed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeType {
    /// Spend exactly the input amount
    ExactInput,
    /// Receive exactly the output amount
    ExactOutput,
}

impl TradeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExactInput => "exactIn",
            Self::ExactOutput => "exactOut",
        }
    }
}

/// A ratio `numerator / denominator`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Percent {
    pub numerator: f64,
    pub denominator: f64,
}

impl Percent {
    pub fn new(numerator: f64, denominator: f64) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// A value already expressed in percent: `0.5` means half of one percent
    pub fn from_percentage(percent: f64) -> Self {
        Self::new(percent, 100.0)
    }

    pub fn as_fraction(&self) -> f64 {
        self.numerator / self.denominator
    }

    pub fn as_percentage(&self) -> f64 {
        self.numerator * (100.0 / self.denominator)
    }

    /// Percent value as sent on the wire (`"0.5"`)
    pub fn to_percent_string(&self) -> String {
        format!("{}", self.as_percentage())
    }
}

/// Execution constraints for the built transaction
#[derive(Debug, Clone, PartialEq)]
pub struct SwapOptions {
    pub recipient: Address,
    pub slippage_tolerance: Percent,
    /// Unix timestamp after which the transaction reverts
    pub deadline: u64,
}

/// Executable call produced by the routing engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodParameters {
    /// Router contract to call
    pub to: String,
    /// ABI-encoded call data (hex)
    pub calldata: String,
    /// Native value to attach (hex quantity)
    pub value: String,
}

/// Best route returned by the engine
#[derive(Debug, Clone, PartialEq)]
pub struct RouteResult {
    /// Quoted output amount in the output token's smallest unit
    pub quote: FixedPointAmount,
    /// Missing when the engine could quote but not build a transaction
    pub method_parameters: Option<MethodParameters>,
    pub estimated_gas_used: FixedPointAmount,
    /// Token symbols along the route, input first
    pub token_path: Vec<String>,
    /// Pool addresses traversed, in order
    pub pool_addresses: Vec<String>,
}
