//! Data Transfer Objects for API requests and responses

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use swap_core::{SwapError, TokenDescriptor};
use swap_planner::{SwapPlan, SwapRequest};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Number of tokens in the registry
    pub tokens: usize,
}

impl HealthResponse {
    pub fn new(tokens: usize) -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            tokens,
        }
    }
}

/// POST /swap request body.
///
/// Fields stay untyped JSON so that presence follows loose truthiness
/// (`null`, `false`, `0` and `""` are absent) and a value of the wrong type
/// fails the same check a well-typed bad value would.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapRequestBody {
    pub token_in_symbol: Option<Value>,
    pub token_out_symbol: Option<Value>,
    /// Human-readable amount of the input token, number or string
    pub amount: Option<Value>,
    /// Percent out of 100 (0.5 = half a percent)
    pub slippage_percentage: Option<Value>,
    pub recipient_address: Option<Value>,
}

impl SwapRequestBody {
    /// Convert to a planner request; only a non-numeric slippage fails here
    pub fn to_request(&self) -> Result<SwapRequest, SwapError> {
        Ok(SwapRequest {
            token_in_symbol: truthy_text(&self.token_in_symbol),
            token_out_symbol: truthy_text(&self.token_out_symbol),
            amount: truthy_text(&self.amount),
            slippage_percentage: slippage(self.slippage_percentage.as_ref())?,
            recipient_address: truthy_text(&self.recipient_address),
        })
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn truthy_text(field: &Option<Value>) -> Option<String> {
    field.as_ref().filter(|v| is_truthy(v)).map(value_text)
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => number_text(n),
        other => other.to_string(),
    }
}

/// Plain decimal, never exponent form (integers past u64 arrive as f64)
fn number_text(n: &Number) -> String {
    if let Some(u) = n.as_u64() {
        u.to_string()
    } else if let Some(i) = n.as_i64() {
        i.to_string()
    } else {
        n.as_f64()
            .map(|f| f.to_string())
            .unwrap_or_else(|| n.to_string())
    }
}

fn slippage(value: Option<&Value>) -> Result<Option<f64>, SwapError> {
    let invalid = |raw: String| SwapError::InvalidSlippage {
        message: format!("not a number: {}", raw),
    };

    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n.as_f64().map(Some).ok_or_else(|| invalid(n.to_string())),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| invalid(format!("{:?}", s))),
        Some(other) => Err(invalid(other.to_string())),
    }
}

/// Swap summary echoed back to the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapSummaryDto {
    pub token_in: String,
    pub token_out: String,
    /// The amount exactly as the caller sent it
    pub amount_in: Value,
    /// Quoted output in the output token's decimal form
    pub expected_output: String,
}

/// Transaction the caller signs and submits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDto {
    pub to: String,
    pub data: String,
    pub value: String,
    pub gas_limit: String,
    /// Wei, base 10
    pub gas_price: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteDto {
    pub path: Vec<String>,
    pub pools: Vec<String>,
}

/// POST /swap response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapResponse {
    pub swap: SwapSummaryDto,
    pub transaction: TransactionDto,
    pub route: RouteDto,
}

impl SwapResponse {
    pub fn from_plan(plan: SwapPlan, amount_in: Value) -> Self {
        Self {
            swap: SwapSummaryDto {
                token_in: plan.token_in.symbol,
                token_out: plan.token_out.symbol,
                amount_in,
                expected_output: plan.expected_output,
            },
            transaction: TransactionDto {
                to: plan.transaction.to,
                data: plan.transaction.calldata,
                value: plan.transaction.value,
                gas_limit: plan.gas_limit.to_string(),
                gas_price: plan.gas_price.to_string(),
            },
            route: RouteDto {
                path: plan.path,
                pools: plan.pools,
            },
        }
    }
}

/// Supported token entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenDto {
    pub symbol: String,
    pub address: String,
    pub decimals: u8,
}

impl From<&TokenDescriptor> for TokenDto {
    fn from(token: &TokenDescriptor) -> Self {
        Self {
            symbol: token.symbol.clone(),
            address: token.address.to_string(),
            decimals: token.decimals,
        }
    }
}

/// GET /tokens response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokensResponse {
    pub tokens: Vec<TokenDto>,
    pub count: usize,
}

/// API error body: `error` plus whichever detail field fits the failure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supported_tokens: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiError {
    pub fn bad_request(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
            ..Self::default()
        }
    }
}

impl From<&SwapError> for ApiError {
    fn from(err: &SwapError) -> Self {
        let error = err.title().to_string();
        match err {
            SwapError::InvalidRequest { required } => Self {
                error,
                required: Some(required.clone()),
                ..Self::default()
            },
            SwapError::UnknownToken { supported } => Self {
                error,
                supported_tokens: Some(supported.clone()),
                ..Self::default()
            },
            SwapError::NoRouteFound => Self::bad_request(
                error,
                "Unable to find a valid trading route for the specified tokens",
            ),
            SwapError::InvalidAmount { message } | SwapError::InvalidSlippage { message } => {
                Self::bad_request(error, message.clone())
            }
            SwapError::InvalidAddress { .. } => Self::bad_request(error, err.to_string()),
            SwapError::Internal { message } => Self {
                error,
                message: Some(message.clone()),
                ..Self::default()
            },
        }
    }
}
