//! Error types for the swap gateway

use thiserror::Error;

use crate::units::UnitsError;

/// Failures of a single swap planning call.
///
/// Every variant except `Internal` describes a problem with the caller's
/// input and carries enough detail for the caller to correct it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SwapError {
    #[error("Missing required parameters: {}", required.join(", "))]
    InvalidRequest { required: Vec<String> },

    #[error("Invalid token symbol (supported: {})", supported.join(", "))]
    UnknownToken { supported: Vec<String> },

    #[error("Invalid amount: {message}")]
    InvalidAmount { message: String },

    #[error("Invalid slippage: {message}")]
    InvalidSlippage { message: String },

    #[error("Invalid recipient address: {address}")]
    InvalidAddress { address: String },

    #[error("No route found")]
    NoRouteFound,

    #[error("{message}")]
    Internal { message: String },
}

impl SwapError {
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get a stable machine-readable error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidRequest { .. } => "invalid_request",
            Self::UnknownToken { .. } => "unknown_token",
            Self::InvalidAmount { .. } => "invalid_amount",
            Self::InvalidSlippage { .. } => "invalid_slippage",
            Self::InvalidAddress { .. } => "invalid_address",
            Self::NoRouteFound => "no_route_found",
            Self::Internal { .. } => "internal_error",
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Internal { .. } => 500,
            _ => 400,
        }
    }

    /// Human-readable headline used as the `error` field of HTTP responses
    pub fn title(&self) -> &'static str {
        match self {
            Self::InvalidRequest { .. } => "Missing required parameters",
            Self::UnknownToken { .. } => "Invalid token symbol",
            Self::InvalidAmount { .. } => "Invalid amount",
            Self::InvalidSlippage { .. } => "Invalid slippage percentage",
            Self::InvalidAddress { .. } => "Invalid recipient address",
            Self::NoRouteFound => "No route found",
            Self::Internal { .. } => "Failed to process swap",
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}

impl From<UnitsError> for SwapError {
    fn from(err: UnitsError) -> Self {
        Self::InvalidAmount {
            message: err.to_string(),
        }
    }
}

/// Startup configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {name}")]
    MissingEnv { name: &'static str },

    #[error("Invalid value for {name}: {message}")]
    InvalidValue { name: &'static str, message: String },

    #[error("Duplicate token symbol in registry: {symbol}")]
    DuplicateSymbol { symbol: String },

    #[error("Invalid token address for {symbol}: {address}")]
    InvalidTokenAddress { symbol: String, address: String },
}

/// Result type alias for swap planning
pub type Result<T> = std::result::Result<T, SwapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swap_error_codes() {
        let err = SwapError::InvalidAmount {
            message: "test".into(),
        };
        assert_eq!(err.error_code(), "invalid_amount");
        assert_eq!(err.status_code(), 400);
        assert!(err.is_client_error());

        let err = SwapError::internal("rpc down");
        assert_eq!(err.error_code(), "internal_error");
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.to_string(), "rpc down");
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_titles_match_wire_contract() {
        assert_eq!(
            SwapError::UnknownToken { supported: vec![] }.title(),
            "Invalid token symbol"
        );
        assert_eq!(SwapError::NoRouteFound.title(), "No route found");
        assert_eq!(
            SwapError::InvalidRequest { required: vec![] }.title(),
            "Missing required parameters"
        );
    }

    #[test]
    fn test_units_error_becomes_invalid_amount() {
        let err: SwapError = UnitsError::Negative.into();
        assert_eq!(err.error_code(), "invalid_amount");
    }
}
