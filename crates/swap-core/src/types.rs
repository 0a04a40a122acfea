//! Core type definitions for the swap gateway

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::SwapError;

/// EVM account or contract address (20 bytes, `0x`-prefixed hex)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// Byte length of an EVM address
    pub const LEN: usize = 20;

    /// Parse and validate a `0x`-prefixed 20-byte hex address.
    ///
    /// The original casing is kept so checksummed addresses round-trip
    /// unchanged to the routing engine.
    pub fn parse(address: &str) -> Result<Self, SwapError> {
        let invalid = || SwapError::InvalidAddress {
            address: address.to_string(),
        };

        let digits = address
            .strip_prefix("0x")
            .or_else(|| address.strip_prefix("0X"))
            .ok_or_else(invalid)?;

        let bytes = hex::decode(digits).map_err(|_| invalid())?;
        if bytes.len() != Self::LEN {
            return Err(invalid());
        }

        Ok(Self(address.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercase form, used for comparisons against engine output
    pub fn to_lowercase(&self) -> String {
        self.0.to_ascii_lowercase()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// EVM chain identifier
pub type ChainId = u64;

/// Constants
pub mod constants {
    use super::ChainId;

    /// Ethereum mainnet
    pub const MAINNET_CHAIN_ID: ChainId = 1;

    /// Slippage applied when the caller does not send one (percent, out of 100)
    pub const DEFAULT_SLIPPAGE_PERCENT: f64 = 0.5;

    /// Seconds from now until a built swap transaction expires (30 minutes)
    pub const DEADLINE_SECS: u64 = 1800;

    /// Names of the fields every swap request must carry
    pub const REQUIRED_SWAP_FIELDS: [&str; 4] =
        ["tokenInSymbol", "tokenOutSymbol", "amount", "recipientAddress"];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_accepts_checksummed() {
        let addr = Address::parse("0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2").unwrap();
        assert_eq!(addr.as_str(), "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2");
        assert_eq!(
            addr.to_lowercase(),
            "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2"
        );
    }

    #[test]
    fn test_address_rejects_malformed() {
        for bad in [
            "",
            "0x",
            "C02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2",
            "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc",
            "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc200",
            "0xZZ2aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2",
        ] {
            let err = Address::parse(bad).unwrap_err();
            assert_eq!(err.error_code(), "invalid_address", "input {:?}", bad);
        }
    }
}
