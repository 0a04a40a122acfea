//! Static token registry
//!
//! Maps short symbols to on-chain address and decimal precision. Built once
//! at startup and shared read-only between requests.

use serde::{Deserialize, Serialize};

use crate::constants::MAINNET_CHAIN_ID;
use crate::{Address, ChainId, ConfigError};

/// A supported token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenDescriptor {
    pub symbol: String,
    pub address: Address,
    pub decimals: u8,
}

impl TokenDescriptor {
    pub fn new(symbol: impl Into<String>, address: Address, decimals: u8) -> Self {
        Self {
            symbol: symbol.into(),
            address,
            decimals,
        }
    }
}

/// Reference configuration for Ethereum mainnet: (symbol, address, decimals)
const MAINNET_TOKENS: [(&str, &str, u8); 9] = [
    // Native
    ("WETH", "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2", 18),
    // Stablecoins
    ("USDC", "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48", 6),
    ("USDT", "0xdAC17F958D2ee523a2206206994597C13D831ec7", 6),
    ("DAI", "0x6B175474E89094C44Da98b954EedeAC495271d0F", 18),
    // DeFi
    ("UNI", "0x1f9840a85d5aF5bf1D1762F925BDADdC4201F984", 18),
    ("LINK", "0x514910771AF9Ca656af840dff83E8264EcF986CA", 18),
    ("AAVE", "0x7Fc66500c84A76Ad7e9c93437bFc5Ac33E2DDaE9", 18),
    // Meme
    ("SHIB", "0x95aD61b0a150d79219dCF64E1E6Cc01f0B64C4cE", 18),
    // Gaming
    ("AXS", "0xBB0E17EF65F82Ab018d8EDd776e8DD940327B28b", 18),
];

/// Immutable symbol -> token lookup, in registration order
#[derive(Debug, Clone)]
pub struct TokenRegistry {
    chain_id: ChainId,
    tokens: Vec<TokenDescriptor>,
}

impl TokenRegistry {
    /// Build a registry, rejecting duplicate symbols
    pub fn new(chain_id: ChainId, tokens: Vec<TokenDescriptor>) -> Result<Self, ConfigError> {
        for (i, token) in tokens.iter().enumerate() {
            if tokens[..i].iter().any(|t| t.symbol == token.symbol) {
                return Err(ConfigError::DuplicateSymbol {
                    symbol: token.symbol.clone(),
                });
            }
        }

        Ok(Self { chain_id, tokens })
    }

    /// The nine-token Ethereum mainnet registry
    pub fn mainnet() -> Result<Self, ConfigError> {
        let tokens = MAINNET_TOKENS
            .iter()
            .map(|(symbol, address, decimals)| {
                let address =
                    Address::parse(address).map_err(|_| ConfigError::InvalidTokenAddress {
                        symbol: symbol.to_string(),
                        address: address.to_string(),
                    })?;
                Ok(TokenDescriptor::new(*symbol, address, *decimals))
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Self::new(MAINNET_CHAIN_ID, tokens)
    }

    pub fn chain_id(&self) -> ChainId {
        self.chain_id
    }

    /// Exact, case-sensitive symbol lookup
    pub fn lookup(&self, symbol: &str) -> Option<&TokenDescriptor> {
        self.tokens.iter().find(|t| t.symbol == symbol)
    }

    pub fn list_all(&self) -> &[TokenDescriptor] {
        &self.tokens
    }

    /// All supported symbols, in registration order
    pub fn symbols(&self) -> Vec<String> {
        self.tokens.iter().map(|t| t.symbol.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
