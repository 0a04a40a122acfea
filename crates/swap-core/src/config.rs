//! Configuration types for the swap gateway

use serde::{Deserialize, Serialize};

use crate::constants::MAINNET_CHAIN_ID;
use crate::{ChainId, ConfigError};

/// Chain RPC connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcConfig {
    /// JSON-RPC endpoint URL (e.g., "https://eth-mainnet.g.alchemy.com/v2/<key>")
    pub url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl RpcConfig {
    /// Alchemy mainnet endpoint for an API key
    pub fn alchemy_mainnet(api_key: &str) -> Self {
        Self {
            url: format!("{}{}", ALCHEMY_MAINNET_URL, api_key),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Routing engine connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Base URL of the quote API; `/quote` is appended
    #[serde(default = "default_routing_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            base_url: default_routing_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Chain RPC settings
    pub rpc: RpcConfig,

    /// Routing engine settings
    #[serde(default)]
    pub routing: RoutingConfig,

    /// Chain the registry and routing requests target
    #[serde(default = "default_chain_id")]
    pub chain_id: ChainId,

    /// API server port
    #[serde(default = "default_api_port")]
    pub api_port: u16,

    /// Interface the API server binds to
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

const ALCHEMY_MAINNET_URL: &str = "https://eth-mainnet.g.alchemy.com/v2/";

fn default_timeout_secs() -> u64 {
    30
}

fn default_routing_url() -> String {
    "https://api.uniswap.org/v1".to_string()
}

fn default_chain_id() -> ChainId {
    MAINNET_CHAIN_ID
}

fn default_api_port() -> u16 {
    3000
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

impl AppConfig {
    /// Build configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// `RPC_URL` wins over `ALCHEMY_API_KEY`; one of them is required.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let mut rpc = match (get("RPC_URL"), get("ALCHEMY_API_KEY")) {
            (Some(url), _) => RpcConfig {
                url,
                timeout_secs: default_timeout_secs(),
            },
            (None, Some(key)) => RpcConfig::alchemy_mainnet(&key),
            (None, None) => return Err(ConfigError::MissingEnv { name: "ALCHEMY_API_KEY" }),
        };
        if let Some(secs) = get("RPC_TIMEOUT_SECS") {
            rpc.timeout_secs = parse_var("RPC_TIMEOUT_SECS", &secs)?;
        }

        let mut routing = RoutingConfig::default();
        if let Some(url) = get("ROUTING_API_URL") {
            routing.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(secs) = get("ROUTING_TIMEOUT_SECS") {
            routing.timeout_secs = parse_var("ROUTING_TIMEOUT_SECS", &secs)?;
        }

        let chain_id = match get("CHAIN_ID") {
            Some(v) => parse_var("CHAIN_ID", &v)?,
            None => default_chain_id(),
        };
        let api_port = match get("PORT") {
            Some(v) => parse_var("PORT", &v)?,
            None => default_api_port(),
        };
        let bind_address = get("BIND_ADDRESS").unwrap_or_else(default_bind_address);

        Ok(Self {
            rpc,
            routing,
            chain_id,
            api_port,
            bind_address,
        })
    }
}

fn parse_var<T>(name: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidValue {
            name,
            message: format!("{:?}: {}", value, e),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_with_alchemy_key() {
        let config = AppConfig::from_lookup(lookup(&[("ALCHEMY_API_KEY", "abc")])).unwrap();
        assert_eq!(config.rpc.url, "https://eth-mainnet.g.alchemy.com/v2/abc");
        assert_eq!(config.rpc.timeout_secs, 30);
        assert_eq!(config.routing.base_url, "https://api.uniswap.org/v1");
        assert_eq!(config.chain_id, 1);
        assert_eq!(config.api_port, 3000);
        assert_eq!(config.bind_address, "0.0.0.0");
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            ("ALCHEMY_API_KEY", "abc"),
            ("RPC_URL", "http://localhost:8545"),
            ("ROUTING_API_URL", "http://localhost:9000/v1/"),
            ("PORT", "8080"),
            ("BIND_ADDRESS", "127.0.0.1"),
        ]))
        .unwrap();
        assert_eq!(config.rpc.url, "http://localhost:8545");
        assert_eq!(config.routing.base_url, "http://localhost:9000/v1");
        assert_eq!(config.api_port, 8080);
        assert_eq!(config.bind_address, "127.0.0.1");
    }

    #[test]
    fn test_missing_credentials() {
        let err = AppConfig::from_lookup(lookup(&[("PORT", "3000")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnv { .. }));
    }

    #[test]
    fn test_invalid_port() {
        let err = AppConfig::from_lookup(lookup(&[("ALCHEMY_API_KEY", "k"), ("PORT", "http")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { name: "PORT", .. }));
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::from_lookup(lookup(&[("ALCHEMY_API_KEY", "abc")])).unwrap();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.rpc.url, config.rpc.url);
        assert_eq!(parsed.api_port, config.api_port);
    }
}
