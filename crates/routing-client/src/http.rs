//! HTTP quote API client
//!
//! Talks to a smart-order-router quote service (`GET {base}/quote`), which
//! searches pools, scores routes by gas-adjusted output, and encodes the
//! router calldata.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use swap_core::{ChainId, FixedPointAmount, RoutingConfig, TokenDescriptor};

use crate::types::{MethodParameters, RouteResult, SwapOptions, TradeType};
use crate::{Result, RoutingClient, RoutingError};

/// Engine error code for "searched, nothing found"
const NO_ROUTE_CODE: &str = "NO_ROUTE";

/// Pool protocols the engine may route through
const PROTOCOLS: &str = "v2,v3,mixed";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteResponse {
    quote: String,
    #[serde(default)]
    gas_use_estimate: Option<String>,
    #[serde(default)]
    route: Vec<Vec<PoolHop>>,
    #[serde(default)]
    method_parameters: Option<WireMethodParameters>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PoolHop {
    address: String,
    token_in: WireToken,
    token_out: WireToken,
}

#[derive(Debug, Deserialize)]
struct WireToken {
    address: String,
    #[serde(default)]
    symbol: Option<String>,
}

impl WireToken {
    fn label(&self) -> String {
        self.symbol.clone().unwrap_or_else(|| self.address.clone())
    }
}

#[derive(Debug, Deserialize)]
struct WireMethodParameters {
    to: String,
    calldata: String,
    value: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    error_code: Option<String>,
    detail: Option<String>,
}

/// Routing client backed by the quote HTTP API
pub struct HttpRoutingClient {
    http: reqwest::Client,
    base_url: String,
    chain_id: ChainId,
}

impl HttpRoutingClient {
    pub fn new(config: &RoutingConfig, chain_id: ChainId) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("swap-gateway/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            chain_id,
        })
    }

    fn quote_url(&self) -> String {
        format!("{}/quote", self.base_url)
    }
}

#[async_trait]
impl RoutingClient for HttpRoutingClient {
    async fn route(
        &self,
        amount: &FixedPointAmount,
        token_in: &TokenDescriptor,
        token_out: &TokenDescriptor,
        trade_type: TradeType,
        options: &SwapOptions,
    ) -> Result<Option<RouteResult>> {
        let chain_id = self.chain_id.to_string();
        let amount = amount.to_string();
        let slippage = options.slippage_tolerance.to_percent_string();
        let deadline = seconds_until(options.deadline).to_string();

        let query = [
            ("tokenInAddress", token_in.address.as_str()),
            ("tokenInChainId", chain_id.as_str()),
            ("tokenOutAddress", token_out.address.as_str()),
            ("tokenOutChainId", chain_id.as_str()),
            ("amount", amount.as_str()),
            ("type", trade_type.as_str()),
            ("recipient", options.recipient.as_str()),
            ("slippageTolerance", slippage.as_str()),
            ("deadline", deadline.as_str()),
            ("protocols", PROTOCOLS),
        ];

        tracing::debug!(
            token_in = %token_in.symbol,
            token_out = %token_out.symbol,
            amount = %amount,
            trade_type = trade_type.as_str(),
            "Requesting route"
        );

        let response = self.http.get(self.quote_url()).query(&query).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return classify_failure(status, &body);
        }

        let quote: QuoteResponse =
            serde_json::from_str(&body).map_err(|e| RoutingError::Parse(e.to_string()))?;

        into_route_result(quote).map(Some)
    }
}

/// Map a non-2xx answer: "no route" is a normal outcome, the rest are errors
fn classify_failure(status: StatusCode, body: &str) -> Result<Option<RouteResult>> {
    let parsed: Option<ErrorBody> = serde_json::from_str(body).ok();
    let code = parsed.as_ref().and_then(|b| b.error_code.clone());

    if status == StatusCode::NOT_FOUND || code.as_deref() == Some(NO_ROUTE_CODE) {
        tracing::info!(status = status.as_u16(), "Routing engine found no route");
        return Ok(None);
    }

    match (code, parsed.and_then(|b| b.detail)) {
        (Some(code), detail) => Err(RoutingError::Engine {
            code,
            detail: detail.unwrap_or_default(),
        }),
        (None, _) => Err(RoutingError::Http {
            status: status.as_u16(),
            body: body.chars().take(512).collect(),
        }),
    }
}

fn into_route_result(quote: QuoteResponse) -> Result<RouteResult> {
    let amount = quote
        .quote
        .parse::<FixedPointAmount>()
        .map_err(|e| RoutingError::Parse(format!("quote: {}", e)))?;

    let estimated_gas_used = match quote.gas_use_estimate {
        Some(raw) => raw
            .parse::<FixedPointAmount>()
            .map_err(|e| RoutingError::Parse(format!("gasUseEstimate: {}", e)))?,
        None => FixedPointAmount::zero(),
    };

    // Path and pools describe the first leg of a possibly split route
    let (token_path, pool_addresses) = match quote.route.first() {
        Some(hops) if !hops.is_empty() => {
            let mut path = vec![hops[0].token_in.label()];
            path.extend(hops.iter().map(|h| h.token_out.label()));
            let pools = hops.iter().map(|h| h.address.clone()).collect();
            (path, pools)
        }
        _ => (Vec::new(), Vec::new()),
    };

    Ok(RouteResult {
        quote: amount,
        method_parameters: quote.method_parameters.map(|m| MethodParameters {
            to: m.to,
            calldata: m.calldata,
            value: m.value,
        }),
        estimated_gas_used,
        token_path,
        pool_addresses,
    })
}

/// The quote API takes the deadline relative to now
fn seconds_until(deadline: u64) -> u64 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    deadline.saturating_sub(now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Percent;
    use axum::{extract::Query, http::StatusCode as AxumStatus, routing::get, Json, Router};
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use swap_core::{Address, TokenRegistry};

    type Captured = Arc<Mutex<Option<HashMap<String, String>>>>;

    async fn spawn_engine(status: u16, reply: Value) -> (String, Captured) {
        let captured: Captured = Arc::new(Mutex::new(None));
        let sink = captured.clone();
        let app = Router::new().route(
            "/v1/quote",
            get(move |Query(params): Query<HashMap<String, String>>| {
                *sink.lock().unwrap() = Some(params);
                let reply = reply.clone();
                async move { (AxumStatus::from_u16(status).unwrap(), Json(reply)) }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{}/v1", addr), captured)
    }

    fn client(base_url: String) -> HttpRoutingClient {
        HttpRoutingClient::new(
            &RoutingConfig {
                base_url,
                timeout_secs: 5,
            },
            1,
        )
        .unwrap()
    }

    fn options(deadline: u64) -> SwapOptions {
        SwapOptions {
            recipient: Address::parse("0x0000000000000000000000000000000000000001").unwrap(),
            slippage_tolerance: Percent::from_percentage(0.5),
            deadline,
        }
    }

    fn now() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs()
    }

    fn weth_usdc_quote() -> Value {
        json!({
            "quote": "3000000000",
            "quoteDecimals": "3000",
            "gasUseEstimate": "113000",
            "route": [[{
                "type": "v3-pool",
                "address": "0x88e6A0c2dDD26FEEb64F039a2c41296FcB3f5640",
                "tokenIn": {"chainId": 1, "decimals": "18", "address": "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2", "symbol": "WETH"},
                "tokenOut": {"chainId": 1, "decimals": "6", "address": "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48", "symbol": "USDC"},
                "fee": "500"
            }]],
            "methodParameters": {
                "calldata": "0x5ae401dc",
                "value": "0x00",
                "to": "0x68b3465833fb72A70ecDF485E0e4C7bD8665Fc45"
            }
        })
    }

    #[tokio::test]
    async fn test_route_maps_quote_response() {
        let (url, captured) = spawn_engine(200, weth_usdc_quote()).await;
        let registry = TokenRegistry::mainnet().unwrap();
        let weth = registry.lookup("WETH").unwrap();
        let usdc = registry.lookup("USDC").unwrap();

        let route = client(url)
            .route(
                &"1000000000000000000".parse().unwrap(),
                weth,
                usdc,
                TradeType::ExactInput,
                &options(now() + 1800),
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(route.quote.to_string(), "3000000000");
        assert_eq!(route.estimated_gas_used.to_string(), "113000");
        assert_eq!(route.token_path, vec!["WETH", "USDC"]);
        assert_eq!(
            route.pool_addresses,
            vec!["0x88e6A0c2dDD26FEEb64F039a2c41296FcB3f5640"]
        );
        let params = route.method_parameters.unwrap();
        assert_eq!(params.to, "0x68b3465833fb72A70ecDF485E0e4C7bD8665Fc45");
        assert_eq!(params.calldata, "0x5ae401dc");

        let query = captured.lock().unwrap().clone().unwrap();
        assert_eq!(query["tokenInAddress"], weth.address.as_str());
        assert_eq!(query["tokenOutAddress"], usdc.address.as_str());
        assert_eq!(query["tokenInChainId"], "1");
        assert_eq!(query["amount"], "1000000000000000000");
        assert_eq!(query["type"], "exactIn");
        assert_eq!(query["slippageTolerance"], "0.5");
        let deadline: u64 = query["deadline"].parse().unwrap();
        assert!(deadline > 1790 && deadline <= 1800);
    }

    #[tokio::test]
    async fn test_no_route_is_not_an_error() {
        let (url, _) = spawn_engine(
            404,
            json!({"errorCode": "NO_ROUTE", "detail": "No route found"}),
        )
        .await;
        let registry = TokenRegistry::mainnet().unwrap();

        let route = client(url)
            .route(
                &"1".parse().unwrap(),
                registry.lookup("SHIB").unwrap(),
                registry.lookup("AXS").unwrap(),
                TradeType::ExactInput,
                &options(now() + 1800),
            )
            .await
            .unwrap();
        assert!(route.is_none());
    }

    #[tokio::test]
    async fn test_engine_error_is_classified() {
        let (url, _) = spawn_engine(
            400,
            json!({"errorCode": "VALIDATION_ERROR", "detail": "\"amount\" must be positive"}),
        )
        .await;
        let registry = TokenRegistry::mainnet().unwrap();

        let err = client(url)
            .route(
                &"0".parse().unwrap(),
                registry.lookup("WETH").unwrap(),
                registry.lookup("DAI").unwrap(),
                TradeType::ExactInput,
                &options(now() + 1800),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, RoutingError::Engine { ref code, .. } if code == "VALIDATION_ERROR"));
    }

    #[test]
    fn test_quote_without_method_parameters() {
        let mut body = weth_usdc_quote();
        body.as_object_mut().unwrap().remove("methodParameters");
        let quote: QuoteResponse = serde_json::from_value(body).unwrap();
        let route = into_route_result(quote).unwrap();
        assert!(route.method_parameters.is_none());
        assert_eq!(route.quote.to_string(), "3000000000");
    }

    #[test]
    fn test_multi_hop_path() {
        let quote: QuoteResponse = serde_json::from_value(json!({
            "quote": "42",
            "route": [[
                {"address": "0xpoolA", "tokenIn": {"address": "0xa", "symbol": "UNI"}, "tokenOut": {"address": "0xb", "symbol": "WETH"}},
                {"address": "0xpoolB", "tokenIn": {"address": "0xb", "symbol": "WETH"}, "tokenOut": {"address": "0xc"}}
            ]]
        }))
        .unwrap();
        let route = into_route_result(quote).unwrap();
        assert_eq!(route.token_path, vec!["UNI", "WETH", "0xc"]);
        assert_eq!(route.pool_addresses, vec!["0xpoolA", "0xpoolB"]);
        assert!(route.estimated_gas_used.is_zero());
    }

    #[test]
    fn test_unparsable_quote() {
        let quote: QuoteResponse = serde_json::from_value(json!({"quote": "lots"})).unwrap();
        assert!(matches!(into_route_result(quote), Err(RoutingError::Parse(_))));
    }

    #[test]
    fn test_seconds_until_past_deadline() {
        assert_eq!(seconds_until(0), 0);
    }
}
