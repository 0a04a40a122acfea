//! JSON-RPC 2.0 envelope types

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::RpcError;

#[derive(Debug, Serialize)]
pub(crate) struct Request<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

impl<'a> Request<'a> {
    pub(crate) fn new(id: u64, method: &'a str, params: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            method,
            params,
        }
    }
}

/// Error object returned by the node
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorObject {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Response {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<ErrorObject>,
}

impl Response {
    /// Extract the `result` member, turning node-side errors into `RpcError`
    pub(crate) fn into_result(self) -> Result<Value, RpcError> {
        if let Some(err) = self.error {
            return Err(RpcError::Node {
                code: err.code,
                message: err.message,
            });
        }
        self.result.ok_or(RpcError::MissingResult)
    }
}
