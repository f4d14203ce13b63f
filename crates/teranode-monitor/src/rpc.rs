//! Authenticated JSON-RPC transport.

use serde_json::{json, Value};

use crate::config::MonitorConfig;
use crate::error::RpcError;

/// One remote call against the node.
///
/// The aggregator is generic over this trait so tests can script each
/// method's outcome; [`RpcClient`] is the live implementation. Callers are
/// generic rather than boxed, so the future needs no Send bound.
#[allow(async_fn_in_trait)]
pub trait NodeRpc {
    async fn call(&self, method: &str, params: &[Value]) -> Result<Value, RpcError>;
}

/// JSON-RPC client for the node's RPC endpoint.
///
/// Wraps `reqwest::Client` with basic auth and a bounded per-request
/// timeout. Exactly one attempt per invocation — no retries, no backoff.
pub struct RpcClient {
    http: reqwest::Client,
    url: String,
    user: String,
    pass: String,
}

impl RpcClient {
    pub fn new(config: &MonitorConfig) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(config.rpc_timeout_secs))
                .build()
                .expect("failed to build HTTP client"),
            url: config.rpc_url(),
            user: config.rpc_user.clone(),
            pass: config.rpc_pass.clone(),
        }
    }
}

impl NodeRpc for RpcClient {
    async fn call(&self, method: &str, params: &[Value]) -> Result<Value, RpcError> {
        let payload = json!({
            "jsonrpc": "1.0",
            "id": "monitor",
            "method": method,
            "params": params,
        });

        tracing::debug!(method, "rpc call");

        let resp = self
            .http
            .post(&self.url)
            .basic_auth(&self.user, Some(&self.pass))
            .json(&payload)
            .send()
            .await
            .map_err(RpcError::from)?;

        let http_status = resp.status();
        let body: Value = match resp.json().await {
            Ok(v) => v,
            Err(e) if e.is_timeout() => return Err(RpcError::Timeout),
            Err(_) if !http_status.is_success() => {
                return Err(RpcError::Other(format!(
                    "unexpected HTTP status {http_status}"
                )))
            }
            Err(e) => return Err(RpcError::Other(format!("malformed response: {e}"))),
        };

        // A missing `result` field is a successful call returning null,
        // not an error.
        Ok(body.get("result").cloned().unwrap_or(Value::Null))
    }
}
