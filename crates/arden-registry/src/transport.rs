//! JSON-RPC Transport
//!
//! The registry client only needs `request(method, params) -> result`. Native
//! builds post to an HTTP endpoint; the browser forwards to the injected
//! wallet provider.

use arden_core::ArdenError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Transport failures
#[derive(Error, Debug)]
pub enum TransportError {
    /// Endpoint unreachable or returned a non-JSON body
    #[error("Transport error: {0}")]
    Unavailable(String),

    /// Node or wallet answered with a JSON-RPC error
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// `null` result where a value was required
    #[error("Empty RPC result for {0}")]
    Empty(String),

    /// Result did not have the expected shape
    #[error("Decode error: {0}")]
    Decode(String),
}

impl From<TransportError> for ArdenError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Unavailable(msg) => ArdenError::RegistryUnavailable(msg),
            other => ArdenError::Registry(other.to_string()),
        }
    }
}

/// JSON-RPC 2.0 request envelope
#[derive(Serialize, Debug)]
pub struct RpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'a str,
    pub params: Value,
}

/// JSON-RPC 2.0 response envelope
#[derive(Deserialize, Debug)]
pub struct RpcResponse {
    #[serde(default)]
    pub result: Value,
    #[serde(default)]
    pub error: Option<RpcErrorBody>,
}

#[derive(Deserialize, Debug)]
pub struct RpcErrorBody {
    pub code: i64,
    pub message: String,
}

impl RpcResponse {
    /// Unwrap the envelope. A missing or `null` result comes back as
    /// `Value::Null` (e.g. a receipt that is still pending).
    pub fn into_result(self) -> Result<Value, TransportError> {
        if let Some(error) = self.error {
            return Err(TransportError::Rpc {
                code: error.code,
                message: error.message,
            });
        }
        Ok(self.result)
    }
}

/// Anything that can carry a JSON-RPC call to an Ethereum node
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait JsonRpcTransport: Send + Sync {
    async fn request(&self, method: &str, params: Value) -> Result<Value, TransportError>;

    fn name(&self) -> &str;
}

#[cfg(feature = "http")]
pub use http::HttpTransport;

#[cfg(feature = "http")]
mod http {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    /// JSON-RPC over HTTP POST
    pub struct HttpTransport {
        client: reqwest::Client,
        url: String,
        next_id: AtomicU64,
    }

    impl HttpTransport {
        pub fn new(url: impl Into<String>) -> Self {
            Self {
                client: reqwest::Client::new(),
                url: url.into(),
                next_id: AtomicU64::new(1),
            }
        }

        pub fn url(&self) -> &str {
            &self.url
        }
    }

    #[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
    #[cfg_attr(not(target_arch = "wasm32"), async_trait)]
    impl JsonRpcTransport for HttpTransport {
        async fn request(&self, method: &str, params: Value) -> Result<Value, TransportError> {
            let request = RpcRequest {
                jsonrpc: "2.0",
                id: self.next_id.fetch_add(1, Ordering::Relaxed),
                method,
                params,
            };

            tracing::debug!(method, url = %self.url, "JSON-RPC request");

            let response = self
                .client
                .post(&self.url)
                .json(&request)
                .send()
                .await
                .map_err(|e| TransportError::Unavailable(e.to_string()))?;

            let body: RpcResponse = response
                .json()
                .await
                .map_err(|e| TransportError::Unavailable(e.to_string()))?;

            body.into_result()
        }

        fn name(&self) -> &str {
            "http"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope() {
        let ok: RpcResponse = serde_json::from_str(r#"{"jsonrpc":"2.0","id":1,"result":"0x01"}"#).unwrap();
        assert_eq!(ok.into_result().unwrap(), Value::String("0x01".into()));

        let pending: RpcResponse = serde_json::from_str(r#"{"jsonrpc":"2.0","id":1,"result":null}"#).unwrap();
        assert_eq!(pending.into_result().unwrap(), Value::Null);

        let failed: RpcResponse = serde_json::from_str(
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32000,"message":"execution reverted"}}"#,
        )
        .unwrap();
        let err: ArdenError = failed.into_result().unwrap_err().into();
        assert!(matches!(err, ArdenError::Registry(msg) if msg.contains("reverted")));
    }
}
