//! JSON-RPC plumbing shared by every collaborator that talks to a node or a
//! wallet.
//!
//! [`RpcTransport`] is the seam: the SDK ships an HTTP implementation
//! (`http::HttpTransport`), and tests or embedders can supply their own.

pub mod wire;

use crate::error::RpcError;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// A JSON-RPC endpoint: a node, or a wallet that signs on request.
///
/// Implementations own timeouts, retries and rate limiting. They must never
/// retry a method that changes state.
#[async_trait]
pub trait RpcTransport: Send + Sync {
    /// Send one request and return its `result`, or the error object the
    /// endpoint answered with.
    async fn request(&self, method: &str, params: Value) -> Result<Value, RpcError>;
}

/// Send a request and deserialize its result.
pub async fn call<T: DeserializeOwned>(
    transport: &dyn RpcTransport,
    method: &str,
    params: Value,
) -> Result<T, RpcError> {
    tracing::debug!(method, "JSON-RPC request");
    let result = transport.request(method, params).await?;
    serde_json::from_value(result)
        .map_err(|e| RpcError::InvalidResponse(format!("{}: {}", method, e)))
}
