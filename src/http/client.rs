//! Low-level HTTP client — `ZoraHttp` — and the JSON-RPC transport built on it.
//!
//! `ZoraHttp` issues JSON GET/POST requests with a per-call retry policy.
//! `HttpTransport` wraps it as an [`RpcTransport`] for a node or wallet URL.

use crate::error::{HttpError, RpcError};
use crate::http::retry::{RetryConfig, RetryPolicy};
use crate::rpc::wire::{JsonRpcRequest, JsonRpcResponse};
use crate::rpc::RpcTransport;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Low-level JSON-over-HTTP client.
#[derive(Clone)]
pub struct ZoraHttp {
    client: Client,
}

impl ZoraHttp {
    pub fn new() -> Result<Self, HttpError> {
        let mut builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        {
            builder = builder
                .timeout(Duration::from_secs(30))
                .pool_max_idle_per_host(10);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        retry: RetryPolicy,
    ) -> Result<T, HttpError> {
        self.request_with_retry(reqwest::Method::GET, url, None::<&()>, retry)
            .await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        url: &str,
        body: &B,
        retry: RetryPolicy,
    ) -> Result<T, HttpError> {
        self.request_with_retry(reqwest::Method::POST, url, Some(body), retry)
            .await
    }

    async fn request_with_retry<T: DeserializeOwned, B: Serialize>(
        &self,
        method: reqwest::Method,
        url: &str,
        body: Option<&B>,
        retry: RetryPolicy,
    ) -> Result<T, HttpError> {
        let config = match retry.config() {
            Some(c) => c,
            None => return self.do_request(&method, url, body).await,
        };

        let mut last_error = None;

        for attempt in 0..=config.max_retries {
            match self.do_request::<T, B>(&method, url, body).await {
                Ok(resp) => return Ok(resp),
                Err(e) => {
                    if is_retryable(&e, &config) && attempt < config.max_retries {
                        let delay = match &e {
                            HttpError::RateLimited {
                                retry_after_ms: Some(ms),
                            } => Duration::from_millis(*ms),
                            _ => config.delay_for_attempt(attempt),
                        };
                        tracing::debug!(
                            attempt = attempt + 1,
                            max = config.max_retries,
                            delay_ms = delay.as_millis() as u64,
                            error = %e,
                            "Retrying request to {}",
                            url
                        );
                        futures_timer::Delay::new(delay).await;
                        last_error = Some(e);
                    } else {
                        return Err(e);
                    }
                }
            }
        }

        Err(HttpError::MaxRetriesExceeded {
            attempts: config.max_retries + 1,
            last_error: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
        })
    }

    async fn do_request<T: DeserializeOwned, B: Serialize>(
        &self,
        method: &reqwest::Method,
        url: &str,
        body: Option<&B>,
    ) -> Result<T, HttpError> {
        let mut req = self.client.request(method.clone(), url);
        if let Some(b) = body {
            req = req.json(b);
        }

        let resp = req.send().await?;
        let status = resp.status();

        if status.is_success() {
            return Ok(resp.json::<T>().await?);
        }

        let status_code = status.as_u16();
        let retry_after_ms = resp
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok())
            .map(|secs| secs * 1000);
        let body_text = resp.text().await.unwrap_or_default();

        match status_code {
            401 => Err(HttpError::Unauthorized),
            404 => Err(HttpError::NotFound(body_text)),
            429 => Err(HttpError::RateLimited { retry_after_ms }),
            400..=499 => Err(HttpError::BadRequest(body_text)),
            _ => Err(HttpError::ServerError {
                status: status_code,
                body: body_text,
            }),
        }
    }
}

fn is_retryable(e: &HttpError, config: &RetryConfig) -> bool {
    match e {
        HttpError::ServerError { status, .. } => config.retryable_statuses.contains(status),
        HttpError::RateLimited { .. } => config.retryable_statuses.contains(&429),
        HttpError::Timeout => true,
        HttpError::Reqwest(re) => {
            #[cfg(not(target_arch = "wasm32"))]
            let retryable = re.is_connect() || re.is_timeout() || re.is_request();
            #[cfg(target_arch = "wasm32")]
            let retryable = re.is_timeout() || re.is_request();
            retryable
        }
        _ => false,
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// JSON-RPC transport
// ═════════════════════════════════════════════════════════════════════════════

/// JSON-RPC over HTTP POST.
///
/// Read methods (see [`RetryPolicy::for_rpc_method`]) retry transport faults
/// using `read_retry`; every other method is sent exactly once. JSON-RPC error
/// objects are answers, not faults, and are never retried.
#[derive(Clone)]
pub struct HttpTransport {
    url: String,
    http: ZoraHttp,
    read_retry: RetryPolicy,
    next_id: Arc<AtomicU64>,
}

impl HttpTransport {
    pub fn new(url: &str) -> Result<Self, HttpError> {
        Ok(Self::with_client(url, ZoraHttp::new()?))
    }

    pub fn with_client(url: &str, http: ZoraHttp) -> Self {
        Self {
            url: url.trim_end_matches('/').to_string(),
            http,
            read_retry: RetryPolicy::Idempotent,
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Override the policy used for read methods.
    pub fn read_retry(mut self, policy: RetryPolicy) -> Self {
        self.read_retry = policy;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl RpcTransport for HttpTransport {
    async fn request(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let envelope = JsonRpcRequest::new(id, method, &params);
        let retry = match RetryPolicy::for_rpc_method(method) {
            RetryPolicy::None => RetryPolicy::None,
            _ => self.read_retry.clone(),
        };

        match self
            .http
            .post::<JsonRpcResponse, _>(&self.url, &envelope, retry)
            .await
        {
            Ok(resp) => resp.into_result(),
            // Some nodes answer JSON-RPC errors with a 4xx status.
            Err(HttpError::BadRequest(body)) => {
                match serde_json::from_str::<JsonRpcResponse>(&body) {
                    Ok(resp) if resp.error.is_some() => resp.into_result(),
                    _ => Err(RpcError::Transport(HttpError::BadRequest(body))),
                }
            }
            Err(e) => Err(RpcError::Transport(e)),
        }
    }
}
