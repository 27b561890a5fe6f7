//! HTTP layer — reqwest-backed JSON client and JSON-RPC transport with
//! per-method retry policies.

#[cfg(feature = "http")]
pub mod client;
pub mod retry;

#[cfg(feature = "http")]
pub use client::{HttpTransport, ZoraHttp};
pub use retry::{RetryConfig, RetryPolicy};
