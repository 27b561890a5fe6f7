//! Unified SDK error types.

use crate::shared::abi::{decode_revert_reason, AbiError};
use crate::shared::Bytes;
use std::str::FromStr;
use thiserror::Error;

/// Pipeline stage an error originated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Prepare,
    Simulate,
    Execute,
    Submit,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Stage::Prepare => write!(f, "prepare"),
            Stage::Simulate => write!(f, "simulate"),
            Stage::Execute => write!(f, "execute"),
            Stage::Submit => write!(f, "submit"),
        }
    }
}

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    /// Local validation failure; nothing reached the network.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The node rejected the proposed action before commitment.
    #[error("Simulation failed: {reason}")]
    SimulationFailed {
        reason: String,
        revert_data: Option<Bytes>,
    },

    /// The signer declined.
    #[error("Execution rejected: {0}")]
    ExecutionRejected(String),

    /// Signing or broadcast failed for a reason other than the signer declining.
    #[error("Execution failed: {0}")]
    ExecutionFailed(String),

    /// The premint registry refused or could not store the premint.
    #[error("Submission failed: {0}")]
    SubmissionFailed(String),

    #[error("RPC error during {stage}: {source}")]
    Rpc { stage: Stage, source: RpcError },

    /// The premint registry could not be reached or answered with an error.
    #[error("Registry error during {stage}: {source}")]
    Registry { stage: Stage, source: HttpError },

    #[error("ABI decode error: {0}")]
    Abi(#[from] AbiError),

    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl SdkError {
    /// The stage this error belongs to, when it is tied to one.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            SdkError::InvalidRequest(_) | SdkError::Abi(_) => Some(Stage::Prepare),
            SdkError::SimulationFailed { .. } => Some(Stage::Simulate),
            SdkError::ExecutionRejected(_) | SdkError::ExecutionFailed(_) => Some(Stage::Execute),
            SdkError::SubmissionFailed(_) => Some(Stage::Submit),
            SdkError::Rpc { stage, .. } | SdkError::Registry { stage, .. } => Some(*stage),
            SdkError::Http(_) | SdkError::Config(_) | SdkError::Serde(_) => None,
        }
    }

    /// Decoded `Error(string)` message of a simulation revert, if any.
    pub fn revert_reason(&self) -> Option<String> {
        match self {
            SdkError::SimulationFailed {
                revert_data: Some(data),
                ..
            } => decode_revert_reason(data.as_slice()),
            _ => None,
        }
    }

    pub(crate) fn rpc(stage: Stage) -> impl FnOnce(RpcError) -> SdkError {
        move |source| SdkError::Rpc { stage, source }
    }

    #[cfg(feature = "http")]
    pub(crate) fn registry(stage: Stage) -> impl FnOnce(HttpError) -> SdkError {
        move |source| SdkError::Registry { stage, source }
    }
}

/// JSON-RPC errors.
#[derive(Error, Debug)]
pub enum RpcError {
    #[error("Transport error: {0}")]
    Transport(#[from] HttpError),

    #[error("JSON-RPC error {code}: {message}")]
    Response {
        code: i64,
        message: String,
        data: Option<serde_json::Value>,
    },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl RpcError {
    /// EIP-1193 "user rejected request".
    pub const USER_REJECTED: i64 = 4001;

    pub fn code(&self) -> Option<i64> {
        match self {
            RpcError::Response { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub fn is_user_rejection(&self) -> bool {
        self.code() == Some(Self::USER_REJECTED)
    }

    /// Revert payload carried in the error's `data`, when it is a hex string.
    pub fn revert_data(&self) -> Option<Bytes> {
        match self {
            RpcError::Response {
                data: Some(serde_json::Value::String(s)),
                ..
            } => Bytes::from_str(s).ok(),
            _ => None,
        }
    }
}

/// HTTP-layer errors.
#[derive(Error, Debug)]
pub enum HttpError {
    #[cfg(feature = "http")]
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Timeout")]
    Timeout,

    #[error("Max retries exceeded after {attempts} attempts: {last_error}")]
    MaxRetriesExceeded { attempts: u32, last_error: String },
}
