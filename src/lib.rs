//! # Zora Protocol SDK
//!
//! Mint tokens on, and create gasless premint collections for, the Zora
//! protocol.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **Core** — Hex newtypes, ABI and EIP-712 encoding, contract calls,
//!    domain models (no I/O)
//! 2. **Transport** — `RpcTransport` seam, `HttpTransport` with per-method
//!    retry policies
//! 3. **Collaborators** — `Preparer` / `Simulator` / `Executor` /
//!    `TypedDataSigner` / `PremintRegistry` traits and their default adapters
//! 4. **High-Level Client** — `ZoraClient`, the orchestrator wired over HTTP
//!
//! Every mint runs prepare → simulate → execute. A failed stage stops the
//! pipeline and nothing is retried automatically.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use zora_protocol_sdk::prelude::*;
//!
//! let client = ZoraClient::builder()
//!     .chain(Chain::Zora)
//!     .wallet_url("http://localhost:1248")
//!     .account(minter)
//!     .build()?;
//!
//! let request = MintRequest::new(token_contract, MintType::SingleEdition, 3, minter)
//!     .comment("My comment");
//! let receipt = client.mint(&request).await?;
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes and encoders used across all domains.
pub mod shared;

/// Domain modules (vertical slices): mint, premint, transaction.
pub mod domain;

/// Zora contract interaction: addresses, selectors, calldata builders.
pub mod program;

/// Unified SDK error types.
pub mod error;

/// Chain presets and API URL constants.
pub mod network;

// ── Layer 2: Transport ───────────────────────────────────────────────────────

/// JSON-RPC transport seam and envelopes.
pub mod rpc;

/// HTTP client with retry policies.
pub mod http;

// ── Layer 3: Collaborators ───────────────────────────────────────────────────

/// Pipeline orchestrator, collaborator traits and default adapters.
pub mod pipeline;

/// Wallet-backed executor and typed-data signer.
pub mod wallet;

// ── Layer 4: High-Level Client ───────────────────────────────────────────────

/// `ZoraClient` — the primary entry point.
#[cfg(feature = "http")]
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{format_ether, Address, Bytes, B256, U256};

    // Domain types — mint
    pub use crate::domain::mint::{MintRequest, MintType};

    // Domain types — premint
    pub use crate::domain::premint::typed_data::TypedDataPayload;
    pub use crate::domain::premint::{
        ContractCreationConfig, CreationRequest, PremintConfig, SignedPremint, SubmissionAck,
        TokenCreationConfig,
    };

    // Domain types — transaction
    pub use crate::domain::transaction::{
        Action, ExecutionDescriptor, Receipt, SimulationResult, TransactionReceipt,
        TransactionRequest,
    };

    // Errors
    pub use crate::error::{RpcError, SdkError, Stage};

    // Network
    pub use crate::network::{Chain, DEFAULT_PREMINT_API_URL};

    // Pipeline
    pub use crate::pipeline::{
        Executor, Orchestrator, PreparedCreation, Preparer, PremintRegistry, PremintSubmission,
        RpcSimulator, Simulator, TypedDataSigner, ZoraPreparer,
    };
    pub use crate::rpc::RpcTransport;
    pub use crate::wallet::{PollConfig, WalletClient};

    // HTTP client
    #[cfg(feature = "http")]
    pub use crate::client::{ZoraClient, ZoraClientBuilder};
    #[cfg(feature = "http")]
    pub use crate::domain::premint::client::PremintApiClient;
    #[cfg(feature = "http")]
    pub use crate::http::HttpTransport;
    pub use crate::http::retry::{RetryConfig, RetryPolicy};
}
