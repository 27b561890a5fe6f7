//! High-level client — `ZoraClient`, the default pipeline wired over HTTP.
//!
//! A node endpoint serves reads and simulation, a wallet endpoint signs and
//! broadcasts, and the premint API stores signed premints.

use crate::domain::premint::client::PremintApiClient;
use crate::error::SdkError;
use crate::http::{HttpTransport, RetryPolicy, ZoraHttp};
use crate::network::{Chain, DEFAULT_PREMINT_API_URL};
use crate::pipeline::{Orchestrator, RpcSimulator, ZoraPreparer};
use crate::rpc::RpcTransport;
use crate::shared::Address;
use crate::wallet::WalletClient;

use std::sync::Arc;

/// The primary entry point for the SDK.
pub type ZoraClient = Orchestrator<ZoraPreparer, RpcSimulator, WalletClient>;

impl ZoraClient {
    pub fn builder() -> ZoraClientBuilder {
        ZoraClientBuilder::default()
    }

    pub fn chain(&self) -> Chain {
        self.preparer().chain()
    }

    /// The wallet that executes mints and signs premints.
    pub fn wallet(&self) -> &WalletClient {
        self.executor()
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct ZoraClientBuilder {
    chain: Chain,
    rpc_url: Option<String>,
    wallet_url: Option<String>,
    premint_api_url: String,
    account: Option<Address>,
    read_retry: RetryPolicy,
}

impl Default for ZoraClientBuilder {
    fn default() -> Self {
        Self {
            chain: Chain::Zora,
            rpc_url: None,
            wallet_url: None,
            premint_api_url: DEFAULT_PREMINT_API_URL.to_string(),
            account: None,
            read_retry: RetryPolicy::Idempotent,
        }
    }
}

impl ZoraClientBuilder {
    pub fn chain(mut self, chain: Chain) -> Self {
        self.chain = chain;
        self
    }

    /// Node used for reads and simulation. Defaults to the chain's public RPC.
    pub fn rpc_url(mut self, url: &str) -> Self {
        self.rpc_url = Some(url.to_string());
        self
    }

    /// Endpoint that signs and broadcasts. Defaults to the node URL.
    pub fn wallet_url(mut self, url: &str) -> Self {
        self.wallet_url = Some(url.to_string());
        self
    }

    pub fn premint_api_url(mut self, url: &str) -> Self {
        self.premint_api_url = url.to_string();
        self
    }

    /// Account the wallet signs as. Required.
    pub fn account(mut self, account: Address) -> Self {
        self.account = Some(account);
        self
    }

    /// Retry policy for idempotent node reads.
    pub fn read_retry(mut self, policy: RetryPolicy) -> Self {
        self.read_retry = policy;
        self
    }

    pub fn build(self) -> Result<ZoraClient, SdkError> {
        let account = self
            .account
            .ok_or_else(|| SdkError::Config("account is required".to_string()))?;

        let http = ZoraHttp::new()?;
        let rpc_url = self
            .rpc_url
            .unwrap_or_else(|| self.chain.default_rpc_url().to_string());
        let wallet_url = self.wallet_url.unwrap_or_else(|| rpc_url.clone());

        let node: Arc<dyn RpcTransport> = Arc::new(
            HttpTransport::with_client(&rpc_url, http.clone()).read_retry(self.read_retry.clone()),
        );
        let wallet: Arc<dyn RpcTransport> = Arc::new(
            HttpTransport::with_client(&wallet_url, http.clone()).read_retry(self.read_retry),
        );
        let registry = Arc::new(PremintApiClient::with_client(&self.premint_api_url, http));

        Ok(Orchestrator::new(
            ZoraPreparer::new(self.chain, node.clone(), registry),
            RpcSimulator::new(node),
            WalletClient::new(wallet, account),
        ))
    }
}
