//! Wallet-backed executor and signer.
//!
//! `WalletClient` talks to an endpoint that holds keys and signs on request
//! (a browser wallet bridge, a local node with unlocked accounts, a signing
//! proxy). Keys never pass through the SDK.

use crate::domain::premint::typed_data::TypedDataPayload;
use crate::domain::transaction::{Receipt, SimulationResult, TransactionReceipt};
use crate::error::{RpcError, SdkError, Stage};
use crate::pipeline::{Executor, TypedDataSigner};
use crate::rpc::{self, RpcTransport};
use crate::shared::{Address, Bytes, B256};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

/// How `wait_for_receipt` polls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
            max_attempts: 60,
        }
    }
}

#[derive(Clone)]
pub struct WalletClient {
    rpc: Arc<dyn RpcTransport>,
    account: Address,
}

impl WalletClient {
    pub fn new(rpc: Arc<dyn RpcTransport>, account: Address) -> Self {
        Self { rpc, account }
    }

    /// Use the first account the wallet exposes.
    pub async fn from_first_account(rpc: Arc<dyn RpcTransport>) -> Result<Self, SdkError> {
        let accounts: Vec<Address> = rpc::call(rpc.as_ref(), "eth_accounts", json!([]))
            .await
            .map_err(SdkError::rpc(Stage::Execute))?;
        let account = accounts
            .first()
            .copied()
            .ok_or_else(|| SdkError::Config("wallet exposes no accounts".to_string()))?;
        Ok(Self::new(rpc, account))
    }

    pub fn account(&self) -> Address {
        self.account
    }

    /// Poll until `tx_hash` is mined. Reverted transactions fail with
    /// `ExecutionFailed`. Never resubmits.
    pub async fn wait_for_receipt(
        &self,
        tx_hash: &B256,
        poll: PollConfig,
    ) -> Result<TransactionReceipt, SdkError> {
        for attempt in 0..poll.max_attempts {
            let receipt: Option<TransactionReceipt> = rpc::call(
                self.rpc.as_ref(),
                "eth_getTransactionReceipt",
                json!([tx_hash]),
            )
            .await
            .map_err(SdkError::rpc(Stage::Execute))?;

            if let Some(receipt) = receipt {
                if !receipt.succeeded() {
                    return Err(SdkError::ExecutionFailed(format!(
                        "transaction {} reverted in block {}",
                        tx_hash, receipt.block_number
                    )));
                }
                tracing::info!(
                    tx_hash = %tx_hash,
                    block = receipt.block_number,
                    gas_used = receipt.gas_used,
                    "Transaction mined"
                );
                return Ok(receipt);
            }

            if attempt + 1 < poll.max_attempts {
                futures_timer::Delay::new(poll.interval).await;
            }
        }

        Err(SdkError::ExecutionFailed(format!(
            "transaction {} not mined after {} polls",
            tx_hash, poll.max_attempts
        )))
    }
}

impl std::fmt::Debug for WalletClient {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("WalletClient")
            .field("account", &self.account)
            .finish()
    }
}

/// `4001` means the user declined; every other wallet error is a failure.
fn wallet_error(e: RpcError) -> SdkError {
    match e {
        RpcError::Response {
            code: RpcError::USER_REJECTED,
            message,
            ..
        } => SdkError::ExecutionRejected(message),
        other => SdkError::ExecutionFailed(other.to_string()),
    }
}

#[async_trait]
impl Executor for WalletClient {
    async fn execute(&self, plan: SimulationResult) -> Result<Receipt, SdkError> {
        let request = plan.into_request();
        if request.from != self.account {
            return Err(SdkError::ExecutionRejected(format!(
                "transaction is from {} but the wallet signs as {}",
                request.from, self.account
            )));
        }

        let transaction_hash: B256 =
            rpc::call(self.rpc.as_ref(), "eth_sendTransaction", json!([&request]))
                .await
                .map_err(wallet_error)?;
        if transaction_hash.is_zero() {
            return Err(SdkError::ExecutionFailed(
                "wallet returned an empty transaction hash".to_string(),
            ));
        }

        Ok(Receipt {
            transaction_hash,
            from: request.from,
            to: request.to,
        })
    }
}

#[async_trait]
impl TypedDataSigner for WalletClient {
    fn address(&self) -> Address {
        self.account
    }

    async fn sign_typed_data(&self, payload: &TypedDataPayload) -> Result<Bytes, SdkError> {
        rpc::call(
            self.rpc.as_ref(),
            "eth_signTypedData_v4",
            json!([self.account, payload.json.to_string()]),
        )
        .await
        .map_err(wallet_error)
    }
}
