//! The prepare → simulate → execute pipeline.
//!
//! [`Orchestrator`] sequences the stages and owns request validation; every
//! stage's real work is done by a collaborator behind one of the traits here.
//! The default collaborators are [`ZoraPreparer`], [`RpcSimulator`] and
//! `wallet::WalletClient`; tests and embedders can supply their own.

pub mod prepare;
pub mod simulate;
pub mod submission;

pub use prepare::ZoraPreparer;
pub use simulate::RpcSimulator;
pub use submission::{PreparedCreation, PremintSubmission};

use crate::domain::mint::MintRequest;
use crate::domain::premint::typed_data::TypedDataPayload;
use crate::domain::premint::{CreationRequest, SignedPremint, SubmissionAck};
use crate::domain::transaction::{ExecutionDescriptor, Receipt, SimulationResult};
use crate::error::SdkError;
use crate::network::Chain;
use crate::shared::{Address, Bytes};
use async_trait::async_trait;

// ─── Collaborator seams ──────────────────────────────────────────────────────

/// Builds descriptors from validated requests.
#[async_trait]
pub trait Preparer: Send + Sync {
    async fn prepare_mint(&self, request: &MintRequest) -> Result<ExecutionDescriptor, SdkError>;

    async fn prepare_creation(
        &self,
        request: &CreationRequest,
    ) -> Result<PreparedCreation, SdkError>;
}

/// Dry-runs a descriptor against current chain state.
///
/// A remote rejection must surface as [`SdkError::SimulationFailed`] with the
/// remote reason unchanged.
#[async_trait]
pub trait Simulator: Send + Sync {
    async fn simulate(&self, descriptor: ExecutionDescriptor)
        -> Result<SimulationResult, SdkError>;
}

/// Signs and broadcasts a simulated plan. Consumes it: a plan runs once.
#[async_trait]
pub trait Executor: Send + Sync {
    async fn execute(&self, plan: SimulationResult) -> Result<Receipt, SdkError>;
}

/// Signs EIP-712 typed data on behalf of one account.
#[async_trait]
pub trait TypedDataSigner: Send + Sync {
    fn address(&self) -> Address;

    async fn sign_typed_data(&self, payload: &TypedDataPayload) -> Result<Bytes, SdkError>;
}

/// Off-chain store of signed premints.
#[async_trait]
pub trait PremintRegistry: Send + Sync {
    /// Next unused premint UID for `collection`.
    async fn next_uid(&self, chain: Chain, collection: &Address) -> Result<u32, SdkError>;

    async fn submit(&self, premint: &SignedPremint) -> Result<SubmissionAck, SdkError>;
}

// ─── Orchestrator ────────────────────────────────────────────────────────────

/// Sequences the pipeline over three collaborators.
///
/// Stages never retry. A failure is returned to the caller as-is and later
/// stages do not run.
#[derive(Debug, Clone)]
pub struct Orchestrator<P, S, E> {
    preparer: P,
    simulator: S,
    executor: E,
}

impl<P, S, E> Orchestrator<P, S, E>
where
    P: Preparer,
    S: Simulator,
    E: Executor,
{
    pub fn new(preparer: P, simulator: S, executor: E) -> Self {
        Self {
            preparer,
            simulator,
            executor,
        }
    }

    pub fn preparer(&self) -> &P {
        &self.preparer
    }

    pub fn simulator(&self) -> &S {
        &self.simulator
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Validate a mint request and build its descriptor.
    pub async fn prepare_mint(
        &self,
        request: &MintRequest,
    ) -> Result<ExecutionDescriptor, SdkError> {
        request.validate()?;
        let descriptor = self.preparer.prepare_mint(request).await?;
        tracing::info!(
            action = %descriptor.action(),
            to = %descriptor.request().to,
            quantity = request.quantity_to_mint,
            "Mint prepared"
        );
        Ok(descriptor)
    }

    /// Validate a creation request and resolve its collection address,
    /// premint config and submission capability.
    pub async fn prepare_creation(
        &self,
        request: &CreationRequest,
    ) -> Result<PreparedCreation, SdkError> {
        request.validate()?;
        let prepared = self.preparer.prepare_creation(request).await?;
        tracing::info!(
            collection = %prepared.collection_address,
            uid = prepared.premint_config.uid,
            "Premint prepared"
        );
        Ok(prepared)
    }

    pub async fn simulate(
        &self,
        descriptor: ExecutionDescriptor,
    ) -> Result<SimulationResult, SdkError> {
        let action = descriptor.action();
        match self.simulator.simulate(descriptor).await {
            Ok(plan) => {
                tracing::info!(action = %action, gas = ?plan.request().gas, "Simulation passed");
                Ok(plan)
            }
            Err(e) => {
                if let SdkError::SimulationFailed { reason, .. } = &e {
                    tracing::warn!(action = %action, reason = %reason, "Simulation rejected");
                }
                Err(e)
            }
        }
    }

    pub async fn execute(&self, plan: SimulationResult) -> Result<Receipt, SdkError> {
        let receipt = self.executor.execute(plan).await?;
        tracing::info!(
            tx_hash = %receipt.transaction_hash,
            to = %receipt.to,
            "Transaction submitted"
        );
        Ok(receipt)
    }

    /// Prepare, simulate and execute a mint, stopping at the first failure.
    pub async fn mint(&self, request: &MintRequest) -> Result<Receipt, SdkError> {
        let descriptor = self.prepare_mint(request).await?;
        let plan = self.simulate(descriptor).await?;
        self.execute(plan).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::mint::MintType;
    use crate::domain::transaction::{Action, TransactionRequest};
    use crate::shared::{B256, U256};
    use std::str::FromStr;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Default)]
    struct Calls {
        prepare: AtomicUsize,
        execute: AtomicUsize,
    }

    struct FakePreparer(Arc<Calls>);
    struct FakeSimulator {
        reject: Option<&'static str>,
    }
    struct FakeExecutor(Arc<Calls>);

    #[async_trait]
    impl Preparer for FakePreparer {
        async fn prepare_mint(
            &self,
            request: &MintRequest,
        ) -> Result<ExecutionDescriptor, SdkError> {
            self.0.prepare.fetch_add(1, Ordering::SeqCst);
            Ok(ExecutionDescriptor::new(
                Action::Mint721 {
                    quantity: request.quantity_to_mint,
                },
                TransactionRequest {
                    from: request.minter_account,
                    to: request.token_contract,
                    data: Bytes::new(vec![0x45, 0x36, 0x81, 0x81]),
                    value: U256::zero(),
                    gas: None,
                    chain_id: 7_777_777,
                },
            ))
        }

        async fn prepare_creation(
            &self,
            _request: &CreationRequest,
        ) -> Result<PreparedCreation, SdkError> {
            Err(SdkError::Config("not used".into()))
        }
    }

    #[async_trait]
    impl Simulator for FakeSimulator {
        async fn simulate(
            &self,
            descriptor: ExecutionDescriptor,
        ) -> Result<SimulationResult, SdkError> {
            match self.reject {
                Some(reason) => Err(SdkError::SimulationFailed {
                    reason: reason.to_string(),
                    revert_data: None,
                }),
                None => Ok(SimulationResult::new(descriptor.into_request(), Bytes::default())),
            }
        }
    }

    #[async_trait]
    impl Executor for FakeExecutor {
        async fn execute(&self, plan: SimulationResult) -> Result<Receipt, SdkError> {
            self.0.execute.fetch_add(1, Ordering::SeqCst);
            let request = plan.into_request();
            Ok(Receipt {
                transaction_hash: B256::new([0x11; 32]),
                from: request.from,
                to: request.to,
            })
        }
    }

    fn orchestrator(
        reject: Option<&'static str>,
    ) -> (
        Orchestrator<FakePreparer, FakeSimulator, FakeExecutor>,
        Arc<Calls>,
    ) {
        let calls = Arc::new(Calls::default());
        let orchestrator = Orchestrator::new(
            FakePreparer(calls.clone()),
            FakeSimulator { reject },
            FakeExecutor(calls.clone()),
        );
        (orchestrator, calls)
    }

    fn request(quantity: u64) -> MintRequest {
        MintRequest::new(
            Address::from_str("0x7aae7e67515A2CbB8585C707Ca6db37BDd3EA839").unwrap(),
            MintType::SingleEdition,
            quantity,
            Address::from_str("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed").unwrap(),
        )
    }

    #[tokio::test]
    async fn test_invalid_request_never_reaches_preparer() {
        let (orchestrator, calls) = orchestrator(None);
        let err = orchestrator.prepare_mint(&request(0)).await.unwrap_err();
        assert!(matches!(err, SdkError::InvalidRequest(_)));
        assert_eq!(calls.prepare.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_mint_runs_all_stages() {
        let (orchestrator, calls) = orchestrator(None);
        let receipt = orchestrator.mint(&request(3)).await.unwrap();
        assert!(!receipt.transaction_hash.is_zero());
        assert_eq!(calls.prepare.load(Ordering::SeqCst), 1);
        assert_eq!(calls.execute.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_simulation_failure_short_circuits() {
        let (orchestrator, calls) = orchestrator(Some("Sale has not started"));
        let err = orchestrator.mint(&request(1)).await.unwrap_err();
        match err {
            SdkError::SimulationFailed { reason, .. } => assert_eq!(reason, "Sale has not started"),
            other => panic!("expected SimulationFailed, got {other:?}"),
        }
        assert_eq!(calls.execute.load(Ordering::SeqCst), 0);
    }
}
