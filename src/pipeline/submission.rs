//! Prepared premints and the one-shot capability to sign and submit them.

use super::{PremintRegistry, TypedDataSigner};
use crate::domain::premint::typed_data::{premint_typed_data, TypedDataPayload};
use crate::domain::premint::{ContractCreationConfig, PremintConfig, SignedPremint, SubmissionAck};
use crate::error::SdkError;
use crate::network::Chain;
use crate::shared::Address;
use std::sync::Arc;

/// Result of preparing a creation request.
#[derive(Debug)]
pub struct PreparedCreation {
    pub premint_config: PremintConfig,
    /// Address the collection will have once brought on chain.
    pub collection_address: Address,
    pub submission: PremintSubmission,
}

/// Signs a prepared premint and hands it to the registry. Usable once.
pub struct PremintSubmission {
    chain: Chain,
    collection: ContractCreationConfig,
    collection_address: Address,
    premint: PremintConfig,
    registry: Arc<dyn PremintRegistry>,
}

impl PremintSubmission {
    pub fn new(
        chain: Chain,
        collection: ContractCreationConfig,
        collection_address: Address,
        premint: PremintConfig,
        registry: Arc<dyn PremintRegistry>,
    ) -> Self {
        Self {
            chain,
            collection,
            collection_address,
            premint,
            registry,
        }
    }

    pub fn collection(&self) -> &ContractCreationConfig {
        &self.collection
    }

    /// The typed data the collection admin is asked to sign.
    pub fn typed_data(&self) -> TypedDataPayload {
        premint_typed_data(&self.premint, self.chain.id(), &self.collection_address)
    }

    /// Sign with `signer` and submit.
    ///
    /// `signer` must be the collection admin; otherwise nothing is signed or
    /// submitted and the call fails with `InvalidRequest`.
    pub async fn sign_and_submit(
        self,
        signer: &dyn TypedDataSigner,
    ) -> Result<SubmissionAck, SdkError> {
        let signer_address = signer.address();
        if signer_address != self.collection.contract_admin {
            return Err(SdkError::InvalidRequest(format!(
                "signer {} is not the collection admin {}",
                signer_address, self.collection.contract_admin
            )));
        }

        let payload = self.typed_data();
        let signature = signer.sign_typed_data(&payload).await?;
        if signature.is_empty() {
            return Err(SdkError::ExecutionFailed(
                "signer returned an empty signature".to_string(),
            ));
        }
        tracing::debug!(digest = %payload.digest, "Premint signed");

        let signed = SignedPremint {
            chain: self.chain,
            collection: self.collection,
            collection_address: self.collection_address,
            premint: self.premint,
            signature,
        };
        self.registry.submit(&signed).await
    }
}

impl std::fmt::Debug for PremintSubmission {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("PremintSubmission")
            .field("chain", &self.chain)
            .field("collection_address", &self.collection_address)
            .field("uid", &self.premint.uid)
            .finish()
    }
}
