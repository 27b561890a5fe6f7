//! Default preparer: reads sale prices and premint addresses over JSON-RPC
//! and encodes Zora mint calls.

use super::submission::{PreparedCreation, PremintSubmission};
use super::{PremintRegistry, Preparer};
use crate::domain::mint::{MintRequest, MintType};
use crate::domain::premint::{ContractCreationConfig, CreationRequest, PremintConfig};
use crate::domain::transaction::{Action, ExecutionDescriptor, TransactionRequest};
use crate::error::{SdkError, Stage};
use crate::network::Chain;
use crate::program::calls::{
    build_fixed_price_sale_call, build_get_contract_address_call, build_mint_1155_call,
    build_mint_721_call, build_sale_details_call, decode_address_return,
    decode_fixed_price_sale_price, decode_sale_details_price, total_mint_cost,
};
use crate::program::constants::{FIXED_PRICE_SALE_STRATEGY, PREMINT_EXECUTOR};
use crate::rpc::{self, RpcTransport};
use crate::shared::{Address, Bytes, U256};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

/// Prepares mints and premints for one chain.
#[derive(Clone)]
pub struct ZoraPreparer {
    chain: Chain,
    rpc: Arc<dyn RpcTransport>,
    registry: Arc<dyn PremintRegistry>,
}

impl ZoraPreparer {
    pub fn new(
        chain: Chain,
        rpc: Arc<dyn RpcTransport>,
        registry: Arc<dyn PremintRegistry>,
    ) -> Self {
        Self {
            chain,
            rpc,
            registry,
        }
    }

    pub fn chain(&self) -> Chain {
        self.chain
    }

    /// Deterministic address of the collection `contract` describes.
    pub async fn collection_address(
        &self,
        contract: &ContractCreationConfig,
    ) -> Result<Address, SdkError> {
        let data = self
            .read(&PREMINT_EXECUTOR, &build_get_contract_address_call(contract))
            .await?;
        Ok(decode_address_return(data.as_slice())?)
    }

    /// Current price per token, excluding the protocol mint fee.
    pub async fn price_per_token(&self, request: &MintRequest) -> Result<U256, SdkError> {
        match request.mint_type {
            MintType::SingleEdition => {
                let data = self
                    .read(&request.token_contract, &build_sale_details_call())
                    .await?;
                Ok(decode_sale_details_price(data.as_slice())?)
            }
            MintType::MultiEdition => {
                let token_id = required_token_id(request)?;
                let data = self
                    .read(
                        &FIXED_PRICE_SALE_STRATEGY,
                        &build_fixed_price_sale_call(&request.token_contract, token_id),
                    )
                    .await?;
                Ok(decode_fixed_price_sale_price(data.as_slice())?)
            }
        }
    }

    async fn read(&self, to: &Address, data: &Bytes) -> Result<Bytes, SdkError> {
        rpc::call(
            self.rpc.as_ref(),
            "eth_call",
            json!([{ "to": to, "data": data }, "latest"]),
        )
        .await
        .map_err(SdkError::rpc(Stage::Prepare))
    }
}

impl std::fmt::Debug for ZoraPreparer {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("ZoraPreparer")
            .field("chain", &self.chain)
            .finish()
    }
}

fn required_token_id(request: &MintRequest) -> Result<u64, SdkError> {
    request.token_id.ok_or_else(|| {
        SdkError::InvalidRequest("tokenId is required for 1155 mints".to_string())
    })
}

#[async_trait]
impl Preparer for ZoraPreparer {
    async fn prepare_mint(&self, request: &MintRequest) -> Result<ExecutionDescriptor, SdkError> {
        let price = self.price_per_token(request).await?;
        let value = total_mint_cost(price, request.quantity_to_mint).ok_or_else(|| {
            SdkError::InvalidRequest(format!(
                "mint cost overflows: {} tokens at {} wei",
                request.quantity_to_mint, price
            ))
        })?;

        let recipient = request.effective_recipient();
        let comment = request.mint_comment.as_deref().unwrap_or("");
        let referral = request.mint_referral.as_ref();

        let (action, data) = match request.mint_type {
            MintType::SingleEdition => (
                Action::Mint721 {
                    quantity: request.quantity_to_mint,
                },
                build_mint_721_call(&recipient, request.quantity_to_mint, comment, referral),
            ),
            MintType::MultiEdition => {
                let token_id = required_token_id(request)?;
                (
                    Action::Mint1155 {
                        token_id,
                        quantity: request.quantity_to_mint,
                    },
                    build_mint_1155_call(
                        &FIXED_PRICE_SALE_STRATEGY,
                        token_id,
                        request.quantity_to_mint,
                        &recipient,
                        comment,
                        referral,
                    ),
                )
            }
        };

        tracing::debug!(%price, %value, %action, "Mint priced");

        Ok(ExecutionDescriptor::new(
            action,
            TransactionRequest {
                from: request.minter_account,
                to: request.token_contract,
                data,
                value,
                gas: None,
                chain_id: self.chain.id(),
            },
        ))
    }

    async fn prepare_creation(
        &self,
        request: &CreationRequest,
    ) -> Result<PreparedCreation, SdkError> {
        let contract = request.contract_config();
        let token_config = request.token_config()?;
        let collection_address = self.collection_address(&contract).await?;
        let uid = self
            .registry
            .next_uid(self.chain, &collection_address)
            .await?;

        let premint_config = PremintConfig::new(token_config, uid);
        let submission = PremintSubmission::new(
            self.chain,
            contract,
            collection_address,
            premint_config.clone(),
            self.registry.clone(),
        );

        Ok(PreparedCreation {
            premint_config,
            collection_address,
            submission,
        })
    }
}
