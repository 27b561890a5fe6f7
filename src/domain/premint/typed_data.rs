//! EIP-712 typed data for version 2 premints (`CreatorAttribution`).
//!
//! The digest is computed locally so callers can check what a wallet signs;
//! the JSON form is what `eth_signTypedData_v4` takes.

use super::{PremintConfig, TokenCreationConfig};
use crate::program::constants::{PREMINT_DOMAIN_NAME, PREMINT_VERSION};
use crate::shared::eip712::{signing_digest, Eip712Domain, StructHasher};
use crate::shared::{Address, B256};
use serde_json::{json, Value};

pub const TOKEN_CREATION_CONFIG_TYPE: &str = "TokenCreationConfig(string tokenURI,uint256 maxSupply,uint64 maxTokensPerAddress,uint96 pricePerToken,uint64 mintStart,uint64 mintDuration,uint32 royaltyBPS,address payoutRecipient,address fixedPriceMinter,address createReferral)";

pub const CREATOR_ATTRIBUTION_TYPE: &str = "CreatorAttribution(TokenCreationConfig tokenConfig,uint32 uid,uint32 version,bool deleted)TokenCreationConfig(string tokenURI,uint256 maxSupply,uint64 maxTokensPerAddress,uint96 pricePerToken,uint64 mintStart,uint64 mintDuration,uint32 royaltyBPS,address payoutRecipient,address fixedPriceMinter,address createReferral)";

/// What a signer is asked to sign: the wallet-facing JSON and the digest it
/// must produce.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedDataPayload {
    pub json: Value,
    pub digest: B256,
}

/// Signing domain of premints for `collection` on `chain_id`.
pub fn premint_domain(chain_id: u64, collection: &Address) -> Eip712Domain {
    Eip712Domain {
        name: PREMINT_DOMAIN_NAME.to_string(),
        version: PREMINT_VERSION.to_string(),
        chain_id,
        verifying_contract: *collection,
    }
}

pub fn hash_token_config(config: &TokenCreationConfig) -> [u8; 32] {
    StructHasher::new(TOKEN_CREATION_CONFIG_TYPE)
        .string(&config.token_uri)
        .uint(config.max_supply)
        .uint(config.max_tokens_per_address)
        .uint(config.price_per_token)
        .uint(config.mint_start)
        .uint(config.mint_duration)
        .uint(config.royalty_bps)
        .address(&config.payout_recipient)
        .address(&config.fixed_price_minter)
        .address(&config.create_referral)
        .finish()
}

pub fn hash_premint(premint: &PremintConfig) -> [u8; 32] {
    StructHasher::new(CREATOR_ATTRIBUTION_TYPE)
        .word(hash_token_config(&premint.token_config))
        .uint(premint.uid)
        .uint(premint.version)
        .boolean(premint.deleted)
        .finish()
}

/// Digest a wallet produces when signing `premint` for `collection`.
pub fn premint_digest(premint: &PremintConfig, chain_id: u64, collection: &Address) -> B256 {
    let domain = premint_domain(chain_id, collection);
    signing_digest(&domain.separator(), &hash_premint(premint)).into()
}

/// Build the `eth_signTypedData_v4` payload for a premint.
pub fn premint_typed_data(
    premint: &PremintConfig,
    chain_id: u64,
    collection: &Address,
) -> TypedDataPayload {
    let domain = premint_domain(chain_id, collection);
    let token = &premint.token_config;

    let json = json!({
        "types": {
            "EIP712Domain": [
                { "name": "name", "type": "string" },
                { "name": "version", "type": "string" },
                { "name": "chainId", "type": "uint256" },
                { "name": "verifyingContract", "type": "address" },
            ],
            "CreatorAttribution": [
                { "name": "tokenConfig", "type": "TokenCreationConfig" },
                { "name": "uid", "type": "uint32" },
                { "name": "version", "type": "uint32" },
                { "name": "deleted", "type": "bool" },
            ],
            "TokenCreationConfig": [
                { "name": "tokenURI", "type": "string" },
                { "name": "maxSupply", "type": "uint256" },
                { "name": "maxTokensPerAddress", "type": "uint64" },
                { "name": "pricePerToken", "type": "uint96" },
                { "name": "mintStart", "type": "uint64" },
                { "name": "mintDuration", "type": "uint64" },
                { "name": "royaltyBPS", "type": "uint32" },
                { "name": "payoutRecipient", "type": "address" },
                { "name": "fixedPriceMinter", "type": "address" },
                { "name": "createReferral", "type": "address" },
            ],
        },
        "primaryType": "CreatorAttribution",
        "domain": domain,
        "message": {
            "tokenConfig": {
                "tokenURI": token.token_uri,
                "maxSupply": token.max_supply.to_string(),
                "maxTokensPerAddress": token.max_tokens_per_address.to_string(),
                "pricePerToken": token.price_per_token.to_string(),
                "mintStart": token.mint_start.to_string(),
                "mintDuration": token.mint_duration.to_string(),
                "royaltyBPS": token.royalty_bps,
                "payoutRecipient": token.payout_recipient,
                "fixedPriceMinter": token.fixed_price_minter,
                "createReferral": token.create_referral,
            },
            "uid": premint.uid,
            "version": premint.version,
            "deleted": premint.deleted,
        },
    });

    TypedDataPayload {
        json,
        digest: signing_digest(&domain.separator(), &hash_premint(premint)).into(),
    }
}
