//! Premint domain — gasless token creation.
//!
//! A creator signs a [`PremintConfig`] off chain; the premint registry stores
//! it and anyone can later bring the collection and token on chain. The
//! collection address is fixed in advance by the [`ContractCreationConfig`].

#[cfg(feature = "http")]
pub mod client;
pub mod typed_data;
pub mod wire;

use crate::error::SdkError;
use crate::network::Chain;
use crate::program::constants::{
    DEFAULT_ROYALTY_BPS, FIXED_PRICE_SALE_STRATEGY, MAX_ROYALTY_BPS, OPEN_EDITION_MINT_SIZE,
    PREMINT_VERSION,
};
use crate::shared::serde_util::{decimal_u256, decimal_u64};
use crate::shared::{Address, Bytes, U256};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Largest value a `uint96` price field can hold.
const MAX_UINT96: U256 = U256([u64::MAX, u32::MAX as u64, 0, 0]);

// ─── On-chain configs ────────────────────────────────────────────────────────

/// Collection parameters. Together they determine the collection address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractCreationConfig {
    #[serde(rename = "contractAdmin")]
    pub contract_admin: Address,
    #[serde(rename = "contractURI")]
    pub contract_uri: String,
    #[serde(rename = "contractName")]
    pub contract_name: String,
}

/// Token parameters of a version 2 premint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenCreationConfig {
    #[serde(rename = "tokenURI")]
    pub token_uri: String,
    #[serde(with = "decimal_u256")]
    pub max_supply: U256,
    #[serde(with = "decimal_u64")]
    pub max_tokens_per_address: u64,
    #[serde(with = "decimal_u256")]
    pub price_per_token: U256,
    #[serde(with = "decimal_u64")]
    pub mint_start: u64,
    #[serde(with = "decimal_u64")]
    pub mint_duration: u64,
    #[serde(rename = "royaltyBPS")]
    pub royalty_bps: u32,
    pub payout_recipient: Address,
    pub fixed_price_minter: Address,
    pub create_referral: Address,
}

/// The signed unit: token settings plus the registry-assigned UID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PremintConfig {
    pub token_config: TokenCreationConfig,
    pub uid: u32,
    pub version: u32,
    pub deleted: bool,
}

impl PremintConfig {
    pub fn new(token_config: TokenCreationConfig, uid: u32) -> Self {
        Self {
            token_config,
            uid,
            version: PREMINT_VERSION,
            deleted: false,
        }
    }
}

// ─── Signed premints ─────────────────────────────────────────────────────────

/// A premint signed by the collection admin, ready for the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedPremint {
    pub chain: Chain,
    pub collection: ContractCreationConfig,
    pub collection_address: Address,
    pub premint: PremintConfig,
    pub signature: Bytes,
}

/// The registry accepted a premint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionAck {
    pub collection_address: Address,
    pub uid: u32,
}

// ─── CreationRequest ─────────────────────────────────────────────────────────

/// Parameters for a new premint collection and its first token.
///
/// Optional settings fall back to protocol defaults: open edition, free,
/// unlimited per address, mintable immediately and forever, 10% royalty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreationRequest {
    /// Collection admin. Must be the account that signs the premint.
    pub contract_admin: Address,
    pub contract_name: String,
    #[serde(rename = "contractURI")]
    pub contract_uri: String,
    #[serde(rename = "tokenURI")]
    pub token_uri: String,
    pub payout_recipient: Address,

    #[serde(default)]
    pub max_supply: Option<U256>,
    #[serde(default)]
    pub max_tokens_per_address: Option<u64>,
    #[serde(default)]
    pub price_per_token: Option<U256>,
    #[serde(default)]
    pub mint_start: Option<DateTime<Utc>>,
    /// Seconds the sale stays open; `0` means no end.
    #[serde(default)]
    pub mint_duration: Option<u64>,
    #[serde(default, rename = "royaltyBPS")]
    pub royalty_bps: Option<u32>,
    #[serde(default)]
    pub create_referral: Option<Address>,
}

impl CreationRequest {
    pub fn new(
        contract_admin: Address,
        contract_name: impl Into<String>,
        contract_uri: impl Into<String>,
        token_uri: impl Into<String>,
        payout_recipient: Address,
    ) -> Self {
        Self {
            contract_admin,
            contract_name: contract_name.into(),
            contract_uri: contract_uri.into(),
            token_uri: token_uri.into(),
            payout_recipient,
            max_supply: None,
            max_tokens_per_address: None,
            price_per_token: None,
            mint_start: None,
            mint_duration: None,
            royalty_bps: None,
            create_referral: None,
        }
    }

    pub fn max_supply(mut self, max_supply: impl Into<U256>) -> Self {
        self.max_supply = Some(max_supply.into());
        self
    }

    pub fn max_tokens_per_address(mut self, limit: u64) -> Self {
        self.max_tokens_per_address = Some(limit);
        self
    }

    pub fn price_per_token(mut self, wei: impl Into<U256>) -> Self {
        self.price_per_token = Some(wei.into());
        self
    }

    pub fn mint_start(mut self, start: DateTime<Utc>) -> Self {
        self.mint_start = Some(start);
        self
    }

    pub fn mint_duration(mut self, seconds: u64) -> Self {
        self.mint_duration = Some(seconds);
        self
    }

    pub fn royalty_bps(mut self, bps: u32) -> Self {
        self.royalty_bps = Some(bps);
        self
    }

    pub fn create_referral(mut self, referral: Address) -> Self {
        self.create_referral = Some(referral);
        self
    }

    pub fn validate(&self) -> Result<(), SdkError> {
        if self.contract_name.trim().is_empty() {
            return Err(SdkError::InvalidRequest(
                "contractName must not be empty".to_string(),
            ));
        }
        validate_uri("contractURI", &self.contract_uri)?;
        validate_uri("tokenURI", &self.token_uri)?;

        if let Some(bps) = self.royalty_bps {
            if bps > MAX_ROYALTY_BPS {
                return Err(SdkError::InvalidRequest(format!(
                    "royaltyBPS {} exceeds {}",
                    bps, MAX_ROYALTY_BPS
                )));
            }
        }
        if let Some(price) = self.price_per_token {
            if price > MAX_UINT96 {
                return Err(SdkError::InvalidRequest(format!(
                    "pricePerToken {} does not fit in uint96",
                    price
                )));
            }
        }
        if self.max_supply.is_some_and(|supply| supply.is_zero()) {
            return Err(SdkError::InvalidRequest(
                "maxSupply must be at least 1".to_string(),
            ));
        }
        self.mint_start_seconds()?;
        Ok(())
    }

    pub fn contract_config(&self) -> ContractCreationConfig {
        ContractCreationConfig {
            contract_admin: self.contract_admin,
            contract_uri: self.contract_uri.clone(),
            contract_name: self.contract_name.clone(),
        }
    }

    pub fn token_config(&self) -> Result<TokenCreationConfig, SdkError> {
        Ok(TokenCreationConfig {
            token_uri: self.token_uri.clone(),
            max_supply: self.max_supply.unwrap_or(OPEN_EDITION_MINT_SIZE),
            max_tokens_per_address: self.max_tokens_per_address.unwrap_or(0),
            price_per_token: self.price_per_token.unwrap_or_default(),
            mint_start: self.mint_start_seconds()?,
            mint_duration: self.mint_duration.unwrap_or(0),
            royalty_bps: self.royalty_bps.unwrap_or(DEFAULT_ROYALTY_BPS),
            payout_recipient: self.payout_recipient,
            fixed_price_minter: *FIXED_PRICE_SALE_STRATEGY,
            create_referral: self.create_referral.unwrap_or(Address::ZERO),
        })
    }

    fn mint_start_seconds(&self) -> Result<u64, SdkError> {
        match self.mint_start {
            None => Ok(0),
            Some(start) => u64::try_from(start.timestamp()).map_err(|_| {
                SdkError::InvalidRequest(format!("mintStart {} is before the epoch", start))
            }),
        }
    }
}

fn validate_uri(field: &str, uri: &str) -> Result<(), SdkError> {
    let valid_scheme = uri
        .split_once("://")
        .map(|(scheme, rest)| {
            !scheme.is_empty()
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '-' || c == '.')
                && !rest.is_empty()
        })
        .unwrap_or(false);
    if !valid_scheme {
        return Err(SdkError::InvalidRequest(format!(
            "{} must be an absolute URI, got {:?}",
            field, uri
        )));
    }
    Ok(())
}
