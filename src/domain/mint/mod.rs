//! Mint domain — requests to mint existing ERC-721 and ERC-1155 tokens.

use crate::error::SdkError;
use crate::shared::Address;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

// ─── MintType ────────────────────────────────────────────────────────────────

/// Kind of token contract being minted from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MintType {
    /// ERC-721 drop: every mint is a new token of a single edition.
    #[serde(rename = "721")]
    SingleEdition,
    /// ERC-1155: mints copies of a specific token id.
    #[serde(rename = "1155")]
    MultiEdition,
}

impl std::fmt::Display for MintType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            MintType::SingleEdition => write!(f, "721"),
            MintType::MultiEdition => write!(f, "1155"),
        }
    }
}

impl FromStr for MintType {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "721" => Ok(MintType::SingleEdition),
            "1155" => Ok(MintType::MultiEdition),
            other => Err(SdkError::InvalidRequest(format!(
                "unknown mint type {:?} (expected \"721\" or \"1155\")",
                other
            ))),
        }
    }
}

// ─── MintRequest ─────────────────────────────────────────────────────────────

/// Parameters of a mint, as supplied by the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MintRequest {
    /// Contract to mint from.
    pub token_contract: Address,
    pub mint_type: MintType,
    /// Token to mint; required for `MultiEdition`, absent for `SingleEdition`.
    #[serde(default)]
    pub token_id: Option<u64>,
    pub quantity_to_mint: u64,
    #[serde(default)]
    pub mint_comment: Option<String>,
    /// Receives the mint referral reward.
    #[serde(default)]
    pub mint_referral: Option<Address>,
    /// Receives the minted tokens. Defaults to `minter_account`.
    #[serde(default)]
    pub mint_recipient: Option<Address>,
    /// Account that sends (and pays for) the mint transaction.
    pub minter_account: Address,
}

impl MintRequest {
    pub fn new(
        token_contract: Address,
        mint_type: MintType,
        quantity_to_mint: u64,
        minter_account: Address,
    ) -> Self {
        Self {
            token_contract,
            mint_type,
            token_id: None,
            quantity_to_mint,
            mint_comment: None,
            mint_referral: None,
            mint_recipient: None,
            minter_account,
        }
    }

    /// Build a request from string addresses, reporting malformed ones as
    /// `InvalidRequest`.
    pub fn parse(
        token_contract: &str,
        mint_type: MintType,
        quantity_to_mint: u64,
        minter_account: &str,
    ) -> Result<Self, SdkError> {
        Ok(Self::new(
            parse_address("tokenContract", token_contract)?,
            mint_type,
            quantity_to_mint,
            parse_address("minterAccount", minter_account)?,
        ))
    }

    pub fn token_id(mut self, token_id: u64) -> Self {
        self.token_id = Some(token_id);
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.mint_comment = Some(comment.into());
        self
    }

    pub fn referral(mut self, referral: Address) -> Self {
        self.mint_referral = Some(referral);
        self
    }

    pub fn recipient(mut self, recipient: Address) -> Self {
        self.mint_recipient = Some(recipient);
        self
    }

    /// Address that receives the minted tokens.
    pub fn effective_recipient(&self) -> Address {
        self.mint_recipient.unwrap_or(self.minter_account)
    }

    pub fn validate(&self) -> Result<(), SdkError> {
        if self.quantity_to_mint == 0 {
            return Err(SdkError::InvalidRequest(
                "quantityToMint must be at least 1".to_string(),
            ));
        }
        match (self.mint_type, self.token_id) {
            (MintType::MultiEdition, None) => Err(SdkError::InvalidRequest(
                "tokenId is required for 1155 mints".to_string(),
            )),
            (MintType::SingleEdition, Some(id)) => Err(SdkError::InvalidRequest(format!(
                "tokenId {} given for a 721 mint; 721 drops mint sequential ids",
                id
            ))),
            _ => Ok(()),
        }
    }
}

/// Parse a named address field, mapping failures to `InvalidRequest`.
pub fn parse_address(field: &str, value: &str) -> Result<Address, SdkError> {
    Address::from_str(value)
        .map_err(|e| SdkError::InvalidRequest(format!("{}: {} ({})", field, e, value)))
}
