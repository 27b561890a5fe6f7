//! Constants for the Zora protocol contracts.
//!
//! Contract addresses are identical on every supported chain (deterministic
//! deployments).

use crate::shared::{Address, U256};
use std::str::FromStr;

// ============================================================================
// Contract Addresses
// ============================================================================

lazy_static::lazy_static! {
    /// Fixed-price sale strategy used as the minter for ERC-1155 tokens.
    pub static ref FIXED_PRICE_SALE_STRATEGY: Address =
        Address::from_str("0x04E2516A2c207E84a1839755675dfd8eF6302F0a").unwrap();

    /// Premint executor: resolves premint collection addresses and brings
    /// signed premints on chain.
    pub static ref PREMINT_EXECUTOR: Address =
        Address::from_str("0x7777773606e7e46C8Ba8B98C08f5cD218e31d340").unwrap();
}

// ============================================================================
// Fees
// ============================================================================

/// Protocol reward paid per minted token, in wei (0.000777 ETH).
pub const MINT_FEE_WEI: U256 = U256([777_000_000_000_000, 0, 0, 0]);

// ============================================================================
// Premint
// ============================================================================

/// EIP-712 domain name of premint signatures.
pub const PREMINT_DOMAIN_NAME: &str = "Preminter";

/// Premint config version produced by this SDK.
pub const PREMINT_VERSION: u32 = 2;

/// `maxSupply` of an open edition (`type(uint64).max`).
pub const OPEN_EDITION_MINT_SIZE: U256 = U256([u64::MAX, 0, 0, 0]);

/// Default creator royalty: 10%.
pub const DEFAULT_ROYALTY_BPS: u32 = 1_000;

/// Upper bound for royalties (100%).
pub const MAX_ROYALTY_BPS: u32 = 10_000;

// ============================================================================
// Function Signatures
// ============================================================================

/// Canonical signatures of the contract functions the SDK calls.
pub mod signature {
    /// ERC-721 drop: `mintWithRewards(recipient, quantity, comment, mintReferral)`
    pub const MINT_721: &str = "mintWithRewards(address,uint256,string,address)";
    /// ERC-1155: `mintWithRewards(minter, tokenId, quantity, minterArguments, mintReferral)`
    pub const MINT_1155: &str = "mintWithRewards(address,uint256,uint256,bytes,address)";
    /// ERC-721 drop sale configuration.
    pub const SALE_DETAILS: &str = "saleDetails()";
    /// Fixed-price strategy sale configuration for a token.
    pub const FIXED_PRICE_SALE: &str = "sale(address,uint256)";
    /// Premint executor deterministic collection address.
    pub const GET_CONTRACT_ADDRESS: &str = "getContractAddress((address,string,string))";
}
