//! Calldata builders for the Zora contract functions the SDK calls.
//!
//! Builders return raw calldata; the caller decides the target contract and
//! the attached value. Decoders pick fields out of `eth_call` return data.

use crate::domain::premint::ContractCreationConfig;
use crate::program::constants::{signature, MINT_FEE_WEI};
use crate::shared::abi::{self, decode_address, decode_uint, encode_call, word_at, AbiError, Token};
use crate::shared::{Address, Bytes, U256};

// ============================================================================
// Mint Builders
// ============================================================================

/// Build an ERC-721 drop mint call.
///
/// Args: (recipient, quantity, comment, mintReferral). A missing referral is
/// encoded as the zero address.
pub fn build_mint_721_call(
    recipient: &Address,
    quantity: u64,
    comment: &str,
    mint_referral: Option<&Address>,
) -> Bytes {
    encode_call(
        signature::MINT_721,
        &[
            Token::Address(*recipient),
            Token::uint(quantity),
            Token::String(comment.to_string()),
            Token::Address(mint_referral.copied().unwrap_or(Address::ZERO)),
        ],
    )
    .into()
}

/// Build an ERC-1155 mint call through a minter strategy.
///
/// Args: (minter, tokenId, quantity, minterArguments, mintReferral), where
/// `minterArguments = abi.encode(recipient, comment)` as the fixed-price
/// strategy expects.
pub fn build_mint_1155_call(
    minter: &Address,
    token_id: u64,
    quantity: u64,
    recipient: &Address,
    comment: &str,
    mint_referral: Option<&Address>,
) -> Bytes {
    let minter_arguments = abi::encode(&[
        Token::Address(*recipient),
        Token::String(comment.to_string()),
    ]);

    encode_call(
        signature::MINT_1155,
        &[
            Token::Address(*minter),
            Token::uint(token_id),
            Token::uint(quantity),
            Token::Bytes(minter_arguments),
            Token::Address(mint_referral.copied().unwrap_or(Address::ZERO)),
        ],
    )
    .into()
}

/// Total value to attach to a mint: `(price + mint fee) * quantity`.
///
/// Returns `None` on overflow.
pub fn total_mint_cost(price_per_token: U256, quantity: u64) -> Option<U256> {
    price_per_token
        .checked_add(MINT_FEE_WEI)?
        .checked_mul(U256::from(quantity))
}

// ============================================================================
// Read Builders
// ============================================================================

/// `saleDetails()` on an ERC-721 drop.
pub fn build_sale_details_call() -> Bytes {
    encode_call(signature::SALE_DETAILS, &[]).into()
}

/// `sale(tokenContract, tokenId)` on the fixed-price sale strategy.
pub fn build_fixed_price_sale_call(token_contract: &Address, token_id: u64) -> Bytes {
    encode_call(
        signature::FIXED_PRICE_SALE,
        &[Token::Address(*token_contract), Token::uint(token_id)],
    )
    .into()
}

/// `getContractAddress((contractAdmin, contractURI, contractName))` on the
/// premint executor.
pub fn build_get_contract_address_call(contract: &ContractCreationConfig) -> Bytes {
    encode_call(
        signature::GET_CONTRACT_ADDRESS,
        &[Token::Tuple(vec![
            Token::Address(contract.contract_admin),
            Token::String(contract.contract_uri.clone()),
            Token::String(contract.contract_name.clone()),
        ])],
    )
    .into()
}

// ============================================================================
// Return Decoders
// ============================================================================

/// `publicSalePrice` from `saleDetails()`.
///
/// Layout: (publicSaleActive, presaleActive, publicSalePrice, ...).
pub fn decode_sale_details_price(data: &[u8]) -> Result<U256, AbiError> {
    Ok(decode_uint(&word_at(data, 2)?))
}

/// `pricePerToken` from the fixed-price strategy `sale()`.
///
/// Layout: (saleStart, saleEnd, maxTokensPerAddress, pricePerToken, fundsRecipient).
pub fn decode_fixed_price_sale_price(data: &[u8]) -> Result<U256, AbiError> {
    Ok(decode_uint(&word_at(data, 3)?))
}

/// A single `address` return value.
pub fn decode_address_return(data: &[u8]) -> Result<Address, AbiError> {
    Ok(decode_address(&word_at(data, 0)?))
}
