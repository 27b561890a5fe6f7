//! Minimal Solidity ABI encoding for the contract calls the SDK prepares.
//!
//! Covers the static and dynamic types the Zora mint and premint entry points
//! take: `address`, `uint<N>`, `bool`, `bytes32`, `string`, `bytes` and tuples.
//! Decoding is word-oriented; callers pick fields out of return data by index.

use super::{keccak256, Address, U256};
use thiserror::Error;

const WORD: usize = 32;

const USIZE_OVERFLOW: AbiError = AbiError::Overflow { bits: usize::BITS };

/// `Error(string)` selector used by Solidity `revert("...")`.
pub const ERROR_STRING_SELECTOR: [u8; 4] = [0x08, 0xc3, 0x79, 0xa0];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AbiError {
    #[error("return data too short: need {needed} bytes, have {len}")]
    OutOfBounds { needed: usize, len: usize },

    #[error("value does not fit in {bits} bits")]
    Overflow { bits: u32 },

    #[error("invalid utf-8 in string")]
    InvalidUtf8,
}

/// A value to be ABI-encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Address(Address),
    Uint(U256),
    Bool(bool),
    FixedBytes32([u8; 32]),
    String(String),
    Bytes(Vec<u8>),
    Tuple(Vec<Token>),
}

impl Token {
    /// `uint` token from any unsigned primitive.
    pub fn uint(value: impl Into<U256>) -> Self {
        Token::Uint(value.into())
    }

    fn is_dynamic(&self) -> bool {
        match self {
            Token::String(_) | Token::Bytes(_) => true,
            Token::Tuple(items) => items.iter().any(Token::is_dynamic),
            _ => false,
        }
    }

    fn head_len(&self) -> usize {
        match self {
            Token::Tuple(items) if !self.is_dynamic() => items.iter().map(Token::head_len).sum(),
            _ => WORD,
        }
    }
}

/// First four bytes of the keccak hash of a canonical function signature.
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

/// Encode a full call: selector followed by the encoded arguments.
pub fn encode_call(signature: &str, args: &[Token]) -> Vec<u8> {
    let mut out = selector(signature).to_vec();
    out.extend(encode(args));
    out
}

/// Encode a token sequence as a tuple (`abi.encode(...)`).
///
/// Static values sit in the head; dynamic ones leave an offset there and
/// append their body to the tail. A static tuple is inlined into the head.
pub fn encode(tokens: &[Token]) -> Vec<u8> {
    let head_size: usize = tokens.iter().map(Token::head_len).sum();
    let mut head = Vec::with_capacity(head_size);
    let mut tail = Vec::new();

    for token in tokens {
        let body = match token {
            Token::Address(a) => {
                head.extend(address_word(a));
                continue;
            }
            Token::Uint(v) => {
                head.extend(uint_word(*v));
                continue;
            }
            Token::Bool(b) => {
                head.extend(uint_word(U256::from(u64::from(*b))));
                continue;
            }
            Token::FixedBytes32(b) => {
                head.extend(b);
                continue;
            }
            Token::Tuple(items) if !token.is_dynamic() => {
                head.extend(encode(items));
                continue;
            }
            Token::Tuple(items) => encode(items),
            Token::String(s) => encode_bytes_tail(s.as_bytes()),
            Token::Bytes(b) => encode_bytes_tail(b),
        };
        head.extend(len_word(head_size + tail.len()));
        tail.extend(body);
    }

    head.extend(tail);
    head
}

fn encode_bytes_tail(data: &[u8]) -> Vec<u8> {
    let padded = data.len().div_ceil(WORD) * WORD;
    let mut out = Vec::with_capacity(WORD + padded);
    out.extend(len_word(data.len()));
    out.extend(data);
    out.resize(WORD + padded, 0);
    out
}

fn len_word(len: usize) -> [u8; 32] {
    uint_word(U256::from(len as u64))
}

/// Left-pad an unsigned integer to a 32-byte word.
pub fn uint_word(value: U256) -> [u8; 32] {
    let mut word = [0u8; 32];
    value.to_big_endian(&mut word);
    word
}

/// Left-pad an address to a 32-byte word.
pub fn address_word(address: &Address) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[12..].copy_from_slice(address.as_bytes());
    word
}

// ─── Decoding ────────────────────────────────────────────────────────────────

/// Read the `index`-th 32-byte word of `data`.
pub fn word_at(data: &[u8], index: usize) -> Result<[u8; 32], AbiError> {
    let end = index
        .checked_mul(WORD)
        .and_then(|start| start.checked_add(WORD))
        .ok_or(USIZE_OVERFLOW)?;
    word_in(data, end - WORD)
}

fn word_in(data: &[u8], start: usize) -> Result<[u8; 32], AbiError> {
    let end = start.checked_add(WORD).ok_or(USIZE_OVERFLOW)?;
    let slice = data.get(start..end).ok_or(AbiError::OutOfBounds {
        needed: end,
        len: data.len(),
    })?;
    let mut word = [0u8; 32];
    word.copy_from_slice(slice);
    Ok(word)
}

/// Interpret a word as a `uint256`.
pub fn decode_uint(word: &[u8; 32]) -> U256 {
    U256::from_big_endian(word)
}

/// Interpret a word as an offset or length into the data being decoded.
pub fn decode_usize(word: &[u8; 32]) -> Result<usize, AbiError> {
    let value = decode_uint(word);
    if value.bits() > 64 {
        return Err(USIZE_OVERFLOW);
    }
    usize::try_from(value.low_u64()).map_err(|_| USIZE_OVERFLOW)
}

pub fn decode_address(word: &[u8; 32]) -> Address {
    Address::from_word(word)
}

/// Decode a dynamic `string` whose offset word sits at `index`.
pub fn decode_string(data: &[u8], index: usize) -> Result<String, AbiError> {
    let offset = decode_usize(&word_at(data, index)?)?;
    let len = decode_usize(&word_in(data, offset)?)?;
    let start = offset + WORD;
    let end = start.checked_add(len).ok_or(USIZE_OVERFLOW)?;
    let bytes = data.get(start..end).ok_or(AbiError::OutOfBounds {
        needed: end,
        len: data.len(),
    })?;
    String::from_utf8(bytes.to_vec()).map_err(|_| AbiError::InvalidUtf8)
}

/// Extract the message from `Error(string)` revert data, if that is what it is.
pub fn decode_revert_reason(data: &[u8]) -> Option<String> {
    let payload = data.strip_prefix(&ERROR_STRING_SELECTOR[..])?;
    decode_string(payload, 0).ok()
}
