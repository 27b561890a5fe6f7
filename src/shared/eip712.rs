//! EIP-712 typed structured data hashing.
//!
//! Only the pieces needed to hash fixed, known struct layouts: callers build a
//! struct hash field by field with [`StructHasher`] in declaration order.

use super::abi::{address_word, uint_word};
use super::{keccak256, Address, U256};
use serde::{Deserialize, Serialize};

/// Canonical encoding of the domain type used by every domain in this SDK.
pub const DOMAIN_TYPE: &str =
    "EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)";

/// EIP-712 signing domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Eip712Domain {
    pub name: String,
    pub version: String,
    pub chain_id: u64,
    pub verifying_contract: Address,
}

impl Eip712Domain {
    pub fn separator(&self) -> [u8; 32] {
        StructHasher::new(DOMAIN_TYPE)
            .string(&self.name)
            .string(&self.version)
            .uint(self.chain_id)
            .address(&self.verifying_contract)
            .finish()
    }
}

/// Accumulates `encodeData` for one struct and hashes it.
pub struct StructHasher {
    buf: Vec<u8>,
}

impl StructHasher {
    /// Start a struct hash. `encoded_type` is the full type string, including
    /// any referenced struct types appended in alphabetical order.
    pub fn new(encoded_type: &str) -> Self {
        let mut buf = Vec::with_capacity(32 * 12);
        buf.extend(keccak256(encoded_type.as_bytes()));
        Self { buf }
    }

    pub fn string(mut self, value: &str) -> Self {
        self.buf.extend(keccak256(value.as_bytes()));
        self
    }

    pub fn uint(mut self, value: impl Into<U256>) -> Self {
        self.buf.extend(uint_word(value.into()));
        self
    }

    pub fn boolean(mut self, value: bool) -> Self {
        self.buf.extend(uint_word(U256::from(u64::from(value))));
        self
    }

    pub fn address(mut self, value: &Address) -> Self {
        self.buf.extend(address_word(value));
        self
    }

    /// Append a nested struct's hash or a raw `bytes32`.
    pub fn word(mut self, value: [u8; 32]) -> Self {
        self.buf.extend(value);
        self
    }

    pub fn finish(self) -> [u8; 32] {
        keccak256(&self.buf)
    }
}

/// `keccak256("\x19\x01" ‖ domainSeparator ‖ hashStruct(message))`
pub fn signing_digest(domain_separator: &[u8; 32], struct_hash: &[u8; 32]) -> [u8; 32] {
    let mut buf = Vec::with_capacity(66);
    buf.extend([0x19, 0x01]);
    buf.extend(domain_separator);
    buf.extend(struct_hash);
    keccak256(&buf)
}
