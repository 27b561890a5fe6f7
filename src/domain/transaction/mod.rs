//! Transaction domain — the values that flow between pipeline stages.
//!
//! `ExecutionDescriptor` (prepared, immutable) → `SimulationResult` (gas
//! filled in, consumed once) → `Receipt`.

use crate::shared::serde_util::{quantity_u256, quantity_u64, quantity_u64_opt};
use crate::shared::{format_ether, Address, Bytes, B256, U256};
use serde::{Deserialize, Serialize};

// ─── TransactionRequest ──────────────────────────────────────────────────────

/// A contract call as JSON-RPC `eth_call` / `eth_sendTransaction` expect it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub from: Address,
    pub to: Address,
    pub data: Bytes,
    #[serde(with = "quantity_u256")]
    pub value: U256,
    #[serde(
        default,
        with = "quantity_u64_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub gas: Option<u64>,
    #[serde(with = "quantity_u64")]
    pub chain_id: u64,
}

// ─── Action ──────────────────────────────────────────────────────────────────

/// What a descriptor does, for logging and inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Mint721 { quantity: u64 },
    Mint1155 { token_id: u64, quantity: u64 },
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Action::Mint721 { quantity } => write!(f, "mint721 x{}", quantity),
            Action::Mint1155 { token_id, quantity } => {
                write!(f, "mint1155 #{} x{}", token_id, quantity)
            }
        }
    }
}

// ─── ExecutionDescriptor ─────────────────────────────────────────────────────

/// A prepared, not-yet-simulated action. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionDescriptor {
    action: Action,
    request: TransactionRequest,
}

impl ExecutionDescriptor {
    pub fn new(action: Action, request: TransactionRequest) -> Self {
        Self { action, request }
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn request(&self) -> &TransactionRequest {
        &self.request
    }

    pub fn into_request(self) -> TransactionRequest {
        self.request
    }
}

impl std::fmt::Display for ExecutionDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} on {} ({} ETH)",
            self.action,
            self.request.to,
            format_ether(self.request.value)
        )
    }
}

// ─── SimulationResult ────────────────────────────────────────────────────────

/// A simulated execution plan. Not `Clone`: an executor consumes it once.
#[derive(Debug, PartialEq, Eq)]
pub struct SimulationResult {
    request: TransactionRequest,
    return_data: Bytes,
}

impl SimulationResult {
    pub fn new(request: TransactionRequest, return_data: Bytes) -> Self {
        Self {
            request,
            return_data,
        }
    }

    pub fn request(&self) -> &TransactionRequest {
        &self.request
    }

    /// Raw return data of the simulated call.
    pub fn return_data(&self) -> &Bytes {
        &self.return_data
    }

    pub fn into_request(self) -> TransactionRequest {
        self.request
    }
}

// ─── Receipt ─────────────────────────────────────────────────────────────────

/// Confirmation that a transaction was accepted for broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub transaction_hash: B256,
    pub from: Address,
    pub to: Address,
}

/// A mined transaction's receipt, as returned by `eth_getTransactionReceipt`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_hash: B256,
    #[serde(with = "quantity_u64")]
    pub block_number: u64,
    #[serde(with = "quantity_u64")]
    pub gas_used: u64,
    #[serde(with = "quantity_u64")]
    pub status: u64,
    pub from: Address,
    #[serde(default)]
    pub to: Option<Address>,
}

impl TransactionReceipt {
    pub fn succeeded(&self) -> bool {
        self.status == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    fn request() -> TransactionRequest {
        TransactionRequest {
            from: Address::from_str("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed").unwrap(),
            to: Address::from_str("0x7aae7e67515A2CbB8585C707Ca6db37BDd3EA839").unwrap(),
            data: Bytes::from_str("0x45368181").unwrap(),
            value: U256::from(2_331_000_000_000_000u64),
            gas: None,
            chain_id: 7_777_777,
        }
    }

    #[test]
    fn test_transaction_request_wire_format() {
        let value = serde_json::to_value(request()).unwrap();
        assert_eq!(
            value,
            json!({
                "from": "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
                "to": "0x7aae7e67515A2CbB8585C707Ca6db37BDd3EA839",
                "data": "0x45368181",
                "value": "0x848083af8b000",
                "chainId": "0x76adf1"
            })
        );
    }

    #[test]
    fn test_transaction_request_includes_gas_when_set() {
        let mut req = request();
        req.gas = Some(21_000);
        let value = serde_json::to_value(req).unwrap();
        assert_eq!(value["gas"], json!("0x5208"));
    }

    #[test]
    fn test_descriptor_display() {
        let descriptor = ExecutionDescriptor::new(Action::Mint721 { quantity: 3 }, request());
        assert_eq!(
            descriptor.to_string(),
            "mint721 x3 on 0x7aae7e67515A2CbB8585C707Ca6db37BDd3EA839 (0.002331 ETH)"
        );
    }

    #[test]
    fn test_transaction_receipt_from_node() {
        let receipt: TransactionReceipt = serde_json::from_value(json!({
            "transactionHash": "0x88df016429689c079f3b2f6ad39fa052532c56795b733da78a91ebe6a713944b",
            "blockNumber": "0x1b4",
            "gasUsed": "0x5208",
            "status": "0x1",
            "from": "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed",
            "to": null,
            "logs": []
        }))
        .unwrap();
        assert_eq!(receipt.block_number, 436);
        assert!(receipt.succeeded());
        assert_eq!(receipt.to, None);
    }
}
