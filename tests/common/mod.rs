//! In-memory collaborators shared by the integration tests.

#![allow(dead_code)]

pub mod server;

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use zora_protocol_sdk::error::{RpcError, SdkError};
use zora_protocol_sdk::network::Chain;
use zora_protocol_sdk::pipeline::{PremintRegistry, TypedDataSigner};
use zora_protocol_sdk::prelude::{
    Address, Bytes, SignedPremint, SubmissionAck, TypedDataPayload, U256,
};
use zora_protocol_sdk::rpc::RpcTransport;
use zora_protocol_sdk::shared::abi::{encode, Token};
use zora_protocol_sdk::shared::keccak256;

pub const MINTER: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";
pub const CREATOR: &str = "0xCD2a3d9F938E13CD947Ec05AbC7FE734Df8DD826";
pub const DROP_721: &str = "0x7aae7e67515A2CbB8585C707Ca6db37BDd3EA839";
pub const REFERRAL: &str = "0x0C8596Ee50e06Ce710237c9c905D4aB63A132207";

pub const SALE_DETAILS_SELECTOR: &str = "0x3474a4a6";
pub const FIXED_PRICE_SALE_SELECTOR: &str = "0x611efc09";
pub const GET_CONTRACT_ADDRESS_SELECTOR: &str = "0x2fc02bc2";

pub fn addr(s: &str) -> Address {
    Address::from_str(s).unwrap()
}

pub fn tx_hash() -> String {
    format!("0x{}", "ab".repeat(32))
}

type Handler = Box<dyn Fn(&Value) -> Result<Value, RpcError> + Send + Sync>;

/// JSON-RPC endpoint answering from per-method handlers and logging every
/// request. Unscripted methods answer `-32601`.
#[derive(Default)]
pub struct ScriptedTransport {
    handlers: Mutex<HashMap<String, Handler>>,
    log: Mutex<Vec<(String, Value)>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn on<F>(&self, method: &str, handler: F)
    where
        F: Fn(&Value) -> Result<Value, RpcError> + Send + Sync + 'static,
    {
        self.handlers
            .lock()
            .unwrap()
            .insert(method.to_string(), Box::new(handler));
    }

    pub fn respond(&self, method: &str, result: Value) {
        self.on(method, move |_| Ok(result.clone()));
    }

    pub fn reject(&self, method: &str, code: i64, message: &str, data: Option<Value>) {
        let message = message.to_string();
        self.on(method, move |_| {
            Err(RpcError::Response {
                code,
                message: message.clone(),
                data: data.clone(),
            })
        });
    }

    pub fn count(&self, method: &str) -> usize {
        self.calls(method).len()
    }

    pub fn calls(&self, method: &str) -> Vec<Value> {
        self.log
            .lock()
            .unwrap()
            .iter()
            .filter(|(m, _)| m == method)
            .map(|(_, params)| params.clone())
            .collect()
    }

    pub fn total_calls(&self) -> usize {
        self.log.lock().unwrap().len()
    }
}

#[async_trait]
impl RpcTransport for ScriptedTransport {
    async fn request(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        self.log
            .lock()
            .unwrap()
            .push((method.to_string(), params.clone()));
        let handlers = self.handlers.lock().unwrap();
        match handlers.get(method) {
            Some(handler) => handler(&params),
            None => Err(RpcError::Response {
                code: -32601,
                message: format!("the method {} does not exist/is not available", method),
                data: None,
            }),
        }
    }
}

fn hex_value(data: Vec<u8>) -> Value {
    Value::String(format!("0x{}", hex::encode(data)))
}

/// `eth_call` target and calldata of a logged request.
pub fn call_target(params: &Value) -> (String, String) {
    (
        params[0]["to"].as_str().unwrap_or_default().to_string(),
        params[0]["data"].as_str().unwrap_or_default().to_string(),
    )
}

/// An `eth_call` handler that answers like the Zora contracts:
/// - `saleDetails()` reports `price_721`
/// - fixed-price `sale()` reports `price_1155`
/// - `getContractAddress` derives an address from the calldata hash
/// - anything else (the mint itself) succeeds with empty return data
pub fn zora_contracts(
    price_721: U256,
    price_1155: U256,
) -> impl Fn(&Value) -> Result<Value, RpcError> + Send + Sync + 'static {
    move |params| {
        let (_, data) = call_target(params);
        if data.starts_with(SALE_DETAILS_SELECTOR) {
            return Ok(hex_value(encode(&[
                Token::Bool(true),
                Token::Bool(false),
                Token::Uint(price_721),
                Token::uint(0u64),
                Token::uint(0u64),
                Token::uint(0u64),
            ])));
        }
        if data.starts_with(FIXED_PRICE_SALE_SELECTOR) {
            return Ok(hex_value(encode(&[
                Token::uint(0u64),
                Token::uint(u64::MAX),
                Token::uint(0u64),
                Token::Uint(price_1155),
                Token::Address(Address::ZERO),
            ])));
        }
        if data.starts_with(GET_CONTRACT_ADDRESS_SELECTOR) {
            let hash = keccak256(data.as_bytes());
            let mut bytes = [0u8; 20];
            bytes.copy_from_slice(&hash[12..]);
            return Ok(hex_value(encode(&[Token::Address(Address::new(bytes))])));
        }
        Ok(json!("0x"))
    }
}

/// Script a node that accepts every mint at the given prices.
pub fn healthy_node(transport: &ScriptedTransport, price_721: u64, price_1155: u64) {
    priced_node(transport, U256::from(price_721), U256::from(price_1155));
}

/// [`healthy_node`] with prices of any width.
pub fn priced_node(transport: &ScriptedTransport, price_721: U256, price_1155: U256) {
    transport.on("eth_call", zora_contracts(price_721, price_1155));
    transport.respond("eth_estimateGas", json!("0x1d4c0"));
    transport.respond("eth_sendTransaction", json!(tx_hash()));
}

// ─── Registry ────────────────────────────────────────────────────────────────

/// Premint registry held in memory.
pub struct MemoryRegistry {
    next_uid: AtomicU32,
    pub submitted: Mutex<Vec<SignedPremint>>,
}

impl MemoryRegistry {
    pub fn new(next_uid: u32) -> Arc<Self> {
        Arc::new(Self {
            next_uid: AtomicU32::new(next_uid),
            submitted: Mutex::new(Vec::new()),
        })
    }

    pub fn submitted(&self) -> Vec<SignedPremint> {
        self.submitted.lock().unwrap().clone()
    }
}

#[async_trait]
impl PremintRegistry for MemoryRegistry {
    async fn next_uid(&self, _chain: Chain, _collection: &Address) -> Result<u32, SdkError> {
        Ok(self.next_uid.load(Ordering::SeqCst))
    }

    async fn submit(&self, premint: &SignedPremint) -> Result<SubmissionAck, SdkError> {
        self.submitted.lock().unwrap().push(premint.clone());
        self.next_uid.fetch_add(1, Ordering::SeqCst);
        Ok(SubmissionAck {
            collection_address: premint.collection_address,
            uid: premint.premint.uid,
        })
    }
}

// ─── Signer ──────────────────────────────────────────────────────────────────

/// Signs everything with a fixed signature and records the digests it saw.
pub struct FixedSigner {
    address: Address,
    pub signed: Mutex<Vec<TypedDataPayload>>,
    pub calls: AtomicUsize,
}

impl FixedSigner {
    pub fn new(address: Address) -> Self {
        Self {
            address,
            signed: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn signature() -> Bytes {
        Bytes::new(vec![0x5a; 65])
    }
}

#[async_trait]
impl TypedDataSigner for FixedSigner {
    fn address(&self) -> Address {
        self.address
    }

    async fn sign_typed_data(&self, payload: &TypedDataPayload) -> Result<Bytes, SdkError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.signed.lock().unwrap().push(payload.clone());
        Ok(Self::signature())
    }
}
