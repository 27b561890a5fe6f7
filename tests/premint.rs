//! Premint creation: address resolution, signing and submission.

mod common;

use common::*;
use serde_json::json;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use zora_protocol_sdk::domain::premint::typed_data::premint_digest;
use zora_protocol_sdk::prelude::*;
use zora_protocol_sdk::program::PREMINT_EXECUTOR;

const CONTRACT_URI: &str = "ipfs://bafkreiainxen4b4wz4ubylvbhons6rembxdet4a262nf2lziclqvv7au3e";
const TOKEN_URI: &str = "ipfs://bafkreice23maski3x52tsfqgxstx3kbiifnt5jotg3a5ynvve53c4soi2u";

type TestClient = Orchestrator<ZoraPreparer, RpcSimulator, WalletClient>;

fn client(
    transport: &Arc<ScriptedTransport>,
    registry: &Arc<MemoryRegistry>,
) -> TestClient {
    let rpc: Arc<dyn RpcTransport> = transport.clone();
    Orchestrator::new(
        ZoraPreparer::new(Chain::ZoraSepolia, rpc.clone(), registry.clone()),
        RpcSimulator::new(rpc.clone()),
        WalletClient::new(rpc, addr(CREATOR)),
    )
}

fn testing_contract() -> CreationRequest {
    CreationRequest::new(
        addr(CREATOR),
        "Testing Contract",
        CONTRACT_URI,
        TOKEN_URI,
        addr(CREATOR),
    )
}

fn node() -> Arc<ScriptedTransport> {
    let transport = ScriptedTransport::new();
    healthy_node(&transport, 0, 0);
    transport
}

// =============================================================================
// Preparation
// =============================================================================

#[tokio::test]
async fn test_collection_address_is_deterministic() {
    let transport = node();
    let registry = MemoryRegistry::new(1);
    let client = client(&transport, &registry);

    let first = client.prepare_creation(&testing_contract()).await.unwrap();
    let second = client.prepare_creation(&testing_contract()).await.unwrap();

    assert_eq!(first.collection_address, second.collection_address);
    assert!(!first.collection_address.is_zero());

    let mut renamed = testing_contract();
    renamed.contract_name = "Another Contract".to_string();
    let other = client.prepare_creation(&renamed).await.unwrap();
    assert_ne!(other.collection_address, first.collection_address);

    for params in transport.calls("eth_call") {
        let (to, data) = call_target(&params);
        assert_eq!(to, PREMINT_EXECUTOR.to_string());
        assert!(data.starts_with(GET_CONTRACT_ADDRESS_SELECTOR));
    }
}

#[tokio::test]
async fn test_prepared_premint_uses_registry_uid_and_defaults() {
    let transport = node();
    let registry = MemoryRegistry::new(7);
    let client = client(&transport, &registry);

    let prepared = client.prepare_creation(&testing_contract()).await.unwrap();

    let premint = &prepared.premint_config;
    assert_eq!(premint.uid, 7);
    assert_eq!(premint.version, 2);
    assert!(!premint.deleted);
    assert_eq!(premint.token_config.token_uri, TOKEN_URI);
    assert_eq!(premint.token_config.payout_recipient, addr(CREATOR));
    assert_eq!(premint.token_config.royalty_bps, 1000);
    assert_eq!(prepared.submission.collection().contract_name, "Testing Contract");
}

#[tokio::test]
async fn test_invalid_creation_request_makes_no_calls() {
    let transport = node();
    let registry = MemoryRegistry::new(1);
    let client = client(&transport, &registry);

    let mut unnamed = testing_contract();
    unnamed.contract_name = String::new();
    let err = client.prepare_creation(&unnamed).await.unwrap_err();
    assert!(matches!(err, SdkError::InvalidRequest(_)));

    let bad_uri = CreationRequest::new(
        addr(CREATOR),
        "Testing Contract",
        "bafkreiainxen4b4wz4ubylvbhons6rembxdet4a262nf2lziclqvv7au3e",
        TOKEN_URI,
        addr(CREATOR),
    );
    let err = client.prepare_creation(&bad_uri).await.unwrap_err();
    assert!(matches!(err, SdkError::InvalidRequest(_)));

    assert_eq!(transport.total_calls(), 0);
}

// =============================================================================
// Signing and submission
// =============================================================================

#[tokio::test]
async fn test_sign_and_submit_by_admin() {
    let transport = node();
    let registry = MemoryRegistry::new(3);
    let client = client(&transport, &registry);

    let prepared = client.prepare_creation(&testing_contract()).await.unwrap();
    let collection_address = prepared.collection_address;
    let expected_digest = premint_digest(
        &prepared.premint_config,
        Chain::ZoraSepolia.id(),
        &collection_address,
    );

    let signer = FixedSigner::new(addr(CREATOR));
    let ack = prepared.submission.sign_and_submit(&signer).await.unwrap();

    assert_eq!(ack.uid, 3);
    assert_eq!(ack.collection_address, collection_address);

    let signed = signer.signed.lock().unwrap().clone();
    assert_eq!(signed.len(), 1);
    assert_eq!(signed[0].digest, expected_digest);

    let submitted = registry.submitted();
    assert_eq!(submitted.len(), 1);
    assert_eq!(submitted[0].chain, Chain::ZoraSepolia);
    assert_eq!(submitted[0].signature, FixedSigner::signature());
    assert_eq!(submitted[0].premint, prepared.premint_config);
}

#[tokio::test]
async fn test_signer_other_than_admin_is_refused() {
    let transport = node();
    let registry = MemoryRegistry::new(1);
    let client = client(&transport, &registry);

    let prepared = client.prepare_creation(&testing_contract()).await.unwrap();
    let impostor = FixedSigner::new(addr(MINTER));
    let err = prepared
        .submission
        .sign_and_submit(&impostor)
        .await
        .unwrap_err();

    assert!(matches!(err, SdkError::InvalidRequest(_)));
    assert_eq!(impostor.calls.load(Ordering::SeqCst), 0);
    assert!(registry.submitted().is_empty());
}

#[tokio::test]
async fn test_wallet_signs_typed_data_json() {
    let transport = node();
    let signature = format!("0x{}", "5a".repeat(65));
    transport.respond("eth_signTypedData_v4", json!(signature));
    let registry = MemoryRegistry::new(1);
    let client = client(&transport, &registry);

    let prepared = client.prepare_creation(&testing_contract()).await.unwrap();
    prepared
        .submission
        .sign_and_submit(client.executor())
        .await
        .unwrap();

    let requests = transport.calls("eth_signTypedData_v4");
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0][0], CREATOR);
    let typed: serde_json::Value =
        serde_json::from_str(requests[0][1].as_str().unwrap()).unwrap();
    assert_eq!(typed["primaryType"], "CreatorAttribution");
    assert_eq!(typed["domain"]["chainId"], 999_999_999);
    assert_eq!(typed["message"]["tokenConfig"]["tokenURI"], TOKEN_URI);

    assert_eq!(registry.submitted()[0].signature.to_string(), signature);
}

#[tokio::test]
async fn test_wallet_declining_to_sign_submits_nothing() {
    let transport = node();
    transport.reject("eth_signTypedData_v4", 4001, "User rejected the request.", None);
    let registry = MemoryRegistry::new(1);
    let client = client(&transport, &registry);

    let prepared = client.prepare_creation(&testing_contract()).await.unwrap();
    let err = prepared
        .submission
        .sign_and_submit(client.executor())
        .await
        .unwrap_err();

    assert!(matches!(err, SdkError::ExecutionRejected(_)));
    assert!(registry.submitted().is_empty());
}
