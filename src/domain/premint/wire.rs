//! Premint registry API wire types.

use super::{ContractCreationConfig, PremintConfig};
use crate::shared::Bytes;
use serde::{Deserialize, Serialize};

/// Body of `POST {base}/signature`.
#[derive(Debug, Clone, Serialize)]
pub struct PremintSignatureRequest<'a> {
    pub collection: &'a ContractCreationConfig,
    pub premint: &'a PremintConfig,
    pub chain_name: &'a str,
    pub signature: &'a Bytes,
}

/// Response of `GET {base}/signature/{chain}/{collection}/next_uid`.
#[derive(Debug, Clone, Deserialize)]
pub struct NextUidResponse {
    pub next_uid: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::premint::CreationRequest;
    use crate::shared::Address;
    use std::str::FromStr;

    #[test]
    fn test_signature_request_body() {
        let admin = Address::from_str("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed").unwrap();
        let request = CreationRequest::new(
            admin,
            "Testing Contract",
            "ipfs://contract",
            "ipfs://token",
            admin,
        );
        let collection = request.contract_config();
        let premint = PremintConfig::new(request.token_config().unwrap(), 7);
        let signature = Bytes::new(vec![0xab; 65]);

        let body = serde_json::to_value(PremintSignatureRequest {
            collection: &collection,
            premint: &premint,
            chain_name: "ZORA-MAINNET",
            signature: &signature,
        })
        .unwrap();

        assert_eq!(body["collection"]["contractName"], "Testing Contract");
        assert_eq!(body["collection"]["contractURI"], "ipfs://contract");
        assert_eq!(body["premint"]["uid"], 7);
        assert_eq!(body["chain_name"], "ZORA-MAINNET");
        assert_eq!(body["signature"].as_str().unwrap().len(), 2 + 130);
    }

    #[test]
    fn test_next_uid_response() {
        let resp: NextUidResponse = serde_json::from_str(r#"{"next_uid": 12}"#).unwrap();
        assert_eq!(resp.next_uid, 12);
    }
}
