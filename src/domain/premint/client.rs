//! Premint registry client — UID allocation and signature submission over the
//! Zora premint API.

use super::wire::{NextUidResponse, PremintSignatureRequest};
use super::{SignedPremint, SubmissionAck};
use crate::error::{HttpError, SdkError, Stage};
use crate::http::{RetryPolicy, ZoraHttp};
use crate::network::Chain;
use crate::pipeline::PremintRegistry;
use crate::shared::Address;
use async_trait::async_trait;

/// HTTP client for the premint registry.
#[derive(Clone)]
pub struct PremintApiClient {
    base_url: String,
    http: ZoraHttp,
}

impl PremintApiClient {
    pub fn new(base_url: &str) -> Result<Self, HttpError> {
        Ok(Self::with_client(base_url, ZoraHttp::new()?))
    }

    pub fn with_client(base_url: &str, http: ZoraHttp) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn next_uid_url(&self, chain: Chain, collection: &Address) -> String {
        format!(
            "{}/signature/{}/{}/next_uid",
            self.base_url,
            chain.premint_api_name(),
            collection
        )
    }

    fn signature_url(&self) -> String {
        format!("{}/signature", self.base_url)
    }
}

impl std::fmt::Debug for PremintApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("PremintApiClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl PremintRegistry for PremintApiClient {
    async fn next_uid(&self, chain: Chain, collection: &Address) -> Result<u32, SdkError> {
        let resp: NextUidResponse = self
            .http
            .get(&self.next_uid_url(chain, collection), RetryPolicy::Idempotent)
            .await
            .map_err(SdkError::registry(Stage::Prepare))?;
        Ok(resp.next_uid)
    }

    async fn submit(&self, signed: &SignedPremint) -> Result<SubmissionAck, SdkError> {
        let body = PremintSignatureRequest {
            collection: &signed.collection,
            premint: &signed.premint,
            chain_name: signed.chain.premint_api_name(),
            signature: &signed.signature,
        };

        // Submissions are never retried: a timed-out POST may still have landed.
        self.http
            .post::<serde_json::Value, _>(&self.signature_url(), &body, RetryPolicy::None)
            .await
            .map_err(|e| SdkError::SubmissionFailed(e.to_string()))?;

        tracing::info!(
            collection = %signed.collection_address,
            uid = signed.premint.uid,
            chain = %signed.chain,
            "Premint submitted"
        );

        Ok(SubmissionAck {
            collection_address: signed.collection_address,
            uid: signed.premint.uid,
        })
    }
}
