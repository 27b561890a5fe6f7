//! Default simulator: `eth_call` at `latest`, then `eth_estimateGas`.

use super::Simulator;
use crate::domain::transaction::{ExecutionDescriptor, SimulationResult};
use crate::error::{RpcError, SdkError, Stage};
use crate::rpc::{self, RpcTransport};
use crate::shared::serde_util::{parse_quantity, to_u64};
use crate::shared::Bytes;
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

#[derive(Clone)]
pub struct RpcSimulator {
    rpc: Arc<dyn RpcTransport>,
}

impl RpcSimulator {
    pub fn new(rpc: Arc<dyn RpcTransport>) -> Self {
        Self { rpc }
    }
}

impl std::fmt::Debug for RpcSimulator {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("RpcSimulator").finish_non_exhaustive()
    }
}

/// A JSON-RPC error object is the node rejecting the call; anything else is
/// a transport problem.
fn rejection(e: RpcError) -> SdkError {
    if let RpcError::Response { message, .. } = &e {
        return SdkError::SimulationFailed {
            reason: message.clone(),
            revert_data: e.revert_data(),
        };
    }
    SdkError::rpc(Stage::Simulate)(e)
}

#[async_trait]
impl Simulator for RpcSimulator {
    async fn simulate(
        &self,
        descriptor: ExecutionDescriptor,
    ) -> Result<SimulationResult, SdkError> {
        let mut request = descriptor.into_request();

        let return_data: Bytes = rpc::call(
            self.rpc.as_ref(),
            "eth_call",
            json!([&request, "latest"]),
        )
        .await
        .map_err(rejection)?;

        let gas: String = rpc::call(self.rpc.as_ref(), "eth_estimateGas", json!([&request]))
            .await
            .map_err(rejection)?;
        let gas = parse_quantity(&gas)
            .ok()
            .and_then(to_u64)
            .ok_or_else(|| {
                SdkError::rpc(Stage::Simulate)(RpcError::InvalidResponse(format!(
                    "eth_estimateGas: bad quantity {}",
                    gas
                )))
            })?;

        request.gas = Some(gas);
        Ok(SimulationResult::new(request, return_data))
    }
}
