use std::sync::Arc;
use std::time::Duration;

use alloy::primitives::Address;
use anyhow::Result;
use async_trait::async_trait;

use super::{AdapterContext, COMPOUND, DeFiProtocol, MOCK_USDC, ProtocolAdapter};
use crate::model::{PoolPosition, TokenBalance};
use crate::provider::ChainProvider;

/// Single-asset supply positions.
pub struct CompoundAdapter {
    ctx: AdapterContext,
}

impl CompoundAdapter {
    pub fn new(provider: Option<Arc<dyn ChainProvider>>, latency: Duration) -> Self {
        Self {
            ctx: AdapterContext::new(provider, latency),
        }
    }
}

#[async_trait]
impl ProtocolAdapter for CompoundAdapter {
    fn protocol(&self) -> &DeFiProtocol {
        &COMPOUND
    }

    async fn positions(&self, wallet: Address) -> Result<Vec<PoolPosition>> {
        self.ctx.ready(&COMPOUND, wallet).await?;

        Ok(vec![PoolPosition {
            protocol: COMPOUND.name.to_string(),
            pool_name: "cUSDC Supply".to_string(),
            lp_tokens: "45.2134".to_string(),
            token0: TokenBalance::new(MOCK_USDC, "USDC", "1000.00", 1000.0),
            token1: TokenBalance::empty(),
            total_usd_value: 1000.0,
            apr: 8.2,
        }])
    }
}
