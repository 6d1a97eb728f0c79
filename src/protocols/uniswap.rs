use std::sync::Arc;
use std::time::Duration;

use alloy::primitives::Address;
use anyhow::Result;
use async_trait::async_trait;

use super::{AdapterContext, DeFiProtocol, MOCK_USDC, ProtocolAdapter, UNISWAP_V3};
use crate::model::{PoolPosition, TokenBalance};
use crate::provider::ChainProvider;

/// Concentrated-liquidity LP positions.
pub struct UniswapV3Adapter {
    ctx: AdapterContext,
}

impl UniswapV3Adapter {
    pub fn new(provider: Option<Arc<dyn ChainProvider>>, latency: Duration) -> Self {
        Self {
            ctx: AdapterContext::new(provider, latency),
        }
    }
}

#[async_trait]
impl ProtocolAdapter for UniswapV3Adapter {
    fn protocol(&self) -> &DeFiProtocol {
        &UNISWAP_V3
    }

    async fn positions(&self, wallet: Address) -> Result<Vec<PoolPosition>> {
        self.ctx.ready(&UNISWAP_V3, wallet).await?;

        Ok(vec![PoolPosition {
            protocol: UNISWAP_V3.name.to_string(),
            pool_name: "USDC/ETH 0.05%".to_string(),
            lp_tokens: "0.5421".to_string(),
            token0: TokenBalance::new(MOCK_USDC, "USDC", "1250.00", 1250.0),
            token1: TokenBalance::native("ETH", "0.5", 1250.0),
            total_usd_value: 2500.0,
            apr: 12.5,
        }])
    }
}
