//! Protocol position adapters and their aggregator.
//!
//! Adapters return fixed position records; nothing here reads contract state.

pub mod compound;
pub mod uniswap;

use std::sync::Arc;
use std::time::Duration;

use alloy::primitives::Address;
use anyhow::Result;
use async_trait::async_trait;
use futures::future::join_all;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::TrackerError;
use crate::model::PoolPosition;
use crate::provider::ChainProvider;

pub use compound::CompoundAdapter;
pub use uniswap::UniswapV3Adapter;

/// Static description of a supported protocol deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeFiProtocol {
    pub name: &'static str,
    pub chain_id: u64,
    pub contract_address: &'static str,
}

pub const UNISWAP_V3: DeFiProtocol = DeFiProtocol {
    name: "Uniswap V3",
    chain_id: 1,
    contract_address: "0x1F98431c8aD98523631AE4a59f267346ea31F984",
};

pub const COMPOUND: DeFiProtocol = DeFiProtocol {
    name: "Compound",
    chain_id: 1,
    contract_address: "0x3d9819210A31b4961b30EF54bE2aeD79B9c9Cd3B",
};

/// USDC contract address used in the mock position records.
pub(crate) const MOCK_USDC: &str = "0xA0b86a33E6417E8A7E0A48a50A0f67a9aEd3C81D";

/// In aggregation order.
pub const SUPPORTED_PROTOCOLS: &[DeFiProtocol] = &[UNISWAP_V3, COMPOUND];

/// Default simulated query latency per adapter.
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(250);

/// Mock total value locked, in USD. Unknown protocols report 0.
pub fn protocol_tvl(protocol: &str) -> f64 {
    match protocol {
        "Uniswap V3" => 4_200_000_000.0,
        "Compound" => 2_800_000_000.0,
        _ => 0.0,
    }
}

// ── Adapter trait ───────────────────────────────────────────────────

/// One protocol's view of a wallet's positions.
#[async_trait]
pub trait ProtocolAdapter: Send + Sync {
    fn protocol(&self) -> &DeFiProtocol;

    async fn positions(&self, wallet: Address) -> Result<Vec<PoolPosition>>;
}

/// Shared adapter plumbing: a provider handle and a fake round-trip delay.
pub(crate) struct AdapterContext {
    provider: Option<Arc<dyn ChainProvider>>,
    latency: Duration,
}

impl AdapterContext {
    pub(crate) fn new(provider: Option<Arc<dyn ChainProvider>>, latency: Duration) -> Self {
        Self { provider, latency }
    }

    /// Fails without a provider, otherwise waits out the simulated latency.
    pub(crate) async fn ready(&self, protocol: &DeFiProtocol, wallet: Address) -> Result<()> {
        if self.provider.is_none() {
            return Err(TrackerError::ProviderUnavailable.into());
        }
        debug!(protocol = protocol.name, %wallet, "querying positions");
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        Ok(())
    }
}

// ── Aggregation ─────────────────────────────────────────────────────

/// A protocol whose query failed during aggregation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdapterFailure {
    pub protocol: String,
    pub reason: String,
}

/// Aggregated positions plus any per-protocol failures.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PositionReport {
    pub positions: Vec<PoolPosition>,
    pub failures: Vec<AdapterFailure>,
}

impl PositionReport {
    pub fn total_usd_value(&self) -> f64 {
        self.positions.iter().map(|p| p.total_usd_value).sum()
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Queries every adapter concurrently and concatenates in adapter order.
///
/// A failing adapter drops only its own positions; the rest are kept and the
/// failure is reported alongside them.
pub struct PositionService {
    adapters: Vec<Box<dyn ProtocolAdapter>>,
}

impl PositionService {
    pub fn new(adapters: Vec<Box<dyn ProtocolAdapter>>) -> Self {
        Self { adapters }
    }

    /// The built-in adapters for `SUPPORTED_PROTOCOLS`.
    pub fn supported(provider: Option<Arc<dyn ChainProvider>>, latency: Duration) -> Self {
        Self::new(vec![
            Box::new(UniswapV3Adapter::new(provider.clone(), latency)),
            Box::new(CompoundAdapter::new(provider, latency)),
        ])
    }

    pub fn protocols(&self) -> Vec<&DeFiProtocol> {
        self.adapters.iter().map(|a| a.protocol()).collect()
    }

    pub async fn fetch_all(&self, wallet: Address) -> PositionReport {
        let results = join_all(self.adapters.iter().map(|a| a.positions(wallet))).await;

        let mut report = PositionReport::default();
        for (adapter, result) in self.adapters.iter().zip(results) {
            match result {
                Ok(positions) => report.positions.extend(positions),
                Err(e) => {
                    let protocol = adapter.protocol().name;
                    warn!(protocol, "Error fetching DeFi positions: {e:#}");
                    report.failures.push(AdapterFailure {
                        protocol: protocol.to_string(),
                        reason: format!("{e:#}"),
                    });
                }
            }
        }
        report
    }

    /// Positions from every adapter that succeeded.
    pub async fn get_all_positions(&self, wallet: Address) -> Vec<PoolPosition> {
        self.fetch_all(wallet).await.positions
    }
}
