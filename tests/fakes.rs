#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use alloy::primitives::{Address, U256, address};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::NaiveDate;
use rand::SeedableRng;
use rand::rngs::StdRng;

use yield_tracker::model::PoolPosition;
use yield_tracker::protocols::{DeFiProtocol, PositionService, ProtocolAdapter};
use yield_tracker::provider::ChainProvider;
use yield_tracker::view::{PortfolioView, YieldHistoryView};
use yield_tracker::wallet::{AccountListener, Notifier};

pub const ALICE: Address = address!("0x1111111111111111111111111111111111111111");
pub const BOB: Address = address!("0x2222222222222222222222222222222222222222");

/// 1.5 ETH
pub const ONE_AND_HALF_ETH: u128 = 1_500_000_000_000_000_000;

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

// ── Fake chain provider ──────────────────────────────────────────────

/// Provider whose every call is scripted. `None` for an account call means it
/// errors; `balance_fails` can be flipped mid-test.
pub struct FakeProvider {
    pub authorized: Option<Vec<Address>>,
    pub grant: Option<Vec<Address>>,
    pub balance_wei: U256,
    pub balance_fails: AtomicBool,
    pub balance_calls: AtomicUsize,
}

impl FakeProvider {
    pub fn preauthorized(account: Address) -> Self {
        Self {
            authorized: Some(vec![account]),
            grant: Some(vec![account]),
            balance_wei: U256::from(ONE_AND_HALF_ETH),
            balance_fails: AtomicBool::new(false),
            balance_calls: AtomicUsize::new(0),
        }
    }

    pub fn fresh(grant: Vec<Address>) -> Self {
        Self {
            authorized: Some(Vec::new()),
            grant: Some(grant),
            balance_wei: U256::from(ONE_AND_HALF_ETH),
            balance_fails: AtomicBool::new(false),
            balance_calls: AtomicUsize::new(0),
        }
    }

    pub fn rejecting() -> Self {
        Self {
            authorized: Some(Vec::new()),
            grant: None,
            balance_wei: U256::ZERO,
            balance_fails: AtomicBool::new(false),
            balance_calls: AtomicUsize::new(0),
        }
    }

    pub fn broken() -> Self {
        Self {
            authorized: None,
            grant: None,
            balance_wei: U256::ZERO,
            balance_fails: AtomicBool::new(true),
            balance_calls: AtomicUsize::new(0),
        }
    }

    pub fn failing_balance(self) -> Self {
        self.balance_fails.store(true, Ordering::SeqCst);
        self
    }
}

#[async_trait]
impl ChainProvider for FakeProvider {
    async fn accounts(&self) -> Result<Vec<Address>> {
        self.authorized.clone().ok_or_else(|| anyhow!("eth_accounts unavailable"))
    }

    async fn request_accounts(&self) -> Result<Vec<Address>> {
        self.grant.clone().ok_or_else(|| anyhow!("User rejected the request."))
    }

    async fn native_balance(&self, _address: Address) -> Result<U256> {
        self.balance_calls.fetch_add(1, Ordering::SeqCst);
        if self.balance_fails.load(Ordering::SeqCst) {
            return Err(anyhow!("eth_getBalance failed"));
        }
        Ok(self.balance_wei)
    }
}

// ── Wallet observers ─────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingListener {
    pub events: Mutex<Vec<Option<Address>>>,
}

impl RecordingListener {
    pub fn events(&self) -> Vec<Option<Address>> {
        self.events.lock().unwrap().clone()
    }
}

impl AccountListener for RecordingListener {
    fn on_account_changed(&self, account: Option<Address>) {
        self.events.lock().unwrap().push(account);
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub alerts: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }
}

// ── Mock adapters ────────────────────────────────────────────────────

pub const MOCK_PROTOCOL: DeFiProtocol = DeFiProtocol {
    name: "Mock",
    chain_id: 1,
    contract_address: "0x0000000000000000000000000000000000000001",
};

/// Adapter that always fails.
pub struct FailingAdapter;

#[async_trait]
impl ProtocolAdapter for FailingAdapter {
    fn protocol(&self) -> &DeFiProtocol {
        &MOCK_PROTOCOL
    }

    async fn positions(&self, _wallet: Address) -> Result<Vec<PoolPosition>> {
        Err(anyhow!("subgraph timeout"))
    }
}

// ── View builders ────────────────────────────────────────────────────

pub fn positions_for(provider: Option<Arc<dyn ChainProvider>>) -> Arc<PositionService> {
    Arc::new(PositionService::supported(provider, Duration::ZERO))
}

pub fn portfolio_view(provider: Option<Arc<dyn ChainProvider>>) -> PortfolioView {
    PortfolioView::new(
        provider.clone(),
        positions_for(provider),
        2500.0,
        today(),
        rng(7),
    )
}

pub fn yield_view() -> YieldHistoryView {
    YieldHistoryView::new(today(), rng(11))
}
