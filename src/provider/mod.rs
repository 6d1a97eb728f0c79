//! Chain provider capability.
//!
//! The dashboard never reaches for an ambient global provider; whoever needs
//! chain access is handed an `Arc<dyn ChainProvider>` (or `None` when no
//! wallet is installed).

pub mod rpc;

use alloy::primitives::{Address, U256};
use anyhow::Result;
use async_trait::async_trait;

pub use rpc::RpcProvider;

/// EIP-1193-style wallet/chain access used by the dashboard.
#[async_trait]
pub trait ChainProvider: Send + Sync {
    /// Accounts already authorized for this site. Must not prompt the user.
    async fn accounts(&self) -> Result<Vec<Address>>;

    /// Ask for account access. May prompt; a rejection is an error.
    async fn request_accounts(&self) -> Result<Vec<Address>>;

    /// Native-currency balance in wei.
    async fn native_balance(&self, address: Address) -> Result<U256>;
}

// ── Static provider ──────────────────────────────────────────────────

/// Provider with a fixed account list and a fixed balance per account.
/// Backs the CLI `--demo` mode.
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    authorized: Vec<Address>,
    grantable: Vec<Address>,
    balance_wei: U256,
}

impl StaticProvider {
    /// `accounts` are already authorized and returned from both calls.
    pub fn new(accounts: Vec<Address>, balance_wei: U256) -> Self {
        Self {
            authorized: accounts.clone(),
            grantable: accounts,
            balance_wei,
        }
    }

    /// No pre-authorized accounts; `request_accounts` grants `accounts`.
    pub fn unauthorized(accounts: Vec<Address>, balance_wei: U256) -> Self {
        Self {
            authorized: Vec::new(),
            grantable: accounts,
            balance_wei,
        }
    }
}

#[async_trait]
impl ChainProvider for StaticProvider {
    async fn accounts(&self) -> Result<Vec<Address>> {
        Ok(self.authorized.clone())
    }

    async fn request_accounts(&self) -> Result<Vec<Address>> {
        Ok(self.grantable.clone())
    }

    async fn native_balance(&self, _address: Address) -> Result<U256> {
        Ok(self.balance_wei)
    }
}
